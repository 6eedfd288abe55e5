use std::sync::Arc;

use crate::records::validate::{validate_food, validate_table};
use crate::records::{new_record_id, RecordError, Repository};
use crate::schema::payloads::{NewFood, NewTable};
use crate::schema::records::{round_money, timestamp_now, FoodItem, Table};
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct FoodService {
    foods: Repository<FoodItem>,
}

impl FoodService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            foods: Repository::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<FoodItem>, RecordError> {
        self.foods.list().await
    }

    pub async fn get(&self, food_id: &str) -> Result<FoodItem, RecordError> {
        self.foods.require(food_id).await
    }

    pub async fn create(&self, new: NewFood) -> Result<FoodItem, RecordError> {
        validate_food(&new)?;

        let now = timestamp_now();
        let food = FoodItem {
            food_id: new_record_id(),
            name: new.name,
            price: round_money(new.price),
            food_image: new.food_image,
            created_at: now,
            updated_at: now,
        };
        self.foods.insert(std::slice::from_ref(&food)).await?;
        Ok(food)
    }
}

#[derive(Clone)]
pub struct TableService {
    tables: Repository<Table>,
}

impl TableService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            tables: Repository::new(store),
        }
    }

    pub async fn list(&self) -> Result<Vec<Table>, RecordError> {
        self.tables.list().await
    }

    pub async fn get(&self, table_id: &str) -> Result<Table, RecordError> {
        self.tables.require(table_id).await
    }

    pub async fn create(&self, new: NewTable) -> Result<Table, RecordError> {
        validate_table(&new)?;

        let now = timestamp_now();
        let table = Table {
            table_id: new_record_id(),
            table_number: new.table_number,
            number_of_guests: new.number_of_guests,
            created_at: now,
            updated_at: now,
        };
        self.tables.insert(std::slice::from_ref(&table)).await?;
        Ok(table)
    }
}
