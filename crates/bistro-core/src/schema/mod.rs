pub mod join_graph;
pub mod payloads;
pub mod records;

pub use records::{collections, FoodItem, Order, OrderItem, Record, Table};
