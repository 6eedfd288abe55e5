pub mod catalog;
pub mod health;
pub mod order_items;
pub mod orders;
