use crate::dsl::plan::Lookup;
use crate::schema::records::collections;

/// A functional foreign-key relation: at most one `to` record per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinEdge {
    pub to: &'static str,
    pub local_field: &'static str,
    pub foreign_field: &'static str,
    pub alias: &'static str,
}

impl JoinEdge {
    /// Left outer lookup keeping the first match only.
    pub fn lookup(&self) -> Lookup {
        Lookup {
            from: self.to.to_string(),
            local_field: self.local_field.to_string(),
            foreign_field: self.foreign_field.to_string(),
            as_field: self.alias.to_string(),
            limit: Some(1),
        }
    }
}

pub const ORDER_ITEM_FOOD: JoinEdge = JoinEdge {
    to: collections::FOOD,
    local_field: "food_id",
    foreign_field: "food_id",
    alias: "food",
};

pub const ORDER_ITEM_ORDER: JoinEdge = JoinEdge {
    to: collections::ORDER,
    local_field: "order_id",
    foreign_field: "order_id",
    alias: "order",
};

// reached through the joined order, so it must come after ORDER_ITEM_ORDER
pub const ORDER_TABLE: JoinEdge = JoinEdge {
    to: collections::TABLE,
    local_field: "order.table_id",
    foreign_field: "table_id",
    alias: "table",
};

/// Relations walked from an order item to build its invoice line, in
/// dependency order.
pub const INVOICE_JOINS: [JoinEdge; 3] = [ORDER_ITEM_FOOD, ORDER_ITEM_ORDER, ORDER_TABLE];
