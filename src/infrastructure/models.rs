use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::order::{Item, Order};
use crate::schema::{items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub customer_name: String,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub customer_name: &'a str,
    pub ordered_at: DateTime<Utc>,
}

/// Scalar columns of an order. Items are never written through this.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChangeset<'a> {
    pub customer_name: &'a str,
    pub ordered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub order_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = items)]
pub struct NewItemRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub quantity: i32,
    pub order_id: i64,
}

impl<'a> NewItemRow<'a> {
    pub fn for_order(item: &'a Item, order_id: i64) -> Self {
        Self {
            name: &item.name,
            description: &item.description,
            quantity: item.quantity,
            order_id,
        }
    }
}

/// Fields refreshed on an existing item during reconciliation. The
/// description is the matching key and the owning order is never changed.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = items)]
pub struct ItemChangeset<'a> {
    pub name: &'a str,
    pub quantity: i32,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
            order_id: row.order_id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

impl OrderRow {
    pub fn into_order(self, items: Vec<ItemRow>) -> Order {
        Order {
            id: self.id,
            customer_name: self.customer_name,
            ordered_at: self.ordered_at,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            items: items.into_iter().map(Item::from).collect(),
        }
    }
}
