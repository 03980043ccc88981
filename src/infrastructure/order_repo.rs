use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::{debug, warn};

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Item, Order};
use crate::domain::ports::OrderRepository;
use crate::schema::{items, orders};

use super::models::{
    ItemChangeset, ItemRow, NewItemRow, NewOrderRow, OrderChangeset, OrderRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => DomainError::ConstraintViolation(info.message().to_string()),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: Order) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order
            let row: OrderRow = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_name: &order.customer_name,
                    ordered_at: order.ordered_at,
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert its items under the generated id
            let new_items: Vec<NewItemRow> = order
                .items
                .iter()
                .map(|item| NewItemRow::for_order(item, row.id))
                .collect();
            let item_rows: Vec<ItemRow> = if new_items.is_empty() {
                Vec::new()
            } else {
                diesel::insert_into(items::table)
                    .values(&new_items)
                    .returning(ItemRow::as_returning())
                    .get_results(conn)?
            };

            debug!("created order {} with {} items", row.id, item_rows.len());
            Ok(row.into_order(item_rows))
        })
        .inspect_err(|e| warn!("create order failed: {}", e))
    }

    fn find_by_id(&self, id: i64) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // Order and items come from one snapshot so a concurrent update is
        // seen entirely or not at all.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| {
                let order: OrderRow = orders::table
                    .find(id)
                    .select(OrderRow::as_select())
                    .first(conn)
                    .optional()?
                    .ok_or(DomainError::NotFound)?;

                let items = ItemRow::belonging_to(&order)
                    .select(ItemRow::as_select())
                    .order(items::id.asc())
                    .load::<ItemRow>(conn)?;

                Ok(order.into_order(items))
            })
    }

    fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| {
                let rows = orders::table
                    .select(OrderRow::as_select())
                    .order(orders::id.asc())
                    .load::<OrderRow>(conn)?;

                let items = ItemRow::belonging_to(&rows)
                    .select(ItemRow::as_select())
                    .order(items::id.asc())
                    .load::<ItemRow>(conn)?
                    .grouped_by(&rows);

                Ok(rows
                    .into_iter()
                    .zip(items)
                    .map(|(order, items)| order.into_order(items))
                    .collect())
            })
    }

    fn update(&self, order: Order) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the order and its current items. Concurrent updates of
            //    the same order queue up here.
            let locked: OrderRow = orders::table
                .find(order.id)
                .for_update()
                .select(OrderRow::as_select())
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound)?;

            let current: Vec<ItemRow> = ItemRow::belonging_to(&locked)
                .for_update()
                .select(ItemRow::as_select())
                .load(conn)?;

            // 2. Scalar fields only
            diesel::update(orders::table.find(locked.id))
                .set(&OrderChangeset {
                    customer_name: &order.customer_name,
                    ordered_at: order.ordered_at,
                })
                .execute(conn)?;

            // 3. Reconcile items by description. Omitted items stay.
            for item in &order.items {
                reconcile_item(conn, locked.id, &current, item)?;
            }

            debug!(
                "updated order {} reconciling {} items",
                locked.id,
                order.items.len()
            );
            Ok(())
        })
        .inspect_err(|e| warn!("update of order {} failed: {}", order.id, e))
    }

    fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // items go with it through ON DELETE CASCADE
            let deleted = diesel::delete(orders::table.find(id)).execute(conn)?;
            if deleted == 0 {
                return Err(DomainError::NotFound);
            }

            debug!("deleted order {}", id);
            Ok(())
        })
    }
}

// ── Item reconciliation ──────────────────────────────────────────────────────

fn reconcile_item(
    conn: &mut PgConnection,
    order_id: i64,
    current: &[ItemRow],
    item: &Item,
) -> Result<(), DomainError> {
    if let Some(row) = current.iter().find(|row| row.description == item.description) {
        return refresh_item(conn, row.id, item);
    }

    if let Some(row) = find_item_for_update(conn, &item.description)? {
        ensure_owned_by(&row, order_id)?;
        return refresh_item(conn, row.id, item);
    }

    let inserted = diesel::insert_into(items::table)
        .values(&NewItemRow::for_order(item, order_id))
        .on_conflict(items::description)
        .do_nothing()
        .execute(conn)?;
    if inserted == 1 {
        return Ok(());
    }

    // Another transaction committed this description after our lookup. Inserts
    // into this order queue behind its row lock, so the winner is another order.
    let row = find_item_for_update(conn, &item.description)?.ok_or_else(|| {
        DomainError::ConstraintViolation(format!(
            "item with description '{}' could not be created",
            item.description
        ))
    })?;
    ensure_owned_by(&row, order_id)?;
    refresh_item(conn, row.id, item)
}

fn find_item_for_update(
    conn: &mut PgConnection,
    description: &str,
) -> QueryResult<Option<ItemRow>> {
    items::table
        .filter(items::description.eq(description))
        .for_update()
        .select(ItemRow::as_select())
        .first(conn)
        .optional()
}

/// Items are never moved between orders. Descriptions are unique store-wide,
/// so naming another order's item is rejected instead of re-homing it.
fn ensure_owned_by(row: &ItemRow, order_id: i64) -> Result<(), DomainError> {
    if row.order_id == order_id {
        Ok(())
    } else {
        Err(DomainError::ConstraintViolation(format!(
            "item with description '{}' belongs to order {}",
            row.description, row.order_id
        )))
    }
}

fn refresh_item(conn: &mut PgConnection, item_id: i64, item: &Item) -> Result<(), DomainError> {
    diesel::update(items::table.find(item_id))
        .set(&ItemChangeset {
            name: &item.name,
            quantity: item.quantity,
        })
        .execute(conn)?;
    Ok(())
}
