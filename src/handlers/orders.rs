use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::application::view_model::{ItemViewModel, OrderViewModel};
use crate::errors::{AppError, ErrorResponse};
use crate::timestamp;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Must be greater than zero
    #[serde(default)]
    pub quantity: i32,
}

/// Body of `POST /orders` and `PUT /orders/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_name: String,
    /// Fixed layout `YYYY-MM-DDTHH:MM:SS±HH:MM`, e.g. "2006-01-02T15:04:05-07:00"
    #[serde(default)]
    pub ordered_at: String,
    #[serde(default)]
    pub items: Vec<ItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResultResponse {
    pub result: String,
}

impl OrderRequest {
    /// Validates the body and turns it into a view model for order `id`.
    pub fn into_view_model(self, id: i64) -> Result<OrderViewModel, AppError> {
        if self.customer_name.is_empty() {
            return Err(AppError::BadRequest("customerName is required".to_string()));
        }
        if self.ordered_at.trim().is_empty() {
            return Err(AppError::BadRequest("orderedAt is required".to_string()));
        }
        let ordered_at = timestamp::parse(&self.ordered_at).map_err(|e| {
            AppError::BadRequest(format!("orderedAt '{}' is invalid: {}", self.ordered_at, e))
        })?;

        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.into_view_model(i, id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderViewModel {
            id,
            customer_name: self.customer_name,
            ordered_at,
            created_at: None,
            updated_at: None,
            items,
        })
    }
}

impl ItemRequest {
    fn into_view_model(self, index: usize, order_id: i64) -> Result<ItemViewModel, AppError> {
        if self.name.is_empty() {
            return Err(AppError::BadRequest(format!("items[{}].name is required", index)));
        }
        if self.description.is_empty() {
            return Err(AppError::BadRequest(format!(
                "items[{}].description is required",
                index
            )));
        }
        if self.quantity <= 0 {
            return Err(AppError::BadRequest(format!(
                "items[{}].quantity must be greater than 0",
                index
            )));
        }

        Ok(ItemViewModel {
            id: 0,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            order_id,
            created_at: None,
            updated_at: None,
        })
    }
}

fn order_id(path: web::Path<i64>) -> Result<i64, AppError> {
    let id = path.into_inner();
    if id <= 0 {
        return Err(AppError::BadRequest(format!(
            "order id must be a positive integer, got {}",
            id
        )));
    }
    Ok(id)
}

fn success() -> HttpResponse {
    HttpResponse::Ok().json(ResultResponse {
        result: "Success".to_string(),
    })
}

// ── Routing ──────────────────────────────────────────────────────────────────

/// Registers the `/orders` routes. Malformed JSON bodies and non-numeric ids
/// are answered with 400 and the usual `{"error": ..}` body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order)),
    );
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order together with its items in a single transaction. At
/// least one item is required.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderViewModel),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.items.is_empty() {
        return Err(AppError::BadRequest(
            "items must contain at least one item".to_string(),
        ));
    }
    let order = body.into_view_model(0)?;

    let created = web::block(move || service.create_order(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(created))
}

/// GET /orders
///
/// Returns every order with its items.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderViewModel]),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.get_all_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(orders))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderViewModel),
        (status = 400, description = "Invalid order id", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = order_id(path)?;

    let order = web::block(move || service.get_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(order))
}

/// PUT /orders/{id}
///
/// Overwrites the order's own fields and reconciles the given items by
/// description: known descriptions are updated, new ones are added, and
/// items left out of the body are kept.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ResultResponse),
        (status = 400, description = "Invalid order id or body", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<OrderService>,
    path: web::Path<i64>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = order_id(path)?;
    let order = body.into_inner().into_view_model(id)?;

    web::block(move || service.update_order(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(success())
}

/// DELETE /orders/{id}
///
/// Removes the order; its items are removed with it.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order deleted", body = ResultResponse),
        (status = 400, description = "Invalid order id", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Persistence error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = order_id(path)?;

    web::block(move || service.delete_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(success())
}
