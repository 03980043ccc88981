use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::OrderRepository;

use super::view_model::OrderViewModel;

/// Maps view models to entities and back; every call goes straight to the
/// repository and its errors come back unchanged.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn create_order(&self, order: OrderViewModel) -> Result<OrderViewModel, DomainError> {
        self.repo
            .create(order.into_entity())
            .map(OrderViewModel::from)
    }

    pub fn get_order(&self, id: i64) -> Result<OrderViewModel, DomainError> {
        self.repo.find_by_id(id).map(OrderViewModel::from)
    }

    pub fn get_all_orders(&self) -> Result<Vec<OrderViewModel>, DomainError> {
        let orders = self.repo.find_all()?;
        Ok(orders.into_iter().map(OrderViewModel::from).collect())
    }

    pub fn update_order(&self, order: OrderViewModel) -> Result<(), DomainError> {
        self.repo.update(order.into_entity())
    }

    pub fn delete_order(&self, id: i64) -> Result<(), DomainError> {
        self.repo.delete(id)
    }
}
