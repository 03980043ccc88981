use super::errors::DomainError;
use super::order::Order;

pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the order and all of its items as one unit.
    fn create(&self, order: Order) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Order, DomainError>;
    fn find_all(&self) -> Result<Vec<Order>, DomainError>;
    /// Overwrites the order's own fields and reconciles its items by
    /// description. Items missing from `order.items` are left untouched.
    fn update(&self, order: Order) -> Result<(), DomainError>;
    fn delete(&self, id: i64) -> Result<(), DomainError>;
}
