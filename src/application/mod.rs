pub mod order_service;
pub mod view_model;
