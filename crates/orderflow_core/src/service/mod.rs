//! Pipeline use-case services.

pub mod order_service;

pub use order_service::OrderPipeline;
