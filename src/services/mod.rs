pub mod account_service;
pub mod authorization;
pub mod catalog_service;
pub mod consistency;
pub mod documents;
pub mod listing_service;
pub mod order_service;
pub mod report_service;
pub mod role_service;
pub mod token_service;

pub use token_service::{Claims, TokenKeys};
