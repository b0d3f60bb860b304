//! Account self-service and admin account management.

pub mod admin;
pub mod factory;
pub mod service;

pub use admin::AdminAccountService;
pub use factory::{AccountFactory, CreateAccountRequest};
pub use service::AccountService;
