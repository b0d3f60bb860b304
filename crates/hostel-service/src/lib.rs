//! # hostel-service
//!
//! Business logic for account self-service and administration. Services
//! take their dependencies at construction time as `Arc` handles and act
//! on behalf of a [`RequestContext`].

pub mod account;
pub mod context;

pub use account::{AccountFactory, AccountService, AdminAccountService, CreateAccountRequest};
pub use context::RequestContext;
