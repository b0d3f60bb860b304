//! Core type definitions used across the hostel workspace.

pub mod id;
pub mod pagination;

pub use id::AccountId;
pub use pagination::{PageRequest, PageResponse};
