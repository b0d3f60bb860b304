//! # hostel-entity
//!
//! Domain entity models for the hostel platform. The only persisted
//! entity the auth core touches is the [`account::Account`]; role-specific
//! data lives in a tagged [`account::AccountProfile`] variant.

pub mod account;
