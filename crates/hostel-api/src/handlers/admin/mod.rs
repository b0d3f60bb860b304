//! Admin handlers.

pub mod accounts;
