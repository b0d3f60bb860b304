//! Integration tests for the hostel platform HTTP surface.

mod helpers;

mod admin_test;
mod auth_test;
mod gate_test;
mod startup_test;
