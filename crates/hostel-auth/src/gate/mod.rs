//! Path-based access control.

pub mod decision;
pub mod route_gate;
pub mod table;

pub use decision::{DenyReason, GateDecision};
pub use route_gate::RouteGate;
pub use table::RouteTable;
