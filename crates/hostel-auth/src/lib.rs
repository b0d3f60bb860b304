//! # hostel-auth
//!
//! Authentication and access control for the hostel platform.
//!
//! ## Modules
//!
//! - `password` - Argon2id hashing and the new-password policy
//! - `jwt` - token claims, issuance, and verification
//! - `credential` - email/password verification against the account store
//! - `gate` - the route table and per-request access decisions
//! - `session` - login orchestration

pub mod credential;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

pub use credential::CredentialVerifier;
pub use gate::{DenyReason, GateDecision, RouteGate, RouteTable};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginOutcome, SessionManager};
