//! Account domain entities.

pub mod model;
pub mod profile;
pub mod role;
pub mod status;

pub use model::{Account, AccountFilter, AccountRow, NewAccount};
pub use profile::{AccountProfile, AdminProfile, OwnerProfile, ProfileUpdate, StudentProfile};
pub use role::Role;
pub use status::AccountStatus;
