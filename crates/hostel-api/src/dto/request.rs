//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use hostel_entity::account::{AccountFilter, AccountStatus, ProfileUpdate, Role};
use hostel_service::CreateAccountRequest;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Extend the session to the "remember me" lifetime.
    #[serde(default)]
    pub remember_me: bool,
}

/// Account creation body, used by self-registration and admin creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountBody {
    /// Email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Role of the new account.
    pub role: Role,
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Phone (students and owners).
    #[serde(default)]
    pub phone: Option<String>,
    /// University (students).
    #[serde(default)]
    pub university: Option<String>,
    /// Student number (students).
    #[serde(default)]
    pub student_number: Option<String>,
    /// Business name (owners).
    #[serde(default)]
    pub business_name: Option<String>,
}

impl From<CreateAccountBody> for CreateAccountRequest {
    fn from(body: CreateAccountBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            role: body.role,
            full_name: body.full_name,
            details: ProfileUpdate {
                full_name: None,
                phone: body.phone,
                university: body.university,
                student_number: body.student_number,
                business_name: body.business_name,
            },
        }
    }
}

/// Profile edit body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// University.
    pub university: Option<String>,
    /// Student number.
    pub student_number: Option<String>,
    /// Business name.
    pub business_name: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            full_name: req.full_name,
            phone: req.phone,
            university: req.university,
            student_number: req.student_number,
            business_name: req.business_name,
        }
    }
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Admin status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// `active` or `inactive`.
    pub status: AccountStatus,
}

/// Query parameters for the admin account listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAccountsQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
    /// Only this role.
    pub role: Option<Role>,
    /// Only this status.
    pub status: Option<AccountStatus>,
}

impl ListAccountsQuery {
    /// The store filter.
    pub fn filter(&self) -> AccountFilter {
        AccountFilter {
            role: self.role,
            status: self.status,
        }
    }
}

/// Query parameters for account deletion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeleteAccountQuery {
    /// Remove the row instead of marking it deleted.
    #[serde(default)]
    pub hard: bool,
}
