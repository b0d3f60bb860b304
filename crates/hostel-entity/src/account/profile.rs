//! Role-specific profile payloads.
//!
//! The role of an account is the tag of its profile: there is no way to
//! build a student account carrying owner fields.

use serde::{Deserialize, Serialize};

use hostel_core::error::AppError;

use super::role::Role;

/// Profile of a student account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Full name.
    pub full_name: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// University or college.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// Student registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
}

/// Profile of a hostel owner account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    /// Full name.
    pub full_name: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Trading name of the business.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

/// Profile of an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Full name.
    pub full_name: String,
}

/// Role-tagged profile payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "profile", rename_all = "kebab-case")]
pub enum AccountProfile {
    /// A student.
    Student(StudentProfile),
    /// A hostel owner.
    HostelOwner(OwnerProfile),
    /// An administrator.
    Admin(AdminProfile),
}

/// Partial profile edit. Fields that do not exist on the account's role
/// are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// New phone (students and owners).
    #[serde(default)]
    pub phone: Option<String>,
    /// New university (students).
    #[serde(default)]
    pub university: Option<String>,
    /// New student number (students).
    #[serde(default)]
    pub student_number: Option<String>,
    /// New business name (owners).
    #[serde(default)]
    pub business_name: Option<String>,
}

impl AccountProfile {
    /// A profile of the given role with only the name filled in.
    pub fn new(role: Role, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        match role {
            Role::Student => Self::Student(StudentProfile {
                full_name,
                phone: None,
                university: None,
                student_number: None,
            }),
            Role::HostelOwner => Self::HostelOwner(OwnerProfile {
                full_name,
                phone: None,
                business_name: None,
            }),
            Role::Admin => Self::Admin(AdminProfile { full_name }),
        }
    }

    /// The role this profile belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::HostelOwner(_) => Role::HostelOwner,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Display name shared by every role.
    pub fn full_name(&self) -> &str {
        match self {
            Self::Student(p) => &p.full_name,
            Self::HostelOwner(p) => &p.full_name,
            Self::Admin(p) => &p.full_name,
        }
    }

    /// Rebuild a profile from its persisted parts.
    pub fn from_parts(role: Role, payload: serde_json::Value) -> Result<Self, AppError> {
        let profile = match role {
            Role::Student => Self::Student(serde_json::from_value(payload)?),
            Role::HostelOwner => Self::HostelOwner(serde_json::from_value(payload)?),
            Role::Admin => Self::Admin(serde_json::from_value(payload)?),
        };
        Ok(profile)
    }

    /// The role-specific payload as JSON, without the role tag.
    pub fn payload(&self) -> Result<serde_json::Value, AppError> {
        let value = match self {
            Self::Student(p) => serde_json::to_value(p)?,
            Self::HostelOwner(p) => serde_json::to_value(p)?,
            Self::Admin(p) => serde_json::to_value(p)?,
        };
        Ok(value)
    }

    /// Apply a partial edit, validating it against the role.
    pub fn apply(&mut self, update: ProfileUpdate) -> Result<(), AppError> {
        if let Some(name) = update.full_name.as_deref() {
            if name.trim().is_empty() {
                return Err(AppError::validation("Full name cannot be empty"));
            }
        }

        match self {
            Self::Student(p) => {
                if update.business_name.is_some() {
                    return Err(not_applicable("business_name", Role::Student));
                }
                if let Some(name) = update.full_name {
                    p.full_name = name.trim().to_string();
                }
                if update.phone.is_some() {
                    p.phone = update.phone;
                }
                if update.university.is_some() {
                    p.university = update.university;
                }
                if update.student_number.is_some() {
                    p.student_number = update.student_number;
                }
            }
            Self::HostelOwner(p) => {
                if update.university.is_some() {
                    return Err(not_applicable("university", Role::HostelOwner));
                }
                if update.student_number.is_some() {
                    return Err(not_applicable("student_number", Role::HostelOwner));
                }
                if let Some(name) = update.full_name {
                    p.full_name = name.trim().to_string();
                }
                if update.phone.is_some() {
                    p.phone = update.phone;
                }
                if update.business_name.is_some() {
                    p.business_name = update.business_name;
                }
            }
            Self::Admin(p) => {
                for (field, present) in [
                    ("phone", update.phone.is_some()),
                    ("university", update.university.is_some()),
                    ("student_number", update.student_number.is_some()),
                    ("business_name", update.business_name.is_some()),
                ] {
                    if present {
                        return Err(not_applicable(field, Role::Admin));
                    }
                }
                if let Some(name) = update.full_name {
                    p.full_name = name.trim().to_string();
                }
            }
        }
        Ok(())
    }
}

fn not_applicable(field: &str, role: Role) -> AppError {
    AppError::validation(format!("Field '{field}' does not apply to {role} accounts"))
}
