//! Admin session data

use serde::{Deserialize, Serialize};

/// Role of the signed-in admin
///
/// Only `superAdmin` may see destructive actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Other(String),
}

impl From<String> for AdminRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "superAdmin" => AdminRole::SuperAdmin,
            "admin" => AdminRole::Admin,
            _ => AdminRole::Other(value),
        }
    }
}

impl From<AdminRole> for String {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::SuperAdmin => "superAdmin".to_string(),
            AdminRole::Admin => "admin".to_string(),
            AdminRole::Other(value) => value,
        }
    }
}

/// The signed-in admin, as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub admin_name: String,
    pub admin_role: AdminRole,
}

impl Session {
    pub fn new(admin_name: impl Into<String>, admin_role: AdminRole) -> Self {
        Self {
            admin_name: admin_name.into(),
            admin_role,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.admin_role == AdminRole::SuperAdmin
    }
}
