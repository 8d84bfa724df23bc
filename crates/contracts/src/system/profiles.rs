use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "rep")]
    Rep,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Rep => "rep",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "rep" => Some(UserRole::Rep),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileDto {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    pub profile_id: String,
    pub old_password: Option<String>, // None if admin changing someone else's password
    pub new_password: String,
}

/// Per-rep activity counts for the admin rep list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepStats {
    pub profile: Profile,
    pub client_count: i64,
    pub call_count: i64,
    pub order_count: i64,
}
