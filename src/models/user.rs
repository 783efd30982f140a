use serde::{Deserialize, Serialize};

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub admin: bool,
}

impl User {
    /// Whether `token` names this user exactly, by email, full name or display name.
    pub fn matches(&self, token: &str) -> bool {
        self.email == token || self.name == token || self.display_name == token
    }
}
