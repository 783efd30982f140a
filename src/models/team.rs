use serde::{Deserialize, Serialize};

/// A workspace team.
///
/// `key` is a short human mnemonic (`ENG`) unique within the workspace. It is
/// never a canonical ID, even when it happens to look like one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
