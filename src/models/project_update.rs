use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A status post on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

/// Project health reported on an update post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectHealth {
    OnTrack,
    AtRisk,
    OffTrack,
}

impl ProjectHealth {
    pub const ALL: [&'static str; 3] = ["onTrack", "atRisk", "offTrack"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "onTrack",
            Self::AtRisk => "atRisk",
            Self::OffTrack => "offTrack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "onTrack" => Some(Self::OnTrack),
            "atRisk" => Some(Self::AtRisk),
            "offTrack" => Some(Self::OffTrack),
            _ => None,
        }
    }
}

/// Input for posting a project update.
#[derive(Debug, Clone, Default)]
pub struct NewProjectUpdate {
    pub body: String,
    pub health: Option<String>,
}
