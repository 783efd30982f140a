use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checkpoint inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub status: String,
    /// Completion ratio in `[0, 1]`.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
}

/// Minimal project reference embedded in other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// Input for creating a milestone.
#[derive(Debug, Clone, Default)]
pub struct NewMilestone {
    /// Project UUID.
    pub project: String,
    pub name: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`.
    pub target_date: Option<String>,
}

/// Input for updating a milestone. An empty target date clears it.
#[derive(Debug, Clone, Default)]
pub struct MilestoneChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_date: Option<String>,
}
