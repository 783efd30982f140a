use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Connection, ProjectRef, Team, User};

/// An issue. Only its project association is mutated through tri-state input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    /// Human identifier such as `ENG-42`.
    pub identifier: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub estimate: Option<f64>,
    #[serde(default)]
    pub state: Option<WorkflowState>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub labels: Connection<Label>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: String,
    pub name: String,
    /// `triage`, `backlog`, `unstarted`, `started`, `completed` or `canceled`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// Human label for an issue priority value.
pub fn priority_label(priority: i64) -> &'static str {
    match priority {
        0 => "None",
        1 => "Urgent",
        2 => "High",
        3 => "Normal",
        4 => "Low",
        _ => "Unknown",
    }
}

/// Input for creating an issue.
///
/// `project` is empty or a UUID. A new issue has nothing to clear, so
/// `unassigned` behaves like an empty value and the field is omitted.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    /// Team key or ID.
    pub team: String,
    pub description: Option<String>,
    pub priority: Option<i64>,
    /// `me`, an email, or a display name.
    pub assignee: Option<String>,
    pub project: String,
}

/// Input for updating an issue. `assignee` accepts `none`/`unassigned`.
#[derive(Debug, Clone, Default)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub assignee: Option<String>,
    pub project: String,
}

/// Filters for listing issues.
#[derive(Debug, Clone)]
pub struct IssueFilter {
    pub team: Option<String>,
    /// `me`, an email, a display name, or `unassigned`.
    pub assignee: Option<String>,
    /// Tri-state project reference: empty, `unassigned`, or a UUID.
    pub project: String,
    pub limit: u32,
}

impl Default for IssueFilter {
    fn default() -> Self {
        Self {
            team: None,
            assignee: None,
            project: String::new(),
            limit: 50,
        }
    }
}
