use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Connection, Team, User};

/// A project spanning one or more teams.
///
/// `state` is kept as the raw wire string: the service may report states this
/// client does not submit itself (e.g. `backlog`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub lead: Option<User>,
    #[serde(default)]
    pub teams: Connection<Team>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Project {
    /// ID-based link to the project.
    ///
    /// The service returns slug URLs (`https://linear.app/acme/project/some-slug`)
    /// which break when the project is renamed. The workspace segment is kept
    /// and the slug replaced by the project ID.
    pub fn url(&self) -> String {
        id_url(&self.id, &self.url)
    }

    /// Comma-separated team keys, in the order the service returned them.
    pub fn team_keys(&self) -> String {
        self.teams
            .nodes
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Rewrite a project slug URL into an ID-based one.
///
/// Empty input yields empty output; anything too short to carry a workspace
/// segment is returned unchanged.
pub fn id_url(project_id: &str, original: &str) -> String {
    if original.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = original.split('/').collect();
    if parts.len() >= 5 {
        return format!("{}//{}/{}/project/{}", parts[0], parts[2], parts[3], project_id);
    }

    original.to_string()
}

/// The lifecycle state of a project, as accepted on input.
///
/// - `Planned`: Scheduled but not started
/// - `Started`: Work in progress
/// - `Paused`: Temporarily on hold
/// - `Completed`: Delivered
/// - `Canceled`: Abandoned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectState {
    Planned,
    Started,
    Paused,
    Completed,
    Canceled,
}

impl ProjectState {
    pub const ALL: [&'static str; 5] = ["planned", "started", "paused", "completed", "canceled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(Self::Planned),
            "started" => Some(Self::Started),
            "paused" => Some(Self::Paused),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// Input for creating a project. Values are raw flag text.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    /// Team keys or IDs; at least one is required.
    pub teams: Vec<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub priority: Option<i64>,
    /// `me`, an email, or a display name.
    pub lead: Option<String>,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    pub color: Option<String>,
}

/// Input for updating a project. `None` leaves a field untouched.
///
/// `lead` accepts `none`/`unassigned` to clear it; an empty date clears the date.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub priority: Option<i64>,
    pub lead: Option<String>,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    pub color: Option<String>,
}

/// Filters for listing projects.
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    /// Team key or ID.
    pub team: Option<String>,
    pub state: Option<String>,
    /// Include completed and canceled projects when no state is given.
    pub include_completed: bool,
    /// `all_time`, `N_<unit>_ago`, or `YYYY-MM-DD`.
    pub newer_than: Option<String>,
    /// `linear`, `created`, or `updated`.
    pub sort: Option<String>,
    pub limit: u32,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            team: None,
            state: None,
            include_completed: false,
            newer_than: None,
            sort: None,
            limit: 50,
        }
    }
}
