//! Input normalisation and validation.
//!
//! Everything here is pure: raw flag values go in, protocol-ready input
//! objects (or a [`ValidationError`]) come out. Operations build a draft with
//! these functions before resolving identifiers or touching the network, so
//! input that is provably invalid never costs a round trip.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::error::ValidationError;
use crate::models::*;

/// Sentinels that clear a project reference.
pub const PROJECT_SENTINELS: &[&str] = &["unassigned"];

/// Sentinels that clear a user reference (lead, assignee).
pub const USER_SENTINELS: &[&str] = &["none", "unassigned"];

/// Largest page the client requests.
pub const MAX_PAGE: u32 = 250;

/// An optional input field with three observable states.
///
/// `Unspecified` omits the key from the payload, `Cleared` sends an explicit
/// `null`, `Set` sends the value. The service treats an absent key as "no
/// change" and a `null` as "remove the relation", so the two must never be
/// conflated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Unspecified,
    Cleared,
    Set(T),
}

impl<T> Field<T> {
    /// Whether the field appears in the payload at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Into<Value>> Field<T> {
    /// Write the field into a protocol input object.
    pub fn write(self, input: &mut Map<String, Value>, key: &str) {
        match self {
            Self::Unspecified => {}
            Self::Cleared => {
                input.insert(key.to_string(), Value::Null);
            }
            Self::Set(v) => {
                input.insert(key.to_string(), v.into());
            }
        }
    }

    /// Like [`Field::write`], but a cleared field is omitted. Used on create,
    /// where there is nothing to clear.
    pub fn write_if_set(self, input: &mut Map<String, Value>, key: &str) {
        if let Self::Set(v) = self {
            input.insert(key.to_string(), v.into());
        }
    }
}

// ============================================================
// Primitive validators
// ============================================================

/// Case-insensitive 8-4-4-4-12 hyphenated hexadecimal UUID.
pub fn is_valid_uuid(s: &str) -> bool {
    // Uuid::try_parse also accepts simple, braced and URN forms; only the
    // 36-character hyphenated form is canonical here.
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}

/// Require a canonical ID.
pub fn validate_id<'a>(raw: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    if !is_valid_uuid(raw) {
        return Err(ValidationError::MalformedId {
            field,
            value: raw.to_string(),
        });
    }
    Ok(raw)
}

/// Validate a `YYYY-MM-DD` calendar date. Empty is always valid.
pub fn validate_date(raw: &str, field: &'static str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Ok(());
    }

    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-';
    if shaped && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return Ok(());
    }

    Err(ValidationError::MalformedDate {
        field,
        value: raw.to_string(),
    })
}

/// Match `raw` case-insensitively against `allowed` and return the allowed
/// spelling.
pub fn validate_enum(
    raw: &str,
    allowed: &[&'static str],
    field: &'static str,
) -> Result<&'static str, ValidationError> {
    let raw = raw.trim();
    allowed
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(raw))
        .ok_or_else(|| ValidationError::NotAllowed {
            field,
            value: raw.to_string(),
            allowed: allowed.join(", "),
        })
}

/// Priority is an integer in `[0, 4]`.
pub fn validate_priority(value: i64) -> Result<i64, ValidationError> {
    if (0..=4).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: "priority",
            value,
            min: 0,
            max: 4,
        })
    }
}

pub fn validate_limit(value: u32) -> Result<u32, ValidationError> {
    if (1..=MAX_PAGE).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: "limit",
            value: value as i64,
            min: 1,
            max: MAX_PAGE as i64,
        })
    }
}

pub fn parse_state(raw: &str) -> Result<ProjectState, ValidationError> {
    let canonical = validate_enum(raw, &ProjectState::ALL, "state")?;
    ProjectState::from_str(canonical).ok_or_else(|| ValidationError::NotAllowed {
        field: "state",
        value: raw.to_string(),
        allowed: ProjectState::ALL.join(", "),
    })
}

pub fn parse_health(raw: &str) -> Result<ProjectHealth, ValidationError> {
    let canonical = validate_enum(raw, &ProjectHealth::ALL, "health")?;
    ProjectHealth::from_str(canonical).ok_or_else(|| ValidationError::NotAllowed {
        field: "health",
        value: raw.to_string(),
        allowed: ProjectHealth::ALL.join(", "),
    })
}

fn required(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing { field })
    } else {
        Ok(trimmed.to_string())
    }
}

// ============================================================
// Tri-state references
// ============================================================

/// Classify a raw reference flag without validating its shape.
///
/// Empty means the flag was not given; a sentinel (case-insensitive) clears.
pub fn reference(raw: &str, sentinels: &[&str]) -> Field<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        Field::Unspecified
    } else if sentinels.iter().any(|s| s.eq_ignore_ascii_case(raw)) {
        Field::Cleared
    } else {
        Field::Set(raw.to_string())
    }
}

/// A reference whose set value must be a canonical ID.
pub fn id_reference(
    raw: &str,
    field: &'static str,
    sentinels: &[&str],
) -> Result<Field<String>, ValidationError> {
    match reference(raw, sentinels) {
        Field::Set(value) if !is_valid_uuid(&value) => {
            Err(ValidationError::MalformedId { field, value })
        }
        other => Ok(other),
    }
}

/// Project reference on issue inputs: empty omits, `unassigned` clears, a
/// UUID assigns, anything else is rejected.
pub fn build_project_reference(raw: &str) -> Result<Field<String>, ValidationError> {
    id_reference(raw, "projectId", PROJECT_SENTINELS)
}

/// User reference from an optional flag. A flag given with an empty value
/// clears, like the sentinels.
pub fn user_reference(raw: Option<&str>) -> Field<String> {
    match raw {
        None => Field::Unspecified,
        Some(v) if v.trim().is_empty() => Field::Cleared,
        Some(v) => reference(v, USER_SENTINELS),
    }
}

/// Date from an optional flag. A flag given with an empty value clears.
pub fn date_field(raw: Option<&str>, field: &'static str) -> Result<Field<String>, ValidationError> {
    match raw.map(str::trim) {
        None => Ok(Field::Unspecified),
        Some("") => Ok(Field::Cleared),
        Some(v) => {
            validate_date(v, field)?;
            Ok(Field::Set(v.to_string()))
        }
    }
}

// ============================================================
// Time expressions
// ============================================================

/// Resolve a `newer_than` expression to an RFC 3339 lower bound.
///
/// - empty or `all_time`: no bound
/// - `N_<unit>_ago` with unit day/week/month/year (plural allowed)
/// - `YYYY-MM-DD`: midnight UTC on that date
pub fn parse_time_expression(
    expr: &str,
    now: DateTime<Utc>,
) -> Result<Option<String>, ValidationError> {
    let expr = expr.trim();
    if expr.is_empty() || expr.eq_ignore_ascii_case("all_time") {
        return Ok(None);
    }

    let malformed = |reason: &str| ValidationError::Malformed {
        field: "newer_than",
        value: expr.to_string(),
        reason: reason.to_string(),
    };

    if validate_date(expr, "newer_than").is_ok() {
        let date = NaiveDate::parse_from_str(expr, "%Y-%m-%d")
            .map_err(|_| malformed("expected YYYY-MM-DD"))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| malformed("expected YYYY-MM-DD"))?
            .and_utc();
        return Ok(Some(midnight.to_rfc3339()));
    }

    let parts: Vec<&str> = expr.split('_').collect();
    let [amount, unit, "ago"] = parts.as_slice() else {
        return Err(malformed("expected all_time, N_<unit>_ago, or YYYY-MM-DD"));
    };
    let amount: u32 = amount
        .parse()
        .map_err(|_| malformed("amount must be a non-negative integer"))?;

    let bound = match *unit {
        "day" | "days" => Duration::try_days(amount as i64).and_then(|d| now.checked_sub_signed(d)),
        "week" | "weeks" => Duration::try_weeks(amount as i64).and_then(|d| now.checked_sub_signed(d)),
        "month" | "months" => now.checked_sub_months(Months::new(amount)),
        "year" | "years" => amount
            .checked_mul(12)
            .and_then(|m| now.checked_sub_months(Months::new(m))),
        _ => return Err(malformed("unit must be day, week, month or year")),
    };

    bound
        .map(|t| Some(t.to_rfc3339()))
        .ok_or_else(|| malformed("time span out of range"))
}

// ============================================================
// Projects
// ============================================================

/// Validated project listing, pending team resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectListDraft {
    pub filter: Map<String, Value>,
    pub order_by: Option<&'static str>,
    pub first: u32,
    pub team: Option<String>,
}

pub fn project_list_draft(
    filter: &ProjectFilter,
    now: DateTime<Utc>,
) -> Result<ProjectListDraft, ValidationError> {
    let mut out = Map::new();

    match filter.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(state) => {
            let state = parse_state(state)?;
            out.insert("state".into(), json!({ "eq": state.as_str() }));
        }
        None if !filter.include_completed => {
            out.insert(
                "state".into(),
                json!({ "nin": [ProjectState::Completed.as_str(), ProjectState::Canceled.as_str()] }),
            );
        }
        None => {}
    }

    if let Some(expr) = filter.newer_than.as_deref() {
        if let Some(bound) = parse_time_expression(expr, now)? {
            out.insert("createdAt".into(), json!({ "gte": bound }));
        }
    }

    let order_by = match filter.sort.as_deref().map(str::trim) {
        None | Some("") | Some("linear") => None,
        Some("created") | Some("createdAt") => Some("createdAt"),
        Some("updated") | Some("updatedAt") => Some("updatedAt"),
        Some(other) => {
            return Err(ValidationError::NotAllowed {
                field: "sort",
                value: other.to_string(),
                allowed: "linear, created, updated".to_string(),
            })
        }
    };

    Ok(ProjectListDraft {
        filter: out,
        order_by,
        first: validate_limit(filter.limit)?,
        team: filter
            .team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    })
}

/// Validated project input, pending team and lead resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub input: Map<String, Value>,
    pub teams: Vec<String>,
    pub lead: Field<String>,
}

pub fn project_create_draft(new: &NewProject) -> Result<ProjectDraft, ValidationError> {
    let mut input = Map::new();
    input.insert("name".into(), required(&new.name, "name")?.into());

    let teams: Vec<String> = new
        .teams
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if teams.is_empty() {
        return Err(ValidationError::Missing { field: "team" });
    }

    if let Some(description) = &new.description {
        input.insert("description".into(), description.clone().into());
    }
    if let Some(state) = &new.state {
        input.insert("state".into(), parse_state(state)?.as_str().into());
    }
    if let Some(priority) = new.priority {
        input.insert("priority".into(), validate_priority(priority)?.into());
    }
    date_field(new.start_date.as_deref(), "start_date")?.write_if_set(&mut input, "startDate");
    date_field(new.target_date.as_deref(), "target_date")?.write_if_set(&mut input, "targetDate");
    if let Some(color) = &new.color {
        input.insert("color".into(), color.clone().into());
    }

    let lead = match user_reference(new.lead.as_deref()) {
        Field::Cleared => Field::Unspecified,
        other => other,
    };

    Ok(ProjectDraft { input, teams, lead })
}

pub fn project_update_draft(changes: &ProjectChanges) -> Result<ProjectDraft, ValidationError> {
    let mut input = Map::new();

    if let Some(name) = &changes.name {
        input.insert("name".into(), required(name, "name")?.into());
    }
    if let Some(description) = &changes.description {
        input.insert("description".into(), description.clone().into());
    }
    if let Some(state) = &changes.state {
        input.insert("state".into(), parse_state(state)?.as_str().into());
    }
    if let Some(priority) = changes.priority {
        input.insert("priority".into(), validate_priority(priority)?.into());
    }
    date_field(changes.start_date.as_deref(), "start_date")?.write(&mut input, "startDate");
    date_field(changes.target_date.as_deref(), "target_date")?.write(&mut input, "targetDate");
    if let Some(color) = &changes.color {
        input.insert("color".into(), color.clone().into());
    }

    let lead = user_reference(changes.lead.as_deref());
    if input.is_empty() && !lead.is_present() {
        return Err(ValidationError::NothingToUpdate);
    }

    Ok(ProjectDraft {
        input,
        teams: Vec::new(),
        lead,
    })
}

pub fn project_update_post_input(
    project_id: &str,
    new: &NewProjectUpdate,
) -> Result<Map<String, Value>, ValidationError> {
    let mut input = Map::new();
    input.insert("projectId".into(), validate_id(project_id, "project_id")?.into());
    input.insert("body".into(), required(&new.body, "body")?.into());
    if let Some(health) = new.health.as_deref().filter(|h| !h.trim().is_empty()) {
        input.insert("health".into(), parse_health(health)?.as_str().into());
    }
    Ok(input)
}

// ============================================================
// Milestones
// ============================================================

pub fn milestone_create_input(new: &NewMilestone) -> Result<Map<String, Value>, ValidationError> {
    let mut input = Map::new();
    input.insert("projectId".into(), validate_id(&new.project, "project")?.into());
    input.insert("name".into(), required(&new.name, "name")?.into());
    if let Some(description) = new.description.as_deref().filter(|d| !d.is_empty()) {
        input.insert("description".into(), description.into());
    }
    date_field(new.target_date.as_deref(), "target_date")?.write_if_set(&mut input, "targetDate");
    Ok(input)
}

pub fn milestone_update_input(
    changes: &MilestoneChanges,
) -> Result<Map<String, Value>, ValidationError> {
    let mut input = Map::new();
    if let Some(name) = &changes.name {
        input.insert("name".into(), required(name, "name")?.into());
    }
    if let Some(description) = &changes.description {
        input.insert("description".into(), description.clone().into());
    }
    date_field(changes.target_date.as_deref(), "target_date")?.write(&mut input, "targetDate");

    if input.is_empty() {
        return Err(ValidationError::NothingToUpdate);
    }
    Ok(input)
}

// ============================================================
// Issues
// ============================================================

/// Issue IDs may be canonical UUIDs or human identifiers (`ENG-42`).
pub fn validate_issue_id(raw: &str) -> Result<&str, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { field: "issue" });
    }
    if is_valid_uuid(raw) || is_issue_identifier(raw) {
        return Ok(raw);
    }
    Err(ValidationError::MalformedId {
        field: "issue",
        value: raw.to_string(),
    })
}

fn is_issue_identifier(s: &str) -> bool {
    match s.split_once('-') {
        Some((key, number)) => {
            !key.is_empty()
                && key.chars().all(|c| c.is_ascii_alphanumeric())
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Validated issue input, pending team and assignee resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    pub input: Map<String, Value>,
    pub team: Option<String>,
    pub assignee: Field<String>,
}

pub fn issue_create_draft(new: &NewIssue) -> Result<IssueDraft, ValidationError> {
    let mut input = Map::new();
    input.insert("title".into(), required(&new.title, "title")?.into());
    let team = required(&new.team, "team")?;

    if let Some(description) = &new.description {
        input.insert("description".into(), description.clone().into());
    }
    if let Some(priority) = new.priority {
        input.insert("priority".into(), validate_priority(priority)?.into());
    }
    build_project_reference(&new.project)?.write_if_set(&mut input, "projectId");

    let assignee = match user_reference(new.assignee.as_deref()) {
        Field::Cleared => Field::Unspecified,
        other => other,
    };

    Ok(IssueDraft {
        input,
        team: Some(team),
        assignee,
    })
}

pub fn issue_update_draft(changes: &IssueChanges) -> Result<IssueDraft, ValidationError> {
    let mut input = Map::new();
    if let Some(title) = &changes.title {
        input.insert("title".into(), required(title, "title")?.into());
    }
    if let Some(description) = &changes.description {
        input.insert("description".into(), description.clone().into());
    }
    if let Some(priority) = changes.priority {
        input.insert("priority".into(), validate_priority(priority)?.into());
    }
    build_project_reference(&changes.project)?.write(&mut input, "projectId");

    let assignee = user_reference(changes.assignee.as_deref());
    if input.is_empty() && !assignee.is_present() {
        return Err(ValidationError::NothingToUpdate);
    }

    Ok(IssueDraft {
        input,
        team: None,
        assignee,
    })
}

/// Validated issue listing, pending team and assignee resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueListDraft {
    pub filter: Map<String, Value>,
    pub first: u32,
    pub team: Option<String>,
    pub assignee: Field<String>,
}

pub fn issue_list_draft(filter: &IssueFilter) -> Result<IssueListDraft, ValidationError> {
    let mut out = Map::new();
    match build_project_reference(&filter.project)? {
        Field::Unspecified => {}
        Field::Cleared => {
            out.insert("project".into(), json!({ "null": true }));
        }
        Field::Set(id) => {
            out.insert("project".into(), json!({ "id": { "eq": id } }));
        }
    }

    let assignee = match filter.assignee.as_deref() {
        Some(raw) => reference(raw, USER_SENTINELS),
        None => Field::Unspecified,
    };
    if assignee == Field::Cleared {
        out.insert("assignee".into(), json!({ "null": true }));
    }

    Ok(IssueListDraft {
        filter: out,
        first: validate_limit(filter.limit)?,
        team: filter
            .team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        assignee,
    })
}
