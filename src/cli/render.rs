//! Plaintext rendering for command output.

use crate::models::*;

const PLANNED: char = '◇';
const STARTED: char = '○';
const PAUSED: char = '‖';
const COMPLETED: char = '●';
const CANCELED: char = '✗';
const OTHER: char = '•';

/// Status symbol for a project state as reported by the service.
fn state_symbol(state: &str) -> char {
    match ProjectState::from_str(state) {
        Some(ProjectState::Planned) => PLANNED,
        Some(ProjectState::Started) => STARTED,
        Some(ProjectState::Paused) => PAUSED,
        Some(ProjectState::Completed) => COMPLETED,
        Some(ProjectState::Canceled) => CANCELED,
        None => OTHER,
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// One line per project:
///
/// ```text
/// ○ Alpha  [ENG]  started  target 2024-12-31
/// ```
pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found\n".to_string();
    }
    let mut out = String::new();
    for p in projects {
        out.push_str(&format!(
            "{} {}  [{}]  {}  target {}\n",
            state_symbol(&p.state),
            p.name,
            p.team_keys(),
            p.state,
            or_dash(p.target_date.as_deref()),
        ));
    }
    out
}

pub fn project_detail(p: &Project) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", state_symbol(&p.state), p.name));
    out.push_str(&format!("  ID:       {}\n", p.id));
    out.push_str(&format!("  State:    {}\n", p.state));
    out.push_str(&format!("  Priority: {}\n", priority_label(p.priority)));
    out.push_str(&format!("  Progress: {:.0}%\n", p.progress * 100.0));
    out.push_str(&format!("  Teams:    {}\n", or_dash(Some(p.team_keys().as_str()))));
    out.push_str(&format!(
        "  Lead:     {}\n",
        or_dash(p.lead.as_ref().map(|u| u.name.as_str()))
    ));
    out.push_str(&format!("  Start:    {}\n", or_dash(p.start_date.as_deref())));
    out.push_str(&format!("  Target:   {}\n", or_dash(p.target_date.as_deref())));
    if let Some(archived) = p.archived_at {
        out.push_str(&format!("  Archived: {}\n", archived.format("%Y-%m-%d")));
    }
    let url = p.url();
    if !url.is_empty() {
        out.push_str(&format!("  URL:      {}\n", url));
    }
    if !p.description.is_empty() {
        out.push_str(&format!("\n{}\n", p.description));
    }
    out
}

pub fn milestone_list(milestones: &[Milestone]) -> String {
    if milestones.is_empty() {
        return "No milestones found\n".to_string();
    }
    let mut out = String::new();
    for m in milestones {
        out.push_str(&format!(
            "{}  {}  {:.0}%  target {}\n",
            m.id,
            m.name,
            m.progress * 100.0,
            or_dash(m.target_date.as_deref()),
        ));
    }
    out
}

pub fn milestone_detail(m: &Milestone) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", m.name));
    out.push_str(&format!("  ID:       {}\n", m.id));
    out.push_str(&format!(
        "  Project:  {}\n",
        or_dash(m.project.as_ref().map(|p| p.name.as_str()))
    ));
    out.push_str(&format!("  Status:   {}\n", or_dash(Some(m.status.as_str()))));
    out.push_str(&format!("  Progress: {:.0}%\n", m.progress * 100.0));
    out.push_str(&format!("  Target:   {}\n", or_dash(m.target_date.as_deref())));
    if !m.description.is_empty() {
        out.push_str(&format!("\n{}\n", m.description));
    }
    out
}

pub fn issue_list(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "No issues found\n".to_string();
    }
    let mut out = String::new();
    for i in issues {
        out.push_str(&format!(
            "{:<10} {:<8} {:<12} {}\n",
            i.identifier,
            priority_label(i.priority),
            or_dash(i.state.as_ref().map(|s| s.name.as_str())),
            i.title,
        ));
    }
    out
}

pub fn issue_detail(i: &Issue) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", i.identifier, i.title));
    out.push_str(&format!("  ID:       {}\n", i.id));
    out.push_str(&format!(
        "  State:    {}\n",
        or_dash(i.state.as_ref().map(|s| s.name.as_str()))
    ));
    out.push_str(&format!("  Priority: {}\n", priority_label(i.priority)));
    out.push_str(&format!(
        "  Assignee: {}\n",
        or_dash(i.assignee.as_ref().map(|u| u.name.as_str()))
    ));
    out.push_str(&format!(
        "  Project:  {}\n",
        or_dash(i.project.as_ref().map(|p| p.name.as_str()))
    ));
    if !i.labels.is_empty() {
        let labels: Vec<&str> = i.labels.nodes.iter().map(|l| l.name.as_str()).collect();
        out.push_str(&format!("  Labels:   {}\n", labels.join(", ")));
    }
    if !i.url.is_empty() {
        out.push_str(&format!("  URL:      {}\n", i.url));
    }
    if let Some(description) = i.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n{}\n", description));
    }
    out
}

pub fn project_update_list(updates: &[ProjectUpdate]) -> String {
    if updates.is_empty() {
        return "No project updates found\n".to_string();
    }
    let mut out = String::new();
    for u in updates {
        out.push_str(&project_update_detail(u));
        out.push('\n');
    }
    out
}

pub fn project_update_detail(u: &ProjectUpdate) -> String {
    let mut out = String::new();
    let when = u
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "{}  {}  {}  {}\n",
        u.id,
        when,
        or_dash(u.health.as_deref()),
        or_dash(u.user.as_ref().map(|x| x.name.as_str())),
    ));
    for line in u.body.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out
}

pub fn team_list(teams: &[Team]) -> String {
    let mut out = String::new();
    for t in teams {
        out.push_str(&format!("{:<8} {}  ({})\n", t.key, t.name, t.id));
    }
    out
}

pub fn user_list(users: &[User]) -> String {
    let mut out = String::new();
    for u in users {
        out.push_str(&format!("{:<24} {:<32} {}\n", u.name, u.email, u.id));
    }
    out
}
