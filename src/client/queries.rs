//! GraphQL operation documents.
//!
//! Every document is a fixed string; callers supply only variables. The
//! operation name (`query Team(`) is what the transport logs and what test
//! doubles dispatch on.

macro_rules! team_fields {
    () => {
        "id key name description"
    };
}

macro_rules! user_fields {
    () => {
        "id name email displayName active admin"
    };
}

macro_rules! project_fields {
    () => {
        concat!(
            "id name description state priority progress color url ",
            "startDate targetDate createdAt updatedAt archivedAt completedAt canceledAt ",
            "lead { ",
            user_fields!(),
            " } teams { nodes { ",
            team_fields!(),
            " } }"
        )
    };
}

macro_rules! milestone_fields {
    () => {
        "id name description targetDate status progress createdAt updatedAt archivedAt project { id name }"
    };
}

macro_rules! project_update_fields {
    () => {
        concat!(
            "id body health createdAt updatedAt editedAt user { ",
            user_fields!(),
            " }"
        )
    };
}

macro_rules! issue_fields {
    () => {
        concat!(
            "id identifier title description priority estimate url createdAt updatedAt ",
            "state { id name type } assignee { ",
            user_fields!(),
            " } team { ",
            team_fields!(),
            " } project { id name } labels { nodes { id name } }"
        )
    };
}

// ============================================================
// Teams and users
// ============================================================

pub const TEAMS: &str = concat!(
    "query Teams($first: Int) { teams(first: $first) { nodes { ",
    team_fields!(),
    " } } }"
);

pub const TEAM_BY_KEY: &str = concat!(
    "query TeamByKey($key: String!) { teams(filter: { key: { eq: $key } }) { nodes { ",
    team_fields!(),
    " } } }"
);

pub const TEAM: &str = concat!(
    "query Team($id: String!) { team(id: $id) { ",
    team_fields!(),
    " } }"
);

pub const VIEWER: &str = concat!("query Viewer { viewer { ", user_fields!(), " } }");

pub const USERS: &str = concat!(
    "query Users($first: Int) { users(first: $first) { nodes { ",
    user_fields!(),
    " } } }"
);

// ============================================================
// Projects
// ============================================================

pub const PROJECTS: &str = concat!(
    "query Projects($first: Int, $filter: ProjectFilter, $orderBy: PaginationOrderBy) { ",
    "projects(first: $first, filter: $filter, orderBy: $orderBy) { nodes { ",
    project_fields!(),
    " } } }"
);

pub const PROJECT: &str = concat!(
    "query Project($id: String!) { project(id: $id) { ",
    project_fields!(),
    " } }"
);

pub const CREATE_PROJECT: &str = concat!(
    "mutation CreateProject($input: ProjectCreateInput!) { projectCreate(input: $input) { success project { ",
    project_fields!(),
    " } } }"
);

pub const UPDATE_PROJECT: &str = concat!(
    "mutation UpdateProject($id: String!, $input: ProjectUpdateInput!) { projectUpdate(id: $id, input: $input) { success project { ",
    project_fields!(),
    " } } }"
);

pub const ARCHIVE_PROJECT: &str =
    "mutation ArchiveProject($id: String!) { projectArchive(id: $id) { success } }";

pub const DELETE_PROJECT: &str =
    "mutation DeleteProject($id: String!) { projectDelete(id: $id) { success } }";

// ============================================================
// Project update posts
// ============================================================

pub const PROJECT_UPDATES: &str = concat!(
    "query ProjectUpdates($projectId: String!, $first: Int) { project(id: $projectId) { projectUpdates(first: $first) { nodes { ",
    project_update_fields!(),
    " } } } }"
);

pub const PROJECT_UPDATE: &str = concat!(
    "query ProjectUpdate($id: String!) { projectUpdate(id: $id) { ",
    project_update_fields!(),
    " } }"
);

pub const CREATE_PROJECT_UPDATE: &str = concat!(
    "mutation CreateProjectUpdate($input: ProjectUpdateCreateInput!) { projectUpdateCreate(input: $input) { success projectUpdate { ",
    project_update_fields!(),
    " } } }"
);

// ============================================================
// Milestones
// ============================================================

pub const MILESTONES: &str = concat!(
    "query ProjectMilestones($projectId: String!, $includeArchived: Boolean) { project(id: $projectId) { ",
    "projectMilestones(includeArchived: $includeArchived) { nodes { ",
    milestone_fields!(),
    " } } } }"
);

pub const MILESTONE: &str = concat!(
    "query ProjectMilestone($id: String!) { projectMilestone(id: $id) { ",
    milestone_fields!(),
    " } }"
);

pub const CREATE_MILESTONE: &str = concat!(
    "mutation CreateProjectMilestone($input: ProjectMilestoneCreateInput!) { projectMilestoneCreate(input: $input) { success projectMilestone { ",
    milestone_fields!(),
    " } } }"
);

pub const UPDATE_MILESTONE: &str = concat!(
    "mutation UpdateProjectMilestone($id: String!, $input: ProjectMilestoneUpdateInput!) { projectMilestoneUpdate(id: $id, input: $input) { success projectMilestone { ",
    milestone_fields!(),
    " } } }"
);

pub const DELETE_MILESTONE: &str =
    "mutation DeleteProjectMilestone($id: String!) { projectMilestoneDelete(id: $id) { success } }";

// ============================================================
// Issues
// ============================================================

pub const ISSUES: &str = concat!(
    "query Issues($first: Int, $filter: IssueFilter) { issues(first: $first, filter: $filter) { nodes { ",
    issue_fields!(),
    " } } }"
);

pub const ISSUE: &str = concat!(
    "query Issue($id: String!) { issue(id: $id) { ",
    issue_fields!(),
    " } }"
);

pub const CREATE_ISSUE: &str = concat!(
    "mutation CreateIssue($input: IssueCreateInput!) { issueCreate(input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const UPDATE_ISSUE: &str = concat!(
    "mutation UpdateIssue($id: String!, $input: IssueUpdateInput!) { issueUpdate(id: $id, input: $input) { success issue { ",
    issue_fields!(),
    " } } }"
);

pub const ARCHIVE_ISSUE: &str =
    "mutation ArchiveIssue($id: String!) { issueArchive(id: $id) { success } }";
