//! Error taxonomy and classification of remote failures.
//!
//! The service does not emit typed error codes, so remote failures are
//! classified by matching lowercase phrase fragments against the message
//! text. The tables below are checked in order; the first rule whose
//! fragments all occur in the message wins.

use std::fmt;

use thiserror::Error;

use super::transport::TransportError;

/// Entity types the classifier can attribute a not-found failure to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Team,
    User,
    Project,
    Milestone,
    ProjectUpdate,
    Issue,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::User => "user",
            Self::Project => "project",
            Self::Milestone => "milestone",
            Self::ProjectUpdate => "project update",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified kind of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound(Entity),
    AuthFailure,
    Validation,
    Unclassified,
}

/// `(entity, alternatives)`: any alternative whose fragments are all present
/// matches. More specific entities come first so that "project milestone not
/// found" is not read as a project failure.
///
/// Single-phrase alternatives of every entity are tried before any
/// multi-fragment one, so "issue not found: projectId abc" names the issue.
const NOT_FOUND_RULES: &[(Entity, &[&[&str]])] = &[
    (
        Entity::Milestone,
        &[
            &["milestone not found"],
            &["projectmilestoneid", "not found"],
            &["milestoneid", "not found"],
            &["entity not found: projectmilestone"],
        ],
    ),
    (
        Entity::ProjectUpdate,
        &[
            &["project update not found"],
            &["projectupdateid", "not found"],
            &["entity not found: projectupdate"],
        ],
    ),
    (
        Entity::Project,
        &[
            &["project not found"],
            &["projectid", "not found"],
            &["entity not found: project"],
        ],
    ),
    (
        Entity::Issue,
        &[
            &["issue not found"],
            &["issueid", "not found"],
            &["entity not found: issue"],
        ],
    ),
    (
        Entity::Team,
        &[
            &["team not found"],
            &["teamid", "not found"],
            &["entity not found: team"],
        ],
    ),
    (
        Entity::User,
        &[
            &["user not found"],
            &["userid", "not found"],
            &["leadid", "not found"],
            &["assigneeid", "not found"],
            &["entity not found: user"],
        ],
    ),
];

const AUTH_RULES: &[&[&str]] = &[
    &["authentication required"],
    &["authentication failed"],
    &["not authenticated"],
    &["invalid api key"],
    &["api key", "expired"],
    &["unauthorized"],
    &["forbidden"],
];

const VALIDATION_RULES: &[&[&str]] = &[
    &["argument validation error"],
    &["validation error"],
    &["invalid input"],
];

fn matches_any(haystack: &str, alternatives: &[&[&str]]) -> bool {
    alternatives
        .iter()
        .any(|fragments| fragments.iter().all(|f| haystack.contains(f)))
}

/// Classify a remote error message.
pub fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();

    for exact in [true, false] {
        for (entity, alternatives) in NOT_FOUND_RULES {
            let mut pass = alternatives.iter().filter(|f| (f.len() == 1) == exact);
            if pass.any(|fragments| fragments.iter().all(|f| lower.contains(f))) {
                return ErrorKind::NotFound(*entity);
            }
        }
    }
    if matches_any(&lower, AUTH_RULES) {
        return ErrorKind::AuthFailure;
    }
    if matches_any(&lower, VALIDATION_RULES) {
        return ErrorKind::Validation;
    }
    ErrorKind::Unclassified
}

/// Classify a transport failure.
///
/// Network, timeout and decoding failures are never classified and yield
/// `None`; they surface as [`ClientError::Transport`].
pub fn classify(err: &TransportError) -> Option<ErrorKind> {
    match err {
        TransportError::Status { status: 401 | 403, .. } => Some(ErrorKind::AuthFailure),
        TransportError::Status { .. } | TransportError::GraphQl(_) => {
            Some(classify_message(&err.to_string()))
        }
        TransportError::Http(_) | TransportError::Timeout | TransportError::Decode(_) => None,
    }
}

/// Local input failures, raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("invalid {field} '{value}': expected a UUID")]
    MalformedId { field: &'static str, value: String },

    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    MalformedDate { field: &'static str, value: String },

    #[error("invalid {field} '{value}'. Valid values: {allowed}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid {field} '{value}': {reason}")]
    Malformed {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("no updates specified")]
    NothingToUpdate,
}

/// Errors returned by client operations.
///
/// Remote failures keep the service's original message next to the
/// classified kind.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(TransportError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {message}")]
    NotFound { entity: Entity, message: String },

    #[error("authentication failed: {0}")]
    Unauthorized(String),

    #[error("rejected by server: {0}")]
    Rejected(String),

    #[error("{0}")]
    Remote(String),
}

impl ClientError {
    /// Classified kind; `None` for transport failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Transport(_) => None,
            Self::Validation(_) | Self::Rejected(_) => Some(ErrorKind::Validation),
            Self::NotFound { entity, .. } => Some(ErrorKind::NotFound(*entity)),
            Self::Unauthorized(_) => Some(ErrorKind::AuthFailure),
            Self::Remote(_) => Some(ErrorKind::Unclassified),
        }
    }

    pub fn is_not_found(&self, entity: Entity) -> bool {
        self.kind() == Some(ErrorKind::NotFound(entity))
    }

    pub(crate) fn not_found(entity: Entity, message: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            message: message.into(),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        let Some(kind) = classify(&err) else {
            return Self::Transport(err);
        };

        let message = err.to_string();
        tracing::warn!(?kind, %message, "remote error");
        match kind {
            ErrorKind::NotFound(entity) => Self::NotFound { entity, message },
            ErrorKind::AuthFailure => Self::Unauthorized(message),
            ErrorKind::Validation => Self::Rejected(message),
            ErrorKind::Unclassified => Self::Remote(message),
        }
    }
}
