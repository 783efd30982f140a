//! Domain models for the Linear workspace as seen by linctl.
//!
//! # Core Concepts
//!
//! ## Snapshots
//!
//! Every entity returned by the client is an immutable snapshot decoded from
//! the service response. Nothing is cached between calls; updates return a
//! fresh snapshot.
//!
//! - [`Team`]: Workspace team, addressed by a short key (`ENG`) or its UUID.
//! - [`User`]: Workspace member, addressed by `me`, email, or display name.
//! - [`Project`]: Cross-team initiative with a lifecycle [`ProjectState`].
//! - [`Milestone`]: Checkpoint inside a project.
//! - [`Issue`]: Unit of work; its project association is tri-state on input.
//! - [`ProjectUpdate`]: Status post attached to a project.
//!
//! ## Inputs
//!
//! `New*`/`*Changes`/`*Filter` structs carry raw flag values as the user typed
//! them. The client validates and normalises them before any request is sent.

mod issue;
mod milestone;
mod project;
mod project_update;
mod team;
mod user;

pub use issue::*;
pub use milestone::*;
pub use project::*;
pub use project_update::*;
pub use team::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// A page of nodes as returned by connection fields (`teams { nodes }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
