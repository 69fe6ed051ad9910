//! Job interaction entity
//!
//! Records what a visitor did with a posting during a session: opened the
//! detail view or clicked one of the apply buttons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::{ApplicationMethod, JobId, JobPosting};

/// Identifies one browsing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionAction {
    ViewDetails,
    ApplyClick,
}

impl std::fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionAction::ViewDetails => write!(f, "view_details"),
            InteractionAction::ApplyClick => write!(f, "apply_click"),
        }
    }
}

/// One tracked interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInteraction {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub action: InteractionAction,
    pub job_id: JobId,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_method: Option<ApplicationMethod>,
}

impl JobInteraction {
    pub fn view(session_id: SessionId, job: &JobPosting) -> Self {
        Self {
            session_id,
            timestamp: Utc::now(),
            action: InteractionAction::ViewDetails,
            job_id: job.id,
            job_title: job.job_title.clone(),
            application_method: None,
        }
    }

    pub fn apply(session_id: SessionId, job: &JobPosting, method: ApplicationMethod) -> Self {
        Self {
            session_id,
            timestamp: Utc::now(),
            action: InteractionAction::ApplyClick,
            job_id: job.id,
            job_title: job.job_title.clone(),
            application_method: Some(method),
        }
    }
}
