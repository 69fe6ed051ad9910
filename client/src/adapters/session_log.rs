//! In-memory interaction log
//!
//! Keeps the session's interactions in memory for as long as the client
//! lives, and emits one tracing event per interaction.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::JobInteraction;
use crate::domain::ports::InteractionSink;

#[derive(Default)]
pub struct SessionInteractionLog {
    interactions: RwLock<Vec<JobInteraction>>,
}

impl SessionInteractionLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InteractionSink for SessionInteractionLog {
    async fn record(&self, interaction: JobInteraction) {
        tracing::info!(
            session = %interaction.session_id,
            action = %interaction.action,
            job_id = %interaction.job_id,
            method = interaction.application_method.map(|m| m.as_str()),
            "Job interaction"
        );
        self.interactions.write().await.push(interaction);
    }

    async fn recorded(&self) -> Vec<JobInteraction> {
        self.interactions.read().await.clone()
    }
}
