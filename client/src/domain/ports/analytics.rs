//! Interaction tracking port trait
//!
//! Defines where tracked job interactions are sent.

use async_trait::async_trait;

use crate::domain::entities::JobInteraction;

/// Port trait for recording job interactions
///
/// Recording is fire-and-forget; a sink never fails the user's action.
#[async_trait]
pub trait InteractionSink: Send + Sync {
    async fn record(&self, interaction: JobInteraction);

    /// Everything recorded so far in this session, oldest first
    async fn recorded(&self) -> Vec<JobInteraction>;
}
