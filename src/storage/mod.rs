//! Storage abstractions for the question catalog.
//!
//! The import pipeline only needs two operations: read the whole catalog
//! (for signature comparison) and create one question with its nested
//! answer options and correctness links. Assignment and the unassigned
//! listing exist for the operator commands.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewQuestion, PersistedQuestion};

// Re-export for convenience
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load every persisted question with its answer options and links.
    async fn load_questions(&self) -> Result<Vec<PersistedQuestion>>;

    /// Persist a question with nested answer options and correctness
    /// links. The created question starts with no module assignment.
    async fn create_question(&self, question: NewQuestion) -> Result<PersistedQuestion>;

    /// Set or clear a question's module assignment.
    async fn assign_question(
        &self,
        question_id: u64,
        module_id: Option<u64>,
    ) -> Result<PersistedQuestion>;

    /// Load questions awaiting module assignment.
    async fn load_unassigned(&self) -> Result<Vec<PersistedQuestion>> {
        Ok(self
            .load_questions()
            .await?
            .into_iter()
            .filter(|q| q.module_id.is_none())
            .collect())
    }
}
