//! Fire-and-forget sync of new projects to the external work-management
//! tool (Monday.com board).
//!
//! The sync runs on a spawned task after the project transaction commits:
//! its failure is reported as a WARN and never fails or delays project
//! creation. On success the returned item id is written back onto the
//! project row.

use std::sync::Arc;

use jupiter_db::repositories::ProjectRepo;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Payload posted to the sync endpoint for a newly created project.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowItemPayload {
    pub project_name: String,
    pub client_name: String,
    pub client_email: String,
    pub project_type: String,
    pub status: String,
    pub project_id: i64,
    pub address: String,
}

/// Response shape of the sync endpoint: an item id on success, or an error
/// message produced by the remote function.
#[derive(Debug, Deserialize)]
struct WorkflowItemResponse {
    #[serde(rename = "itemId")]
    item_id: Option<serde_json::Value>,
    error: Option<String>,
}

/// Client for the external workflow-sync endpoint.
pub struct WorkflowSync {
    client: reqwest::Client,
    endpoint: String,
}

impl WorkflowSync {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create an item for the project, returning its external id.
    pub async fn create_item(&self, payload: &WorkflowItemPayload) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let body: WorkflowItemResponse = response.json().await?;
        if let Some(error) = body.error {
            anyhow::bail!("Sync endpoint reported an error: {error}");
        }
        match body.item_id {
            // The board API returns numeric ids; tolerate strings too.
            Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
            Some(serde_json::Value::String(s)) if !s.is_empty() => Ok(s),
            _ => anyhow::bail!("Sync endpoint returned no item id"),
        }
    }
}

/// Spawn the post-creation sync for a project. Returns immediately; the
/// task logs its own outcome.
pub fn spawn_project_sync(state: &AppState, payload: WorkflowItemPayload) {
    let Some(sync) = state.sync.as_ref().map(Arc::clone) else {
        return;
    };
    let pool = state.pool.clone();
    tokio::spawn(async move {
        let project_id = payload.project_id;
        match sync.create_item(&payload).await {
            Ok(item_id) => {
                tracing::info!(project_id, %item_id, "Project synced to workflow board");
                if let Err(error) = ProjectRepo::set_monday_item_id(&pool, project_id, &item_id).await
                {
                    tracing::warn!(project_id, %error, "Failed to record workflow item id");
                }
            }
            Err(error) => {
                tracing::warn!(project_id, %error, "Workflow sync failed; project is unaffected");
            }
        }
    });
}
