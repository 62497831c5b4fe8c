//! Submission lifecycle for the rate card query.
//!
//! One submission is one request: the orchestrator shapes the snapshot into
//! a wire request, issues a single call to the rate lookup service, and
//! tracks the `Idle → Pending → Succeeded | Failed` lifecycle. It performs
//! no validation; callers gate on the validator's verdict first. Overlap
//! prevention between submissions is likewise the caller's concern.

use crate::api::models::RateCardRequest;
use crate::core::form::bindings::FilterSnapshot;
use crate::core::form::results::ResultView;
use crate::core::services::RateLookup;
use crate::error::ApiError;
use std::sync::Arc;

/// Lifecycle of the single in-flight query.
#[derive(Debug, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Pending,
    /// The last query succeeded with this many rows; the rows themselves
    /// live in the `ResultView`.
    Succeeded {
        rows: usize,
    },
    /// The last query failed. The error is retained for observability; the
    /// previously displayed rows stay visible.
    Failed(ApiError),
}

pub struct QueryOrchestrator {
    lookup: Arc<dyn RateLookup>,
    state: QueryState,
}

impl QueryOrchestrator {
    pub fn new(lookup: Arc<dyn RateLookup>) -> Self {
        Self {
            lookup,
            state: QueryState::Idle,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        match &self.state {
            QueryState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Transition to `Pending` and build the request from the snapshot.
    /// Built fresh on every submission; nothing is cached across calls.
    pub fn begin(&mut self, snapshot: &FilterSnapshot) -> RateCardRequest {
        self.state = QueryState::Pending;
        snapshot.to_request()
    }

    /// Settle the in-flight submission. On success the view is replaced; on
    /// failure it is deliberately left unchanged so a transient error does
    /// not destroy prior valid results.
    pub fn complete(
        &mut self,
        outcome: Result<Vec<crate::api::models::RateRow>, ApiError>,
        view: &mut ResultView,
    ) {
        match outcome {
            Ok(rows) => {
                self.state = QueryState::Succeeded { rows: rows.len() };
                view.update(rows);
            }
            Err(e) => {
                self.state = QueryState::Failed(e);
            }
        }
    }

    /// Issue exactly one asynchronous rate card lookup for the snapshot.
    pub async fn submit(&mut self, snapshot: &FilterSnapshot, view: &mut ResultView) -> &QueryState {
        let request = self.begin(snapshot);
        let outcome = self.lookup.fetch_rate_cards(&request).await;
        self.complete(outcome, view);
        &self.state
    }
}
