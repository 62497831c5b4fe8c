//! Service seams for the form workflow's external collaborators.
//!
//! The form core never talks HTTP directly; it goes through these traits so
//! the asynchronous flows (record load, option refresh, rate lookup) can be
//! driven deterministically by fakes in tests.

use crate::api::models::{PicklistValues, QuoteRecord, RateCardRequest, RateRow};
use crate::error::ApiError;
use async_trait::async_trait;

/// Supplies the linked quote record's field values.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_quote(&self, quote_id: &str) -> Result<QuoteRecord, ApiError>;
}

/// Supplies option sets for static selector fields, keyed by object and
/// record type.
#[async_trait]
pub trait PicklistSource: Send + Sync {
    async fn fetch_picklists(
        &self,
        object: &str,
        record_type: &str,
    ) -> Result<PicklistValues, ApiError>;
}

/// Resolves the LM solution choices valid for a service/destination pair.
#[async_trait]
pub trait SolutionLookup: Send + Sync {
    async fn fetch_solution_types(
        &self,
        xb_service: &str,
        destination_country: &str,
    ) -> Result<Vec<String>, ApiError>;
}

/// Performs the rate card lookup for a submitted request.
#[async_trait]
pub trait RateLookup: Send + Sync {
    async fn fetch_rate_cards(&self, request: &RateCardRequest) -> Result<Vec<RateRow>, ApiError>;
}
