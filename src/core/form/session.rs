//! Owning glue for one filter-form session.
//!
//! A session owns the binding store, option provider, orchestrator, and
//! result view, plus the store subscription that drives dependent-option
//! refreshes. The whole flow is single-owner and event-driven: record and
//! picklist loads seed the store, user edits mutate it, and submit runs
//! validate → gate → one query. Teardown is `Drop`.

use crate::core::form::bindings::{FieldBindingStore, FieldChange};
use crate::core::form::fields::FieldName;
use crate::core::form::options::OptionProvider;
use crate::core::form::orchestrator::{QueryOrchestrator, QueryState};
use crate::core::form::results::ResultView;
use crate::core::form::validator::{FormValidator, ValidationOutcome};
use crate::core::services::{PicklistSource, RateLookup, RecordSource, SolutionLookup};
use crate::error::FormError;
use crate::utils::logging::log_error;
use std::sync::Arc;
use tokio::sync::mpsc;

const PICKLIST_OBJECT: &str = "quote";
const PICKLIST_RECORD_TYPE: &str = "default";

/// What came out of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome<'a> {
    /// Validation blocked the submission; feedback covers every field.
    Rejected(ValidationOutcome),
    /// The query ran; inspect the state for success or failure.
    Completed(&'a QueryState),
}

pub struct FormSession {
    bindings: FieldBindingStore,
    options: OptionProvider,
    orchestrator: QueryOrchestrator,
    view: ResultView,
    changes: mpsc::UnboundedReceiver<FieldChange>,
    record_source: Arc<dyn RecordSource>,
    picklist_source: Arc<dyn PicklistSource>,
    required: Vec<FieldName>,
}

impl FormSession {
    pub fn new(
        record_source: Arc<dyn RecordSource>,
        picklist_source: Arc<dyn PicklistSource>,
        solution_lookup: Arc<dyn SolutionLookup>,
        rate_lookup: Arc<dyn RateLookup>,
    ) -> Self {
        let mut bindings = FieldBindingStore::new();
        let changes = bindings.subscribe(&FieldName::SOLUTION_UPSTREAMS);

        Self {
            bindings,
            options: OptionProvider::new(solution_lookup),
            orchestrator: QueryOrchestrator::new(rate_lookup),
            view: ResultView::new(),
            changes,
            record_source,
            picklist_source,
            required: FieldName::DEFAULT_REQUIRED.to_vec(),
        }
    }

    /// Override the required-field set declared for validation.
    pub fn with_required(mut self, required: Vec<FieldName>) -> Self {
        self.required = required;
        self
    }

    /// Seed the form for a quote: record values, static picklists, and the
    /// initial dependent option set. A failed record load is logged and
    /// leaves prior bound values untouched; the form stays usable.
    pub async fn load(&mut self, quote_id: &str) {
        match self.record_source.fetch_quote(quote_id).await {
            Ok(record) => self.bindings.set_from_record(&record),
            Err(e) => {
                let err = FormError::RecordLoad {
                    message: e.to_string(),
                };
                log_error(&err.to_string());
            }
        }

        self.options
            .load_static(
                self.picklist_source.as_ref(),
                PICKLIST_OBJECT,
                PICKLIST_RECORD_TYPE,
            )
            .await;

        self.sync_dependent_options().await;
    }

    /// Apply a user edit, then recompute the dependent option set if either
    /// upstream moved.
    pub async fn set_input(&mut self, name: &str, value: &str) {
        self.bindings.set_from_input(name, value);
        self.sync_dependent_options().await;
    }

    /// Drain pending change notifications; at most one dependent
    /// recomputation is issued, using the latest upstream pair.
    async fn sync_dependent_options(&mut self) {
        let mut upstream_changed = false;
        while let Ok(change) = self.changes.try_recv() {
            if FieldName::SOLUTION_UPSTREAMS.contains(&change.field) {
                upstream_changed = true;
            }
        }
        if !upstream_changed {
            return;
        }

        let service = self.bindings.get(FieldName::XbService).map(str::to_string);
        let destination = self
            .bindings
            .get(FieldName::DestinationCountry)
            .map(str::to_string);
        self.options
            .refresh_solution_options(service.as_deref(), destination.as_deref())
            .await;
    }

    /// Run the exhaustive validation pass without submitting.
    pub fn validate(&self) -> ValidationOutcome {
        FormValidator::validate(&self.bindings, &self.required)
    }

    /// Validate, and only when every required field is filled issue the
    /// single rate card query. Validation always completes before the
    /// asynchronous query starts.
    pub async fn submit(&mut self) -> SubmitOutcome<'_> {
        let outcome = self.validate();
        if !outcome.all_valid {
            return SubmitOutcome::Rejected(outcome);
        }

        let snapshot = self.bindings.snapshot();
        let state = self.orchestrator.submit(&snapshot, &mut self.view).await;
        SubmitOutcome::Completed(state)
    }

    pub fn bindings(&self) -> &FieldBindingStore {
        &self.bindings
    }

    pub fn options(&self) -> &OptionProvider {
        &self.options
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn query_state(&self) -> &QueryState {
        self.orchestrator.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{
        PicklistEntry, PicklistField, PicklistValues, QuoteRecord, RateCardRequest, RateRow,
    };
    use crate::error::ApiError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeRecordSource {
        record: Option<QuoteRecord>,
    }

    #[async_trait]
    impl RecordSource for FakeRecordSource {
        async fn fetch_quote(&self, _quote_id: &str) -> Result<QuoteRecord, ApiError> {
            self.record.clone().ok_or(ApiError::Http {
                status: 404,
                endpoint: "/api/quotes/Q-1001".to_string(),
                message: "not found".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct FakePicklistSource {
        picklists: PicklistValues,
    }

    #[async_trait]
    impl PicklistSource for FakePicklistSource {
        async fn fetch_picklists(
            &self,
            _object: &str,
            _record_type: &str,
        ) -> Result<PicklistValues, ApiError> {
            Ok(self.picklists.clone())
        }
    }

    struct FakeSolutionLookup {
        calls: AtomicUsize,
        last_pair: Mutex<Option<(String, String)>>,
        values: Vec<String>,
    }

    impl FakeSolutionLookup {
        fn returning(values: &[&str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_pair: Mutex::new(None),
                values: values.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl SolutionLookup for FakeSolutionLookup {
        async fn fetch_solution_types(
            &self,
            xb_service: &str,
            destination_country: &str,
        ) -> Result<Vec<String>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_pair.lock().unwrap() =
                Some((xb_service.to_string(), destination_country.to_string()));
            Ok(self.values.clone())
        }
    }

    struct FakeRateLookup {
        calls: AtomicUsize,
        last_request: Mutex<Option<RateCardRequest>>,
        rows: Result<Vec<RateRow>, ()>,
    }

    impl FakeRateLookup {
        fn returning(n: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                rows: Ok((0..n)
                    .map(|i| {
                        serde_json::from_value(json!({ "Rate_Card_Name": format!("E2E-{}", i) }))
                            .unwrap()
                    })
                    .collect()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                rows: Err(()),
            }
        }
    }

    #[async_trait]
    impl RateLookup for FakeRateLookup {
        async fn fetch_rate_cards(
            &self,
            request: &RateCardRequest,
        ) -> Result<Vec<RateRow>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.rows {
                Ok(rows) => Ok(rows.clone()),
                Err(()) => Err(ApiError::Http {
                    status: 500,
                    endpoint: "/api/rate-cards/search".to_string(),
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn sample_record() -> QuoteRecord {
        QuoteRecord {
            required_xb_services: Some("Parcel".to_string()),
            xb_sales_channel: Some("Marketplace".to_string()),
            xb_origin_country: Some("SG".to_string()),
            xb_destination_country: Some("US".to_string()),
            b2b_or_b2c: Some("B2C".to_string()),
            freight_mode_xb: Some("Air".to_string()),
            cod_non_cod: Some("Non COD".to_string()),
            lm_rate_tier: Some("Tier A".to_string()),
            cod_rate_tier: Some("Tier B".to_string()),
            e2e_rate_tier: Some("Tier 1".to_string()),
        }
    }

    fn tier_picklists() -> PicklistValues {
        let mut picklist_field_values = HashMap::new();
        picklist_field_values.insert(
            "E2E_Rate_Tier".to_string(),
            PicklistField {
                values: vec![PicklistEntry {
                    label: "Tier 1".to_string(),
                    value: "Tier 1".to_string(),
                }],
            },
        );
        PicklistValues {
            picklist_field_values,
        }
    }

    struct SessionParts {
        session: FormSession,
        solutions: Arc<FakeSolutionLookup>,
        rates: Arc<FakeRateLookup>,
    }

    fn session_with(
        record: Option<QuoteRecord>,
        solutions: FakeSolutionLookup,
        rates: FakeRateLookup,
    ) -> SessionParts {
        let solutions = Arc::new(solutions);
        let rates = Arc::new(rates);
        let session = FormSession::new(
            Arc::new(FakeRecordSource { record }),
            Arc::new(FakePicklistSource {
                picklists: tier_picklists(),
            }),
            Arc::clone(&solutions) as Arc<dyn SolutionLookup>,
            Arc::clone(&rates) as Arc<dyn RateLookup>,
        );
        SessionParts {
            session,
            solutions,
            rates,
        }
    }

    async fn fill_required(session: &mut FormSession) {
        session.set_input("e2eRateTier", "Tier 1").await;
        session.set_input("codRateTier", "Tier B").await;
        session.set_input("lmRateTier", "Tier A").await;
        session.set_input("lmSolution", "Standard").await;
        session.set_input("quoteDate", "2025-02-01").await;
    }

    #[tokio::test]
    async fn test_load_seeds_bindings_options_and_dependents() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&["Standard", "Express"]),
            FakeRateLookup::returning(0),
        );

        parts.session.load("Q-1001").await;

        let bindings = parts.session.bindings();
        assert_eq!(bindings.get(FieldName::XbService), Some("Parcel"));
        assert_eq!(bindings.get(FieldName::DestinationCountry), Some("US"));

        let options = parts.session.options();
        assert_eq!(options.static_options(FieldName::E2eRateTier).len(), 1);
        // One dependent recomputation for the record load, using the
        // record's upstream pair.
        assert_eq!(parts.solutions.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *parts.solutions.last_pair.lock().unwrap(),
            Some(("Parcel".to_string(), "US".to_string()))
        );
        assert_eq!(options.solution_options().len(), 2);
        assert_eq!(options.solution_options()[0].label, "Standard");
    }

    #[tokio::test]
    async fn test_failed_record_load_preserves_prior_bindings() {
        let mut parts = session_with(
            None,
            FakeSolutionLookup::returning(&[]),
            FakeRateLookup::returning(0),
        );

        parts.session.set_input("xbService", "Freight").await;
        parts.session.set_input("quoteDate", "2025-02-01").await;

        parts.session.load("Q-1001").await;

        assert_eq!(parts.session.bindings().get(FieldName::XbService), Some("Freight"));
        assert_eq!(
            parts.session.bindings().get(FieldName::QuoteDate),
            Some("2025-02-01")
        );
    }

    #[tokio::test]
    async fn test_upstream_edit_triggers_one_recompute_with_latest_pair() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&["Standard"]),
            FakeRateLookup::returning(0),
        );
        parts.session.load("Q-1001").await;
        let calls_after_load = parts.solutions.calls.load(Ordering::SeqCst);

        parts.session.set_input("destinationCountry", "AU").await;

        assert_eq!(parts.solutions.calls.load(Ordering::SeqCst), calls_after_load + 1);
        assert_eq!(
            *parts.solutions.last_pair.lock().unwrap(),
            Some(("Parcel".to_string(), "AU".to_string()))
        );
    }

    #[tokio::test]
    async fn test_non_upstream_edit_does_not_recompute() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&["Standard"]),
            FakeRateLookup::returning(0),
        );
        parts.session.load("Q-1001").await;
        let calls_after_load = parts.solutions.calls.load(Ordering::SeqCst);

        parts.session.set_input("quoteDate", "2025-02-01").await;
        parts.session.set_input("e2eRateTier", "Tier 1").await;

        assert_eq!(parts.solutions.calls.load(Ordering::SeqCst), calls_after_load);
    }

    #[tokio::test]
    async fn test_submit_rejected_with_exhaustive_feedback() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&[]),
            FakeRateLookup::returning(3),
        );
        parts.session.load("Q-1001").await;
        // Quote date and LM solution left empty.
        parts.session.set_input("lmRateTier", "Tier A").await;

        match parts.session.submit().await {
            SubmitOutcome::Rejected(outcome) => {
                assert!(!outcome.all_valid);
                let missing = outcome.missing_fields();
                assert!(missing.contains(&"quoteDate".to_string()));
                assert!(missing.contains(&"lmSolution".to_string()));
            }
            SubmitOutcome::Completed(_) => panic!("submission should have been blocked"),
        }
        // Blocked submission never reaches the rate lookup.
        assert_eq!(parts.rates.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(parts.session.query_state(), QueryState::Idle));
    }

    #[tokio::test]
    async fn test_submit_success_binds_rows() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&["Standard"]),
            FakeRateLookup::returning(3),
        );
        parts.session.load("Q-1001").await;
        fill_required(&mut parts.session).await;

        match parts.session.submit().await {
            SubmitOutcome::Completed(state) => {
                assert!(matches!(state, QueryState::Succeeded { rows: 3 }))
            }
            SubmitOutcome::Rejected(outcome) => {
                panic!("unexpected rejection: {:?}", outcome.missing_fields())
            }
        }
        assert_eq!(parts.session.view().len(), 3);
        assert_eq!(parts.rates.calls.load(Ordering::SeqCst), 1);

        // The request carries the latest snapshot, record + user values.
        let sent = parts.rates.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.xb_service.as_deref(), Some("Parcel"));
        assert_eq!(sent.lm_solution.as_deref(), Some("Standard"));
        assert_eq!(sent.quote_date.as_deref(), Some("2025-02-01"));
    }

    #[tokio::test]
    async fn test_failed_query_keeps_prior_rows() {
        let mut parts = session_with(
            Some(sample_record()),
            FakeSolutionLookup::returning(&["Standard"]),
            FakeRateLookup::returning(2),
        );
        parts.session.load("Q-1001").await;
        fill_required(&mut parts.session).await;
        parts.session.submit().await;
        assert_eq!(parts.session.view().len(), 2);

        // Swap in a failing lookup by building a fresh orchestrator path:
        // reuse the session but point the next submit at a failing service.
        parts.session.orchestrator =
            QueryOrchestrator::new(Arc::new(FakeRateLookup::failing()) as Arc<dyn RateLookup>);

        match parts.session.submit().await {
            SubmitOutcome::Completed(state) => assert!(matches!(state, QueryState::Failed(_))),
            SubmitOutcome::Rejected(_) => panic!("validation should have passed"),
        }
        assert_eq!(parts.session.view().len(), 2);
    }
}
