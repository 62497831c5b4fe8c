//! Option resolution for the selector fields.
//!
//! Static picklists are fetched once at load. The LM solution set depends on
//! the XB service and destination country and is recomputed on every change
//! to either; responses are ticket-tagged so a slow lookup resolving after a
//! newer one is discarded instead of clobbering the fresher set.
//!
//! Lookup failures never propagate into the form: a failed fetch yields an
//! empty option set and the rest of the fields stay usable.

use crate::api::models::PicklistEntry;
use crate::core::form::fields::FieldName;
use crate::core::services::{PicklistSource, SolutionLookup};
use crate::error::{ApiError, FormError};
use crate::utils::logging::log_warning;
use std::collections::HashMap;
use std::sync::Arc;

pub struct OptionProvider {
    statics: HashMap<FieldName, Vec<PicklistEntry>>,
    solution_options: Vec<PicklistEntry>,
    latest_ticket: u64,
    lookup: Arc<dyn SolutionLookup>,
}

impl OptionProvider {
    pub fn new(lookup: Arc<dyn SolutionLookup>) -> Self {
        Self {
            statics: HashMap::new(),
            solution_options: Vec::new(),
            latest_ticket: 0,
            lookup,
        }
    }

    /// Fetch the static picklists once at load. On failure the provider
    /// keeps empty sets so the form stays usable with reduced choices.
    pub async fn load_static(
        &mut self,
        source: &dyn PicklistSource,
        object: &str,
        record_type: &str,
    ) {
        match source.fetch_picklists(object, record_type).await {
            Ok(picklists) => {
                for field in FieldName::ALL {
                    let Some(key) = field.picklist_key() else {
                        continue;
                    };
                    let values = picklists
                        .picklist_field_values
                        .get(key)
                        .map(|f| f.values.clone())
                        .unwrap_or_default();
                    self.statics.insert(field, values);
                }
            }
            Err(e) => {
                let err = FormError::OptionLoad {
                    field: "tier picklists".to_string(),
                    message: e.to_string(),
                };
                log_warning(&err.to_string());
            }
        }
    }

    /// Option set for a field whose choices do not depend on other fields.
    pub fn static_options(&self, field: FieldName) -> &[PicklistEntry] {
        self.statics.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current LM solution option set.
    pub fn solution_options(&self) -> &[PicklistEntry] {
        &self.solution_options
    }

    /// Start a dependent recomputation and get its ticket. Issuing a new
    /// ticket invalidates every outstanding one.
    pub fn issue_refresh(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    /// Complete a dependent recomputation. Returns false when the ticket is
    /// stale (a newer refresh was issued while this one was in flight); the
    /// stale result is discarded. A failed lookup yields an empty set.
    pub fn apply_refresh(
        &mut self,
        ticket: u64,
        outcome: Result<Vec<String>, ApiError>,
    ) -> bool {
        if ticket != self.latest_ticket {
            return false;
        }
        self.solution_options = match outcome {
            Ok(values) => values
                .into_iter()
                .map(|value| PicklistEntry {
                    label: value.clone(),
                    value,
                })
                .collect(),
            Err(e) => {
                let err = FormError::OptionLoad {
                    field: FieldName::LmSolution.input_name().to_string(),
                    message: e.to_string(),
                };
                log_warning(&err.to_string());
                Vec::new()
            }
        };
        true
    }

    /// Recompute the LM solution set for the given upstream pair. With
    /// either upstream unset the set is emptied without a remote call.
    pub async fn refresh_solution_options(
        &mut self,
        xb_service: Option<&str>,
        destination_country: Option<&str>,
    ) {
        let ticket = self.issue_refresh();
        let outcome = match (xb_service, destination_country) {
            (Some(service), Some(destination)) if !service.is_empty() && !destination.is_empty() => {
                self.lookup.fetch_solution_types(service, destination).await
            }
            _ => Ok(Vec::new()),
        };
        self.apply_refresh(ticket, outcome);
    }
}
