//! Single source of truth for the current filter state.
//!
//! Every filter field has exactly one entry, sourced either from the linked
//! quote record or from direct user edits. Dependents (the option provider's
//! refresh logic) register explicitly and are notified synchronously on each
//! mutation; there is no implicit framework wiring.

use crate::api::models::{QuoteRecord, RateCardRequest};
use crate::core::form::fields::FieldName;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;

/// Notification sent to registered dependents on each field mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: FieldName,
    pub value: Option<String>,
}

struct Subscriber {
    interest: Vec<FieldName>,
    tx: mpsc::UnboundedSender<FieldChange>,
}

pub struct FieldBindingStore {
    values: HashMap<FieldName, Option<String>>,
    subscribers: Vec<Subscriber>,
}

impl Default for FieldBindingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldBindingStore {
    /// Create a store with every recognized field present and unset.
    pub fn new() -> Self {
        Self {
            values: FieldName::ALL.iter().map(|f| (*f, None)).collect(),
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values.get(&field).and_then(|v| v.as_deref())
    }

    /// Replace the whole value for one field and notify dependents.
    pub fn set(&mut self, field: FieldName, value: Option<String>) {
        self.values.insert(field, value.clone());
        self.notify(field, value);
    }

    /// Overwrite the record-sourced subset from a loaded quote record.
    /// Called once per record load/refresh; user-only fields are untouched.
    pub fn set_from_record(&mut self, record: &QuoteRecord) {
        self.set(FieldName::XbService, record.required_xb_services.clone());
        self.set(FieldName::SalesChannel, record.xb_sales_channel.clone());
        self.set(FieldName::OriginCountry, record.xb_origin_country.clone());
        self.set(
            FieldName::DestinationCountry,
            record.xb_destination_country.clone(),
        );
        self.set(FieldName::BusinessModel, record.b2b_or_b2c.clone());
        self.set(FieldName::FreightMode, record.freight_mode_xb.clone());
        self.set(FieldName::Cod, record.cod_non_cod.clone());
        self.set(FieldName::LmRateTier, record.lm_rate_tier.clone());
        self.set(FieldName::CodRateTier, record.cod_rate_tier.clone());
        self.set(FieldName::E2eRateTier, record.e2e_rate_tier.clone());
    }

    /// Overwrite a single field from a user edit event. Unrecognized names
    /// are a silent no-op so unexpected UI names never crash the form.
    pub fn set_from_input(&mut self, name: &str, value: &str) {
        if let Some(field) = FieldName::from_input_name(name) {
            self.set(field, Some(value.to_string()));
        }
    }

    /// Register a dependent for the given fields. Mutations of any of them
    /// are delivered, in order, on the returned receiver.
    pub fn subscribe(&mut self, interest: &[FieldName]) -> mpsc::UnboundedReceiver<FieldChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(Subscriber {
            interest: interest.to_vec(),
            tx,
        });
        rx
    }

    fn notify(&mut self, field: FieldName, value: Option<String>) {
        // Dropped receivers are pruned on the next delivery attempt.
        self.subscribers.retain(|sub| {
            if !sub.interest.contains(&field) {
                return true;
            }
            sub.tx
                .send(FieldChange {
                    field,
                    value: value.clone(),
                })
                .is_ok()
        });
    }

    /// Immutable copy of the current values for request building.
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot(
            self.values
                .iter()
                .map(|(field, value)| (*field, value.clone()))
                .collect(),
        )
    }
}

/// Point-in-time copy of the filter state taken at submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot(BTreeMap<FieldName, Option<String>>);

impl FilterSnapshot {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).and_then(|v| v.as_deref())
    }

    fn owned(&self, field: FieldName) -> Option<String> {
        self.0.get(&field).and_then(|v| v.clone())
    }

    /// Shape the snapshot into the wire request. Built fresh per submission.
    pub fn to_request(&self) -> RateCardRequest {
        RateCardRequest {
            xb_service: self.owned(FieldName::XbService),
            destination_country: self.owned(FieldName::DestinationCountry),
            sales_channel: self.owned(FieldName::SalesChannel),
            quote_date: self.owned(FieldName::QuoteDate),
            cod: self.owned(FieldName::Cod),
            lm_solution: self.owned(FieldName::LmSolution),
            cod_rate_tier: self.owned(FieldName::CodRateTier),
            freight_mode: self.owned(FieldName::FreightMode),
            b2b_b2c: self.owned(FieldName::BusinessModel),
            origin_country: self.owned(FieldName::OriginCountry),
            lm_rate_tier: self.owned(FieldName::LmRateTier),
            e2e_rate_tier: self.owned(FieldName::E2eRateTier),
        }
    }
}
