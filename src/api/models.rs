use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Quote record as returned by the record source. Field values mirror the
/// quote and its opportunity; every field may be unset on a draft quote.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct QuoteRecord {
    pub required_xb_services: Option<String>,
    pub xb_sales_channel: Option<String>,
    pub xb_origin_country: Option<String>,
    pub xb_destination_country: Option<String>,
    pub b2b_or_b2c: Option<String>,
    pub freight_mode_xb: Option<String>,
    pub cod_non_cod: Option<String>,
    pub lm_rate_tier: Option<String>,
    pub cod_rate_tier: Option<String>,
    pub e2e_rate_tier: Option<String>,
}

/// One selectable choice in a picklist.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PicklistEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PicklistField {
    pub values: Vec<PicklistEntry>,
}

/// Nested mapping from field name to its option set, keyed the way the
/// picklist source keys them (object + record type resolved server-side).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PicklistValues {
    pub picklist_field_values: HashMap<String, PicklistField>,
}

/// Wrapper object sent to the rate card lookup service. Built fresh from a
/// snapshot on every submission; key names are part of the wire contract.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct RateCardRequest {
    #[serde(rename = "xbservicevalue")]
    pub xb_service: Option<String>,
    #[serde(rename = "destinationcountryvalue")]
    pub destination_country: Option<String>,
    #[serde(rename = "xbsaleschannelvalue")]
    pub sales_channel: Option<String>,
    #[serde(rename = "quoteDateValue")]
    pub quote_date: Option<String>,
    #[serde(rename = "codvalue")]
    pub cod: Option<String>,
    #[serde(rename = "lmsolutionValue")]
    pub lm_solution: Option<String>,
    #[serde(rename = "codRateTierValue")]
    pub cod_rate_tier: Option<String>,
    #[serde(rename = "freightmodexbvalue")]
    pub freight_mode: Option<String>,
    #[serde(rename = "b2bb2cvalue")]
    pub b2b_b2c: Option<String>,
    #[serde(rename = "origincountryvalue")]
    pub origin_country: Option<String>,
    #[serde(rename = "LMRateTierValue")]
    pub lm_rate_tier: Option<String>,
    #[serde(rename = "E2ERateTierValue")]
    pub e2e_rate_tier: Option<String>,
}

/// One rate row from the lookup service. The column set is owned by the
/// remote service, so rows stay opaque key/value objects until display.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct RateRow(pub serde_json::Map<String, Value>);

impl RateRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}
