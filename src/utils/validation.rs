//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating and sanitizing user input,
//! configuration values, and API parameters.

use crate::error::CliError;
use chrono::NaiveDate;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate API key format
pub fn validate_api_key(api_key: &str) -> crate::Result<()> {
    if api_key.is_empty() {
        return Err(CliError::InvalidArguments("API key cannot be empty".to_string()).into());
    }

    if api_key.len() < 10 {
        return Err(CliError::InvalidArguments(
            "API key appears to be too short (minimum 10 characters)".to_string(),
        )
        .into());
    }

    Ok(())
}

/// Validate a quote date argument (YYYY-MM-DD)
pub fn validate_quote_date(date: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!(
            "Invalid quote date '{}': expected YYYY-MM-DD",
            date
        ))
        .into()
    })
}

/// Parse a `name=value` override argument
pub fn parse_field_override(raw: &str) -> crate::Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(CliError::InvalidArguments(format!(
            "Invalid field override '{}': expected name=value",
            raw
        ))
        .into()),
    }
}
