//! Storage layer for ratecard-cli
//!
//! Handles configuration management and credential storage. Uses the OS
//! keyring for the API key and TOML for configuration files.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
