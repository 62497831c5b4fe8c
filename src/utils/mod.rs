//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Input validation and sanitization utilities
pub mod validation;

/// Verbose logging helpers
pub mod logging;
