//! Core library for placestools
//!
//! This crate implements the **Functional Core** of the placestools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The placestools project uses a two-crate architecture:
//!
//! - **`placestools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`placestools`**: HTTP calls, the MCP server and the CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Total**: Malformed upstream records produce `null` fields, never errors
//!
//! # Module Organization
//!
//! - [`places`]: The `{success, data, error}` result envelope
//! - [`places::format`]: Reshaping of Foursquare place records
//! - [`places::tools`]: Tool arguments, defaults, clamping and upstream parameters
//! - [`places::location`]: Reshaping of IP geolocation responses
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use placestools_core::places::format::format_summary;
//!
//! let raw = serde_json::json!({
//!     "fsq_id": "4b5f",
//!     "name": "Joe's Pizza",
//!     "location": { "formatted_address": "1435 Broadway" }
//! });
//!
//! let summary = format_summary(&raw);
//!
//! assert_eq!(summary.name.as_deref(), Some("Joe's Pizza"));
//! assert_eq!(summary.latitude, None);
//! ```

pub mod places;
