//! `data-explorer` turns comma-separated text into typed rows and derives filtered, sorted and
//! aggregated views from them, entirely in memory.
//!
//! The primary entrypoint is [`execution::Explorer`], a session that owns the raw text and the
//! transform parameters and lazily (re)computes three views: the parsed rows, the transformed
//! rows (filter, then sort) and the per-group aggregation.
//!
//! ## Data model
//!
//! - A [`types::Row`] is an insertion-ordered mapping from column name to [`types::Value`].
//! - A cell is a [`types::Value::Number`] when the whole trimmed field is a finite number,
//!   otherwise [`types::Value::Text`] (empty fields stay empty text).
//! - A column's [`types::ColumnType`] is judged from the first row only.
//! - A data line whose field count differs from the header is dropped and reported to an
//!   [`ingestion::IngestionObserver`]; parsing never fails.
//!
//! ## Quick example: parse and transform
//!
//! ```rust
//! use data_explorer::ingestion::{column_type, parse};
//! use data_explorer::processing::{aggregate, filter, sort};
//! use data_explorer::types::{ColumnType, FilterOperator, FilterSpec, SortSpec, Value};
//!
//! let rows = parse("Name,Age,Department\nJohn,25,Engineering\nJane,30,Marketing\nBob,35,Engineering");
//! assert_eq!(rows.len(), 3);
//! assert_eq!(column_type(&rows, "Age"), ColumnType::Number);
//!
//! let engineers = filter(&rows, &FilterSpec::new("Department", FilterOperator::Equals, "ENGINEERING"));
//! assert_eq!(engineers.len(), 2);
//!
//! let by_name = sort(&rows, &SortSpec::descending("Name"));
//! assert_eq!(by_name[0].get("Name"), Some(&Value::Text("John".to_string())));
//!
//! let groups = aggregate(&rows, "Department", Some("Age"));
//! assert_eq!(groups[0].average, Some(30.0));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: parsing, column utilities, loading `.csv` files, diagnostic observers
//! - [`processing`]: filter / sort / aggregate, generic group-by, paging and column visibility
//! - [`execution`]: the memoized [`execution::Explorer`] session, stage events, debouncing
//! - [`export`]: CSV and JSON output
//! - [`types`]: rows, values and transform parameters
//! - [`error`]: the error type for the fallible (I/O and export) surfaces

pub mod error;
pub mod execution;
pub mod export;
pub mod ingestion;
mod numeric;
pub mod processing;
pub mod types;

pub use error::{ExplorerError, ExplorerResult};
