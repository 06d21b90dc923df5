//! In-memory row transformations.
//!
//! Every function here is pure: inputs are borrowed, never modified, and outputs are rebuilt from
//! scratch on each call.
//!
//! - [`filter()`]: single-column predicate ([`crate::types::FilterSpec`])
//! - [`sort()`]: stable single-column ordering ([`crate::types::SortSpec`])
//! - [`aggregate()`]: group-by with count/sum/average
//! - [`group`]: the generic group-by underneath aggregation
//! - [`view`]: paging and column visibility for display
//!
//! ## Example: filter → sort → aggregate
//!
//! ```rust
//! use data_explorer::processing::{aggregate, filter, sort};
//! use data_explorer::types::{FilterOperator, FilterSpec, Row, SortSpec, Value};
//!
//! let rows = vec![
//!     Row::new().with("Name", "John").with("Department", "Engineering").with("Salary", 75000.0),
//!     Row::new().with("Name", "Jane").with("Department", "Marketing").with("Salary", 65000.0),
//!     Row::new().with("Name", "Bob").with("Department", "Engineering").with("Salary", 85000.0),
//! ];
//!
//! let filtered = filter(&rows, &FilterSpec::new("Salary", FilterOperator::Greater, "70000"));
//! let sorted = sort(&filtered, &SortSpec::descending("Name"));
//! assert_eq!(sorted[0].get("Name"), Some(&Value::Text("John".to_string())));
//!
//! let groups = aggregate(&sorted, "Department", Some("Salary"));
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].count, 2);
//! assert_eq!(groups[0].average, Some(80000.0));
//! ```

pub mod aggregate;
pub mod filter;
pub mod group;
pub mod sort;
pub mod view;

pub use aggregate::aggregate;
pub use filter::filter;
pub use group::{group_by, group_by_reduce, GroupKey, Grouped};
pub use sort::sort;
pub use view::{paginate, ColumnVisibility, Page, DEFAULT_PAGE_SIZE};
