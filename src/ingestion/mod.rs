//! Turning raw text (or files on disk) into rows.
//!
//! - [`csv`](self::csv): the parser, cell coercion and column utilities
//! - [`load`]: reading a `.csv` file from disk with size/extension checks
//! - [`observability`]: diagnostic sinks for skipped rows and load outcomes

pub mod csv;
pub mod load;
pub mod observability;

pub use self::csv::{column_names, column_type, parse, parse_with_observer};
pub use self::load::{load_csv_from_path, LoadOptions, LoadedCsv, DEFAULT_MAX_BYTES};
pub use self::observability::{
    CompositeObserver, FileObserver, IngestionObserver, LoadContext, LoadStats, Severity, SilentObserver,
    SkippedRow, StdErrObserver,
};
