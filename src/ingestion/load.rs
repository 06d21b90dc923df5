//! Reading CSV text from disk.
//!
//! [`load_csv_from_path`] enforces the upload rules (a `.csv` extension and a size cap) before
//! reading, and reports the outcome to an optional [`IngestionObserver`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ExplorerError, ExplorerResult};

use super::observability::{IngestionObserver, LoadContext, LoadStats, Severity};

/// Default upper bound on file size: 5 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Options controlling file loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Files larger than this are rejected without being read.
    pub max_bytes: u64,
    /// If `true`, only paths ending in `.csv` (case-insensitive) are accepted.
    pub require_csv_extension: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("max_bytes", &self.max_bytes)
            .field("require_csv_extension", &self.require_csv_extension)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            require_csv_extension: true,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Raw text of a loaded file plus its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCsv {
    /// File name component of the path.
    pub name: String,
    /// Full file contents.
    pub text: String,
}

/// Read a CSV file into memory.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the byte count
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use data_explorer::ingestion::{load_csv_from_path, parse, LoadOptions, StdErrObserver};
///
/// # fn main() -> Result<(), data_explorer::ExplorerError> {
/// let opts = LoadOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let loaded = load_csv_from_path("sales.csv", &opts)?;
/// let rows = parse(&loaded.text);
/// println!("{}: {} rows", loaded.name, rows.len());
/// # Ok(())
/// # }
/// ```
pub fn load_csv_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> ExplorerResult<LoadedCsv> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
    };

    let result = read_checked(path, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(loaded) => obs.on_success(
                &ctx,
                LoadStats {
                    bytes: loaded.text.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn read_checked(path: &Path, options: &LoadOptions) -> ExplorerResult<LoadedCsv> {
    if options.require_csv_extension && !has_csv_extension(path) {
        return Err(ExplorerError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    let size = fs::metadata(path)?.len();
    if size > options.max_bytes {
        return Err(ExplorerError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: options.max_bytes,
        });
    }

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| ExplorerError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;

    Ok(LoadedCsv {
        name: file_name(path),
        text,
    })
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn severity_for_error(e: &ExplorerError) -> Severity {
    match e {
        ExplorerError::Io(_) => Severity::Critical,
        _ => Severity::Error,
    }
}
