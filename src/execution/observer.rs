use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Stage events emitted by [`super::Explorer`] whenever it recomputes a derived view.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Parsed {
        rows: usize,
        skipped: usize,
        elapsed: Duration,
    },
    Transformed {
        input_rows: usize,
        output_rows: usize,
        elapsed: Duration,
    },
    Aggregated {
        input_rows: usize,
        groups: usize,
        elapsed: Duration,
    },
}

impl PipelineEvent {
    pub fn elapsed(&self) -> Duration {
        match self {
            PipelineEvent::Parsed { elapsed, .. }
            | PipelineEvent::Transformed { elapsed, .. }
            | PipelineEvent::Aggregated { elapsed, .. } => *elapsed,
        }
    }
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// A simple stderr logger for pipeline events.
#[derive(Debug, Default)]
pub struct StdErrPipelineObserver;

impl PipelineObserver for StdErrPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Parsed { rows, skipped, elapsed } => {
                eprintln!("[pipeline] parse rows={rows} skipped={skipped} elapsed={elapsed:?}")
            }
            PipelineEvent::Transformed {
                input_rows,
                output_rows,
                elapsed,
            } => eprintln!("[pipeline] transform rows={input_rows}->{output_rows} elapsed={elapsed:?}"),
            PipelineEvent::Aggregated {
                input_rows,
                groups,
                elapsed,
            } => eprintln!("[pipeline] aggregate rows={input_rows} groups={groups} elapsed={elapsed:?}"),
        }
    }
}

/// Running counters over every event the explorer has emitted.
///
/// Attach it as a [`PipelineObserver`] (it implements the trait) and snapshot it at any time.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    parses: AtomicU64,
    transforms: AtomicU64,
    aggregations: AtomicU64,
    rows_parsed: AtomicU64,
    rows_skipped: AtomicU64,
    busy_ns: AtomicU64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PipelineMetricsSnapshot {
        PipelineMetricsSnapshot {
            parses: self.parses.load(Ordering::SeqCst),
            transforms: self.transforms.load(Ordering::SeqCst),
            aggregations: self.aggregations.load(Ordering::SeqCst),
            rows_parsed: self.rows_parsed.load(Ordering::SeqCst),
            rows_skipped: self.rows_skipped.load(Ordering::SeqCst),
            busy: Duration::from_nanos(self.busy_ns.load(Ordering::SeqCst)),
        }
    }
}

impl PipelineObserver for PipelineMetrics {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Parsed { rows, skipped, .. } => {
                self.parses.fetch_add(1, Ordering::SeqCst);
                self.rows_parsed.fetch_add(*rows as u64, Ordering::SeqCst);
                self.rows_skipped.fetch_add(*skipped as u64, Ordering::SeqCst);
            }
            PipelineEvent::Transformed { .. } => {
                self.transforms.fetch_add(1, Ordering::SeqCst);
            }
            PipelineEvent::Aggregated { .. } => {
                self.aggregations.fetch_add(1, Ordering::SeqCst);
            }
        }
        let ns = event.elapsed().as_nanos().min(u64::MAX as u128) as u64;
        self.busy_ns.fetch_add(ns, Ordering::SeqCst);
    }
}

/// Immutable snapshot of [`PipelineMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineMetricsSnapshot {
    pub parses: u64,
    pub transforms: u64,
    pub aggregations: u64,
    pub rows_parsed: u64,
    pub rows_skipped: u64,
    pub busy: Duration,
}

impl fmt::Display for PipelineMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parses={}, transforms={}, aggregations={}, rows_parsed={}, rows_skipped={}, busy={:?}",
            self.parses, self.transforms, self.aggregations, self.rows_parsed, self.rows_skipped, self.busy
        )
    }
}
