//! Logging facilities for Horizon Grid.
//!
//! Horizon Grid is instrumented with the `tracing` crate. Nothing is printed
//! unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_grid=debug")
//!     .init();
//! ```
//!
//! The [`targets`] and [`span_names`] constants can be used in filter
//! directives to narrow output to one subsystem.

/// Span names used throughout Horizon Grid.
pub mod span_names {
    /// Full filter, sort and paginate recompute.
    pub const RECOMPUTE: &str = "horizon_grid::recompute";
    /// Input validation at the engine boundary.
    pub const VALIDATE: &str = "horizon_grid::validate";
}

/// Target names for log filtering.
pub mod targets {
    /// Table engine state transitions and pipeline counts.
    pub const ENGINE: &str = "horizon_grid::engine";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_grid::signal";
    /// Configuration loading and validation.
    pub const CONFIG: &str = "horizon_grid::config";
    /// Timing spans.
    pub const PERF: &str = "horizon_grid::perf";
}

/// A guard that keeps a timing span entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_grid::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Logs at warn level under the `horizon_grid` target.
#[macro_export]
macro_rules! grid_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_grid", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
        crate::grid_warn!(rows = 3, "inside perf span");
    }

    #[test]
    fn test_target_names_are_namespaced() {
        for target in [targets::ENGINE, targets::SIGNAL, targets::CONFIG, targets::PERF] {
            assert!(target.starts_with("horizon_grid::"));
        }
    }
}
