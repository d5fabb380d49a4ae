//! Logging facilities for Horizon Values.
//!
//! Horizon Values is instrumented with the `tracing` crate. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_values::registry=trace")
//!     .init();
//! ```
//!
//! Conversions are hot paths, so everything below `warn` is emitted at
//! `trace` or `debug` level only.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_values_core";
    /// Near-equality engine target.
    pub const MATH: &str = "horizon_values_core::math";
    /// Refresh signal target.
    pub const SIGNAL: &str = "horizon_values_core::signal";
    /// Converter resolution target.
    pub const REGISTRY: &str = "horizon_values::registry";
    /// String conversion target.
    pub const CONVERT: &str = "horizon_values::convert";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_values::config";
    /// Culture selection target.
    pub const CULTURE: &str = "horizon_values::culture";
    /// Performance span target.
    pub const PERF: &str = "horizon_values::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// On drop the elapsed time is logged at `trace` level, which makes it cheap
/// to wrap table population and other one-off initialization.
#[derive(Debug)]
pub struct PerfSpan {
    name: &'static str,
    started: std::time::Instant,
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation = name);
        Self {
            name,
            started: std::time::Instant::now(),
            span: span.entered(),
        }
    }

    /// The operation name passed to [`PerfSpan::new`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::PERF,
            operation = self.name,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "finished"
        );
    }
}

/// `tracing::trace!` with the conversion target.
#[macro_export]
macro_rules! convert_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CONVERT, $($arg)*)
    };
}

/// `tracing::debug!` with the conversion target.
#[macro_export]
macro_rules! convert_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CONVERT, $($arg)*)
    };
}

/// `tracing::warn!` with the conversion target.
#[macro_export]
macro_rules! convert_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CONVERT, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_guard() {
        let span = PerfSpan::new("test_operation");
        assert_eq!(span.name(), "test_operation");
        drop(span);
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::MATH, targets::SIGNAL] {
            assert!(target.starts_with(targets::CORE));
        }
        assert!(targets::REGISTRY.starts_with("horizon_values::"));
    }
}
