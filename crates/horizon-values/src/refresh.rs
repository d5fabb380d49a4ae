//! Process-wide notification that type metadata changed.
//!
//! Hot-reload tooling emits this after replacing types; registries attached
//! to it drop their cached converters.

use std::sync::OnceLock;

use horizon_values_core::Signal;
use horizon_values_core::logging::targets;

/// The signal emitted when type descriptions change.
pub fn type_descriptions_changed() -> &'static Signal<()> {
    static SIGNAL: OnceLock<Signal<()>> = OnceLock::new();
    SIGNAL.get_or_init(Signal::new)
}

/// Tell every attached registry that type descriptions changed.
pub fn notify_type_descriptions_changed() {
    tracing::debug!(target: targets::REGISTRY, "type descriptions changed");
    type_descriptions_changed().emit(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_slots() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let guard = type_descriptions_changed().connect_scoped(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        notify_type_descriptions_changed();
        drop(guard);
        notify_type_descriptions_changed();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
