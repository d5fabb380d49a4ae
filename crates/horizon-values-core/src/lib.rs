//! Core systems for Horizon Values.
//!
//! This crate provides the building blocks the converter crate sits on:
//!
//! - **Near-Equality Engine**: tolerance-aware comparison of `f32`/`f64`
//! - **Signal/Slot System**: synchronous notifications, used for cache refresh
//! - **Enum Metadata**: name/value tables for enums that convert to strings
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Near-Equality Example
//!
//! ```
//! use horizon_values_core::NearEq;
//!
//! let width = 0.1_f64 + 0.2;
//! assert!(width.are_close(0.3));
//! assert!(width.less_than_or_close(0.3));
//! assert!(!width.greater_than_and_not_close(0.3));
//! ```
//!
//! # Signal Example
//!
//! ```
//! use horizon_values_core::Signal;
//!
//! let changed = Signal::<()>::new();
//! let id = changed.connect(|_| println!("type descriptions changed"));
//! changed.emit(());
//! changed.disconnect(id);
//! ```

pub mod enums;
pub mod logging;
pub mod math;
pub mod signal;

pub use enums::{ConvertibleEnum, EnumType, EnumVariant};
pub use logging::PerfSpan;
pub use math::NearEq;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
