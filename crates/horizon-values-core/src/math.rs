//! Floating-point near-equality for layout and conversion code.
//!
//! Layout arithmetic accumulates representation noise across margins,
//! paddings and DPI scaling. A single epsilon test does not hold up across
//! the whole magnitude range, so [`NearEq::are_close`] accepts a pair when
//! any one of three tests passes:
//!
//! 1. **Scaled epsilon**: `|a - b| < (|a| + |b|) * EPSILON`.
//! 2. **ULP distance**: the bit patterns are at most four steps apart.
//! 3. **Tolerance**: `|a - b| <= max(rel * max(|a|, |b|), abs)`.
//!
//! NaN is never close to anything, itself included.
//!
//! # Example
//!
//! ```
//! use horizon_values_core::math::{self, NearEq};
//!
//! let sum = 0.1_f64 + 0.2;
//! assert!(sum.are_close(0.3));
//! assert!(math::is_zero(1e-300_f64));
//! assert!(!f64::NAN.are_close(f64::NAN));
//! assert_eq!(math::round_to_int(-2.5_f64), -3);
//! ```
//!
//! # Overrides
//!
//! A process-wide override replaces the whole comparison for one width. It is
//! meant for deterministic tests and is rarely installed.
//!
//! ```
//! use horizon_values_core::math::{self, NearEq};
//!
//! math::set_are_close_override::<f32>(|a, b| a == b);
//! assert!(!1.0_f32.are_close(1.0 + f32::EPSILON));
//! math::clear_are_close_override::<f32>();
//! assert!(1.0_f32.are_close(1.0 + f32::EPSILON));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::logging::targets;

/// Signature of a replacement for [`NearEq::are_close`].
pub type AreCloseFn<T> = fn(T, T) -> bool;

/// Maximum bit distance accepted by the ULP test of [`NearEq::are_close`].
pub const DEFAULT_MAX_ULP_STEPS: u32 = 4;

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Near-equality and boundary predicates for `f32` and `f64`.
pub trait NearEq: Copy + PartialOrd + sealed::Sealed + Send + Sync + 'static {
    /// Machine epsilon for this width.
    const EPSILON: Self;
    /// Relative tolerance used by [`are_close_with_tolerance`](Self::are_close_with_tolerance)
    /// inside [`are_close`](Self::are_close).
    const RELATIVE_TOLERANCE: Self;
    /// Absolute tolerance floor used inside [`are_close`](Self::are_close).
    const ABSOLUTE_TOLERANCE: Self;
    /// `0.0` of this width.
    const ZERO: Self;
    /// `1.0` of this width.
    const ONE: Self;

    /// Returns true when the two values should be treated as equal.
    ///
    /// Honors the process-wide override installed with
    /// [`set_are_close_override`].
    fn are_close(self, other: Self) -> bool;

    /// The scaled epsilon test on its own.
    fn are_close_scaled(self, other: Self) -> bool;

    /// The bit-distance test on its own.
    ///
    /// Values of different sign are only close when they compare equal
    /// (`0.0` and `-0.0`).
    fn are_close_in_ulps(self, other: Self, max_steps: u32) -> bool;

    /// The relative/absolute tolerance test with caller supplied bounds.
    fn are_close_with_tolerance(self, other: Self, relative: Self, absolute: Self) -> bool;

    /// NaN test on the raw bit pattern: exponent all ones, mantissa non-zero.
    fn is_nan_bits(self) -> bool;

    /// True for NaN and both infinities.
    fn is_infinity_or_nan(self) -> bool;

    /// True for NaN, both infinities and the largest finite value.
    fn is_infinity_or_nan_or_max(self) -> bool;

    /// Rounds half away from zero.
    fn round_to_int(self) -> i32;

    /// True when the value has no fractional part and is even.
    fn is_even_integer(self) -> bool;

    /// `self < other` and the two are not close.
    #[inline]
    fn less_than_and_not_close(self, other: Self) -> bool {
        self < other && !self.are_close(other)
    }

    /// `self > other` and the two are not close.
    #[inline]
    fn greater_than_and_not_close(self, other: Self) -> bool {
        self > other && !self.are_close(other)
    }

    /// `self < other` or the two are close.
    #[inline]
    fn less_than_or_close(self, other: Self) -> bool {
        self < other || self.are_close(other)
    }

    /// `self > other` or the two are close.
    #[inline]
    fn greater_than_or_close(self, other: Self) -> bool {
        self > other || self.are_close(other)
    }

    /// Close to one.
    #[inline]
    fn is_one(self) -> bool {
        self.are_close(Self::ONE)
    }

    /// Close to zero.
    #[inline]
    fn is_zero(self) -> bool {
        self.are_close(Self::ZERO)
    }

    /// Negative values become zero.
    #[inline]
    fn clamp_to_zero(self) -> Self {
        if self < Self::ZERO { Self::ZERO } else { self }
    }

    #[doc(hidden)]
    fn override_slot() -> &'static OverrideSlot<Self>;
}

/// Storage for one width's comparison override.
#[doc(hidden)]
pub struct OverrideSlot<T> {
    installed: AtomicBool,
    func: RwLock<Option<AreCloseFn<T>>>,
}

impl<T> OverrideSlot<T> {
    const fn new() -> Self {
        Self {
            installed: AtomicBool::new(false),
            func: parking_lot::const_rwlock(None),
        }
    }

    #[inline]
    fn get(&self) -> Option<AreCloseFn<T>> {
        if !self.installed.load(Ordering::Acquire) {
            return None;
        }
        *self.func.read()
    }

    fn set(&self, func: Option<AreCloseFn<T>>) {
        let mut slot = self.func.write();
        *slot = func;
        self.installed.store(slot.is_some(), Ordering::Release);
    }
}

static F64_OVERRIDE: OverrideSlot<f64> = OverrideSlot::new();
static F32_OVERRIDE: OverrideSlot<f32> = OverrideSlot::new();

macro_rules! impl_near_eq {
    (
        $float:ty, $bits:ty, $ubits:ty,
        exponent_mask: $exp_mask:expr,
        exponent_all_ones: $exp_ones:expr,
        mantissa_mask: $man_mask:expr,
        relative: $rel:expr,
        absolute: $abs:expr,
        slot: $slot:ident
    ) => {
        impl NearEq for $float {
            const EPSILON: Self = <$float>::EPSILON;
            const RELATIVE_TOLERANCE: Self = $rel;
            const ABSOLUTE_TOLERANCE: Self = $abs;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            fn are_close(self, other: Self) -> bool {
                if let Some(func) = $slot.get() {
                    return func(self, other);
                }
                if self.is_nan_bits() || other.is_nan_bits() {
                    return false;
                }
                self.are_close_scaled(other)
                    || self.are_close_in_ulps(other, DEFAULT_MAX_ULP_STEPS)
                    || self.are_close_with_tolerance(other, $rel, $abs)
            }

            fn are_close_scaled(self, other: Self) -> bool {
                if self == other {
                    return true;
                }
                let mut eps = (self.abs() + other.abs()) * <$float>::EPSILON;
                if eps == 0.0 {
                    eps = <$float>::EPSILON;
                }
                (self - other).abs() < eps
            }

            fn are_close_in_ulps(self, other: Self, max_steps: u32) -> bool {
                let a = self.to_bits() as $bits;
                let b = other.to_bits() as $bits;
                if (a < 0) != (b < 0) {
                    return self == other;
                }
                // Same sign, so the subtraction cannot overflow.
                (a - b).unsigned_abs() <= max_steps as $ubits
            }

            fn are_close_with_tolerance(self, other: Self, relative: Self, absolute: Self) -> bool {
                if self == other {
                    return true;
                }
                let diff = (self - other).abs();
                let scale = self.abs().max(other.abs());
                diff <= (relative * scale).max(absolute)
            }

            #[inline]
            fn is_nan_bits(self) -> bool {
                let bits = self.to_bits();
                let exponent = bits & $exp_mask;
                let mantissa = bits & $man_mask;
                (exponent == $exp_ones || exponent == $exp_mask) && mantissa != 0
            }

            #[inline]
            fn is_infinity_or_nan(self) -> bool {
                self.is_nan_bits() || self.is_infinite()
            }

            #[inline]
            fn is_infinity_or_nan_or_max(self) -> bool {
                self == <$float>::MAX || self.is_infinity_or_nan()
            }

            #[inline]
            fn round_to_int(self) -> i32 {
                if self > 0.0 {
                    (self + 0.5) as i32
                } else {
                    (self - 0.5) as i32
                }
            }

            fn is_even_integer(self) -> bool {
                if self % 1.0 != 0.0 {
                    return false;
                }
                (self as i64) % 2 == 0
            }

            fn override_slot() -> &'static OverrideSlot<Self> {
                &$slot
            }
        }
    };
}

impl_near_eq!(
    f64, i64, u64,
    exponent_mask: 0xfff0_0000_0000_0000_u64,
    exponent_all_ones: 0x7ff0_0000_0000_0000_u64,
    mantissa_mask: 0x000f_ffff_ffff_ffff_u64,
    relative: 1e-12,
    absolute: 1e-15,
    slot: F64_OVERRIDE
);

impl_near_eq!(
    f32, i32, u32,
    exponent_mask: 0xff80_0000_u32,
    exponent_all_ones: 0x7f80_0000_u32,
    mantissa_mask: 0x007f_ffff_u32,
    relative: 1e-6,
    absolute: 1e-8,
    slot: F32_OVERRIDE
);

/// Replaces [`NearEq::are_close`] for every `T` comparison in the process.
pub fn set_are_close_override<T: NearEq>(func: AreCloseFn<T>) {
    tracing::debug!(
        target: targets::MATH,
        width = std::any::type_name::<T>(),
        "are_close override installed"
    );
    T::override_slot().set(Some(func));
}

/// Removes an override installed with [`set_are_close_override`].
pub fn clear_are_close_override<T: NearEq>() {
    tracing::debug!(
        target: targets::MATH,
        width = std::any::type_name::<T>(),
        "are_close override cleared"
    );
    T::override_slot().set(None);
}

/// Returns true if an override is installed for `T`.
pub fn has_are_close_override<T: NearEq>() -> bool {
    T::override_slot().get().is_some()
}

// Free-function forms, convenient where the receiver would be a literal.

/// See [`NearEq::are_close`].
#[inline]
pub fn are_close<T: NearEq>(a: T, b: T) -> bool {
    a.are_close(b)
}

/// See [`NearEq::less_than_and_not_close`].
#[inline]
pub fn less_than_and_not_close<T: NearEq>(a: T, b: T) -> bool {
    a.less_than_and_not_close(b)
}

/// See [`NearEq::greater_than_and_not_close`].
#[inline]
pub fn greater_than_and_not_close<T: NearEq>(a: T, b: T) -> bool {
    a.greater_than_and_not_close(b)
}

/// See [`NearEq::less_than_or_close`].
#[inline]
pub fn less_than_or_close<T: NearEq>(a: T, b: T) -> bool {
    a.less_than_or_close(b)
}

/// See [`NearEq::greater_than_or_close`].
#[inline]
pub fn greater_than_or_close<T: NearEq>(a: T, b: T) -> bool {
    a.greater_than_or_close(b)
}

/// See [`NearEq::is_one`].
#[inline]
pub fn is_one<T: NearEq>(value: T) -> bool {
    value.is_one()
}

/// See [`NearEq::is_zero`].
#[inline]
pub fn is_zero<T: NearEq>(value: T) -> bool {
    value.is_zero()
}

/// See [`NearEq::is_nan_bits`].
#[inline]
pub fn is_nan<T: NearEq>(value: T) -> bool {
    value.is_nan_bits()
}

/// See [`NearEq::is_infinity_or_nan`].
#[inline]
pub fn is_infinity_or_nan<T: NearEq>(value: T) -> bool {
    value.is_infinity_or_nan()
}

/// See [`NearEq::is_infinity_or_nan_or_max`].
#[inline]
pub fn is_infinity_or_nan_or_max<T: NearEq>(value: T) -> bool {
    value.is_infinity_or_nan_or_max()
}

/// See [`NearEq::clamp_to_zero`].
#[inline]
pub fn clamp_to_zero<T: NearEq>(value: T) -> T {
    value.clamp_to_zero()
}

/// See [`NearEq::round_to_int`].
#[inline]
pub fn round_to_int<T: NearEq>(value: T) -> i32 {
    value.round_to_int()
}

/// See [`NearEq::are_close_with_tolerance`].
#[inline]
pub fn are_close_with_tolerance<T: NearEq>(a: T, b: T, relative: T, absolute: T) -> bool {
    a.are_close_with_tolerance(b, relative, absolute)
}

/// See [`NearEq::are_close_in_ulps`].
#[inline]
pub fn are_close_in_ulps<T: NearEq>(a: T, b: T, max_steps: u32) -> bool {
    a.are_close_in_ulps(b, max_steps)
}

/// See [`NearEq::is_even_integer`].
#[inline]
pub fn is_even_integer<T: NearEq>(value: T) -> bool {
    value.is_even_integer()
}

/// Adds one to odd integers, leaves even ones alone.
#[inline]
pub fn increment_if_odd(value: i32) -> i32 {
    if value % 2 != 0 { value + 1 } else { value }
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics when `min > max`; `max` wins.
#[inline]
pub fn clamp<T: NearEq>(value: T, min: T, max: T) -> T {
    let value = if value < min { min } else { value };
    if value > max { max } else { value }
}

/// Applies optional bounds, `max` first and then `min`.
pub fn apply_min_max<T: NearEq>(value: T, min: Option<T>, max: Option<T>) -> T {
    let mut result = value;
    if let Some(max) = max.filter(|&max| result > max) {
        result = max;
    }
    if let Some(min) = min.filter(|&min| result < min) {
        result = min;
    }
    result
}

/// Linearly maps `value` from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// A degenerate source range maps everything to `to_low`.
pub fn map_ranges(value: f64, from_low: f64, from_high: f64, to_low: f64, to_high: f64) -> f64 {
    let span = from_high - from_low;
    if span.is_zero() {
        return to_low;
    }
    to_low + (value - from_low) * (to_high - to_low) / span
}

/// `percent` percent of `value`.
#[inline]
pub fn percent_of(value: f64, percent: f64) -> f64 {
    value * percent / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_are_close_reflexive() {
        for value in [0.0, -0.0, 1.0, -1.0, 1e-300, 1e300, f64::MAX, f64::MIN_POSITIVE] {
            assert!(value.are_close(value), "{value} not close to itself");
        }
    }

    #[test]
    fn test_nan_is_never_close() {
        assert!(!f64::NAN.are_close(f64::NAN));
        assert!(!f64::NAN.are_close(0.0));
        assert!(!0.0_f64.are_close(f64::NAN));
        assert!(!f32::NAN.are_close(f32::NAN));
    }

    #[test]
    fn test_accumulated_error() {
        let mut sum = 0.0_f64;
        for _ in 0..10 {
            sum += 0.1;
        }
        assert_ne!(sum, 1.0);
        assert!(sum.are_close(1.0));
        assert!(sum.is_one());
    }

    #[test]
    fn test_scaled_epsilon_zero_fallback() {
        assert!(0.0_f64.are_close_scaled(0.0));
        assert!(0.0_f64.are_close_scaled(-0.0));
        assert!(!0.0_f64.are_close_scaled(1e-10));
    }

    #[test]
    fn test_ulp_distance() {
        let a = 1.0_f64;
        let b = f64::from_bits(a.to_bits() + 4);
        let c = f64::from_bits(a.to_bits() + 5);
        assert!(a.are_close_in_ulps(b, 4));
        assert!(!a.are_close_in_ulps(c, 4));
        assert!(a.are_close_in_ulps(c, 5));
        // Opposite signs fall back to exact equality.
        assert!(0.0_f64.are_close_in_ulps(-0.0, 4));
        assert!(!f64::MIN_POSITIVE.are_close_in_ulps(-f64::MIN_POSITIVE, 4));
    }

    #[test]
    fn test_tolerance() {
        assert!(1e9_f64.are_close_with_tolerance(1e9 + 0.01, 1e-8, 1e-15));
        assert!(!1e9_f64.are_close_with_tolerance(1e9 + 100.0, 1e-8, 1e-15));
        assert!(1e-16_f64.are_close_with_tolerance(0.0, 1e-12, 1e-14));
    }

    #[test]
    fn test_f32_widths() {
        assert!(0.1_f32.are_close(0.1 + 1e-9));
        assert!(!0.1_f32.are_close(0.2));
        assert!(1e-9_f32.is_zero());
        assert!(!1e-3_f32.is_zero());
    }

    #[test]
    fn test_ordering_predicates() {
        let almost_one = 1.0_f64 + 1e-15;
        assert!(!almost_one.greater_than_and_not_close(1.0));
        assert!(almost_one.greater_than_or_close(1.0));
        assert!(1.0_f64.less_than_or_close(almost_one));
        assert!(1.0_f64.less_than_and_not_close(2.0));
        assert!(!2.0_f64.less_than_or_close(1.0));
    }

    #[test]
    fn test_nan_bits_matches_platform() {
        for value in [f64::NAN, -f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, 1.5] {
            assert_eq!(value.is_nan_bits(), value.is_nan());
        }
        let quiet = f64::from_bits(0x7ff8_0000_0000_0001);
        assert!(quiet.is_nan_bits());
        for value in [f32::NAN, f32::INFINITY, 3.0] {
            assert_eq!(value.is_nan_bits(), value.is_nan());
        }
    }

    #[test]
    fn test_boundaries() {
        assert!(f64::INFINITY.is_infinity_or_nan());
        assert!(f64::NAN.is_infinity_or_nan());
        assert!(!f64::MAX.is_infinity_or_nan());
        assert!(f64::MAX.is_infinity_or_nan_or_max());
        assert!(!1.0_f64.is_infinity_or_nan_or_max());
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(2.5_f64.round_to_int(), 3);
        assert_eq!(3.5_f64.round_to_int(), 4);
        assert_eq!((-2.5_f64).round_to_int(), -3);
        assert_eq!(2.4_f64.round_to_int(), 2);
        assert_eq!(0.0_f64.round_to_int(), 0);
        assert_eq!(0.5_f32.round_to_int(), 1);
    }

    #[test]
    fn test_clamp_helpers() {
        assert_eq!((-3.0_f64).clamp_to_zero(), 0.0);
        assert_eq!(3.0_f64.clamp_to_zero(), 3.0);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(apply_min_max(5.0, Some(10.0), Some(2.0)), 10.0);
        assert_eq!(apply_min_max(5.0, None, Some(2.0)), 2.0);
        assert_eq!(apply_min_max(5.0_f32, None, None), 5.0);
    }

    #[test]
    fn test_ranges_and_parity() {
        assert!(map_ranges(5.0, 0.0, 10.0, 0.0, 100.0).are_close(50.0));
        assert_eq!(map_ranges(5.0, 1.0, 1.0, 7.0, 9.0), 7.0);
        assert!(percent_of(200.0, 15.0).are_close(30.0));
        assert!(4.0_f64.is_even_integer());
        assert!(!3.0_f64.is_even_integer());
        assert!(!4.5_f64.is_even_integer());
        assert_eq!(increment_if_odd(3), 4);
        assert_eq!(increment_if_odd(4), 4);
    }
}
