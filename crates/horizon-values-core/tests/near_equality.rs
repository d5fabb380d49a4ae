//! Property checks for the near-equality engine over a spread of magnitudes.

use horizon_values_core::NearEq;
use horizon_values_core::math;

fn samples() -> Vec<f64> {
    let mut values = vec![0.0, -0.0, 1.0, -1.0, f64::MIN_POSITIVE, f64::MAX, f64::MIN];
    let mut magnitude = 1e-12;
    while magnitude < 1e12 {
        values.push(magnitude);
        values.push(-magnitude * 3.7);
        values.push(magnitude * 1.000_000_000_1);
        magnitude *= 10.0;
    }
    values
}

#[test]
fn test_reflexive_for_finite_values() {
    for x in samples() {
        assert!(x.are_close(x), "{x} should be close to itself");
        assert!((x as f32).are_close(x as f32));
    }
}

#[test]
fn test_nan_never_close() {
    for x in samples() {
        assert!(!f64::NAN.are_close(x));
        assert!(!x.are_close(f64::NAN));
    }
    assert!(!f64::NAN.are_close(f64::NAN));
    assert!(!math::are_close(f32::NAN, f32::NAN));
}

#[test]
fn test_symmetric() {
    let values = samples();
    for &a in &values {
        for &b in &values {
            assert_eq!(a.are_close(b), b.are_close(a), "asymmetric for {a} and {b}");
        }
    }
}

#[test]
fn test_zero_and_one_agree_with_are_close() {
    for x in samples() {
        assert_eq!(x.is_zero(), x.are_close(0.0));
        assert_eq!(x.is_one(), x.are_close(1.0));
        assert_eq!(math::is_zero(x), math::are_close(x, 0.0));
    }
}

#[test]
fn test_near_neighbours_are_close() {
    for x in samples().into_iter().filter(|x| x.is_finite() && *x != 0.0) {
        let next = f64::from_bits(x.to_bits() + 1);
        if next.is_finite() {
            assert!(x.are_close(next), "{x} and its neighbour {next}");
        }
    }
}

#[test]
fn test_distinct_values_are_not_close() {
    assert!(!1.0_f64.are_close(1.0001));
    assert!(!100.0_f64.are_close(101.0));
    assert!(!1e-3_f64.are_close(2e-3));
    assert!(!0.5_f32.are_close(0.5001));
}
