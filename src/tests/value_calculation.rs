use super::helpers::from_values;
use crate::BinKey;

#[test]
fn unit_decade_bounds() {
    let k = BinKey::of(1.0);
    assert_eq!(1.0, k.lower());
    assert!((k.upper() - 1.1).abs() < 1e-12);
}

#[test]
fn hundreds_decade_bounds() {
    let k = BinKey::of(250.0);
    assert_eq!(250.0, k.lower());
    assert_eq!(260.0, k.upper());
}

#[test]
fn relative_error_is_bounded_by_bin_resolution() {
    // bin width is 10^e / 10 and the lower bound at least 10^e, so the half-width
    // never exceeds 5% of any value in the bin
    let mut value = 0.01;
    while value < 1.0e6 {
        let k = BinKey::of(value);
        let half_width = (k.upper() - k.lower()) / 2.0;
        let relative = half_width / k.lower();
        assert!(
            relative <= 0.05 + 1e-9,
            "bin for {} has relative half-width {}",
            value,
            relative
        );
        value *= 1.618;
    }
}

#[test]
fn non_positive_and_non_finite_values_count_into_the_zero_bin() {
    let h = from_values(&[0.0, -3.0, f64::NAN]);
    assert_eq!(3, h.total_count());
    assert_eq!(1, h.bin_count());
    assert_eq!(0.0, h.min());
    assert_eq!(0.0, h.max());
}

#[test]
fn positive_infinity_clamps_to_max() {
    let h = from_values(&[f64::INFINITY]);
    assert_eq!(1, h.total_count());
    assert_eq!(1, h.bin_count());
    assert!(h.max().is_finite() || h.max() == f64::INFINITY);
    assert!(h.min() >= 1.0e308);
}
