use super::ApproximateHistogram;

mod helpers;
mod value_calculation;

use self::helpers::from_values;

#[test]
fn new_histogram_is_empty() {
    let h = ApproximateHistogram::<u64>::new();
    assert!(h.is_empty());
    assert_eq!(0, h.total_count());
    assert_eq!(0, h.bin_count());
}

#[test]
fn repeated_value_occupies_one_bin() {
    let mut h = ApproximateHistogram::<u64>::new();
    for _ in 0..10_000 {
        h.insert(42.0);
    }
    assert_eq!(1, h.bin_count());
    assert_eq!(10_000, h.total_count());
}

#[test]
fn clear_retains_nothing() {
    let mut h = from_values(&[1.0, 2.0, 3.0]);
    h.clear();
    assert!(h.is_empty());
    assert_eq!(0, h.bin_count());
    assert_eq!(0.0, h.quantile(50.0));
}
