use llhist::ApproximateHistogram;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn total_count_is_exact() {
    let mut h = ApproximateHistogram::<u64>::new();
    let mut rng = SmallRng::seed_from_u64(0x1157);
    for _ in 0..5_000 {
        h.insert(rng.gen_range(0.0..1.0e6));
    }
    h.insert(0.0);
    h.insert(f64::MAX);
    assert_eq!(5_002, h.total_count());
}

#[test]
fn bin_count_is_bounded_by_resolution_not_samples() {
    let mut h = ApproximateHistogram::<u64>::new();
    for i in 1..=100_000u32 {
        h.insert(f64::from(i));
    }
    // 90 bins per decade, five decades plus the single bin at 1e5
    assert!(h.bin_count() <= 451, "{} bins", h.bin_count());
    assert_eq!(100_000, h.total_count());
}

#[test]
fn insert_n_matches_repeated_insert() {
    let mut a = ApproximateHistogram::<u64>::new();
    let mut b = ApproximateHistogram::<u64>::new();
    for _ in 0..17 {
        a.insert(42.0);
    }
    b.insert_n(42.0, 17);
    assert_eq!(a, b);
}

#[test]
fn merge_is_commutative() {
    let mut left = histogram_of(&[1.0, 5.0, 5.0, 120.0]);
    let mut right = histogram_of(&[0.0, 5.0, 9000.0]);
    let other_left = left.clone();

    left.merge_from(&right);
    right.merge_from(&other_left);
    assert_eq!(left, right);
    assert_eq!(left.quantile(50.0), right.quantile(50.0));
    assert_eq!(left.count_below(100.0), right.count_below(100.0));
}

#[test]
fn merge_is_associative() {
    let a = histogram_of(&[1.0, 2.0, 3.0]);
    let b = histogram_of(&[10.0, 20.0]);
    let c = histogram_of(&[0.5, 300.0, 300.0]);

    // (a + b) + c
    let mut ab = a.clone();
    ab.merge_from(&b);
    let mut ab_c = ab;
    ab_c.merge_from(&c);

    // a + (b + c)
    let mut bc = b.clone();
    bc.merge_from(&c);
    let mut a_bc = a.clone();
    a_bc.merge_from(&bc);

    assert_eq!(ab_c, a_bc);
}

#[test]
fn merge_matches_single_histogram_of_all_samples() {
    let mut rng = SmallRng::seed_from_u64(0xb125);
    let values: Vec<f64> = (0..2_000).map(|_| rng.gen_range(0.0..1.0e4)).collect();

    let mut combined = ApproximateHistogram::<u64>::new();
    let mut shards = vec![ApproximateHistogram::<u64>::new(); 4];
    for (i, &value) in values.iter().enumerate() {
        combined.insert(value);
        shards[i % 4].insert(value);
    }

    let mut merged = ApproximateHistogram::<u64>::new();
    for shard in &shards {
        merged.merge_from(shard);
    }
    assert_eq!(combined, merged);
    assert_eq!(combined.total_count(), merged.total_count());
}

#[test]
fn add_assign_records_and_merges() {
    let mut h = ApproximateHistogram::<u64>::new();
    h += 5.0;
    h += 5.0;

    let other = histogram_of(&[7.0]);
    h += &other;
    assert_eq!(3, h.total_count());
    assert_eq!(2, h.bin_count());
}

#[test]
fn narrow_counters_saturate_but_keep_exact_totals() {
    let mut h = ApproximateHistogram::<u8>::new();
    for _ in 0..300 {
        h.insert(10.0);
    }
    assert_eq!(300, h.total_count());
    let bin = h.iter_recorded().next().unwrap();
    assert_eq!(255u8, bin.count());
}

#[test]
fn iteration_walks_bins_in_ascending_order_with_running_totals() {
    let h = histogram_of(&[0.0, 0.0, 3.0, 3.0, 3.0, 70.0]);

    let items: Vec<_> = h.iter_recorded().collect();
    assert_eq!(3, items.len());

    // zero bin first
    assert_eq!(0.0, items[0].value_lower());
    assert_eq!(0.0, items[0].value_upper());
    assert_eq!(2, items[0].count());
    assert_eq!(2, items[0].running_total());

    assert_eq!(3.0, items[1].value_lower());
    assert_eq!(3, items[1].count());
    assert_eq!(5, items[1].running_total());

    assert_eq!(70.0, items[2].value_lower());
    assert_eq!(6, items[2].running_total());
    assert!((items[2].quantile() - 100.0).abs() < 1e-9);

    let lowers: Vec<f64> = items.iter().map(|i| i.value_lower()).collect();
    let mut sorted = lowers.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(lowers, sorted);
}

#[test]
fn serde_round_trip_preserves_bins() {
    let h = histogram_of(&[0.0, 1.0, 1.0, 250.0, 1.0e6]);
    let json = serde_json::to_string(&h).unwrap();
    let back: ApproximateHistogram<u64> = serde_json::from_str(&json).unwrap();
    assert_eq!(h, back);
    assert_eq!(h.quantile(50.0), back.quantile(50.0));
}

fn histogram_of(values: &[f64]) -> ApproximateHistogram<u64> {
    let mut h = ApproximateHistogram::new();
    for &value in values {
        h.insert(value);
    }
    h
}
