use crate::ApproximateHistogram;

pub fn from_values(values: &[f64]) -> ApproximateHistogram<u64> {
    let mut h = ApproximateHistogram::new();
    for &value in values {
        h.insert(value);
    }
    h
}
