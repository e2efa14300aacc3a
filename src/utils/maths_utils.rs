use argminmax::ArgMinMax;

/// Mean and population standard deviation in one pass over the data.
/// Returns `(0.0, 0.0)` for an empty slice.
#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let sum: f64 = data.iter().sum();
    let mean = sum / count as f64;

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// SIMD-accelerated min/max scan. Caller guarantees a non-empty slice.
#[inline]
pub(crate) fn min_max(vec: &[f64]) -> (f64, f64) {
    let (min_index, max_index) = vec.argminmax();
    (vec[min_index], vec[max_index])
}
