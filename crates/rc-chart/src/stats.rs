//! Summary statistics over partially-known values.

/// Min / median / max plus count and total of the known values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Summarize the `Some` values of `values`, ignoring `NaN`.
/// Returns `None` if nothing is left.
pub fn summarize<I>(values: I) -> Option<Summary>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut known: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
    if known.is_empty() {
        return None;
    }
    known.sort_by(f64::total_cmp);

    let count = known.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (known[mid - 1] + known[mid]) / 2.0
    } else {
        known[mid]
    };

    Some(Summary {
        count,
        total: known.iter().sum(),
        min: known[0],
        median,
        max: known[count - 1],
    })
}
