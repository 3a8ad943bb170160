//! Growth estimation from per-period EPS history.

/// Fewest EPS observations a trailing growth rate is derived from.
pub const MIN_GROWTH_PERIODS: usize = 3;

/// Compound annual growth rate between two positive observations.
///
/// Returns `None` when the ratio is undefined: non-positive or non-finite
/// endpoints, or a non-positive span.
pub fn cagr(earliest: f64, latest: f64, years: f64) -> Option<f64> {
    if !(earliest.is_finite() && latest.is_finite() && years.is_finite()) {
        return None;
    }
    if earliest <= 0.0 || latest <= 0.0 || years <= 0.0 {
        return None;
    }
    let rate = (latest / earliest).powf(1.0 / years) - 1.0;
    rate.is_finite().then_some(rate)
}

/// Trailing CAGR over the most recent `max_periods` annual EPS slots.
///
/// `newest_first` holds one slot per fiscal year, newest first, `None` for a
/// year whose EPS is missing or unreadable. Missing years still count toward
/// the elapsed span: the exponent is the distance in slots between the
/// newest and oldest readable values, not the number of readable values.
pub fn trailing_cagr(newest_first: &[Option<f64>], max_periods: usize) -> Option<f64> {
    let points = newest_first
        .iter()
        .copied()
        .take(max_periods.max(MIN_GROWTH_PERIODS))
        .enumerate()
        .filter_map(|(offset, eps)| Some((offset, eps.filter(|value| value.is_finite())?)))
        .collect::<Vec<_>>();

    if points.len() < MIN_GROWTH_PERIODS {
        return None;
    }

    let (latest_offset, latest) = *points.first()?;
    let (earliest_offset, earliest) = *points.last()?;
    cagr(earliest, latest, (earliest_offset - latest_offset) as f64)
}
