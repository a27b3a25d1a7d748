/// Min-max normalizes a series to `[0, 1]`. A degenerate series — all
/// values missing, or `max <= min` — normalizes to all zeros rather than
/// producing NaN or division by zero.
pub fn normalize_01(values: &[Option<f64>]) -> Vec<f64> {
    let finite: Vec<f64> = values.iter().filter_map(|v| v.filter(|x| x.is_finite())).collect();
    if finite.is_empty() {
        return vec![0.0; values.len()];
    }
    let min = finite.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => (x - min) / (max - min),
            _ => 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_unit_range() {
        let out = normalize_01(&[Some(0.0), Some(5.0), Some(10.0)]);
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn all_missing_is_all_zero() {
        let out = normalize_01(&[None, None]);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn constant_series_is_all_zero() {
        let out = normalize_01(&[Some(3.0), Some(3.0), Some(3.0)]);
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_entries_fill_with_zero_after_scaling() {
        let out = normalize_01(&[Some(0.0), None, Some(10.0)]);
        assert_eq!(out, vec![0.0, 0.0, 1.0]);
    }
}
