//! Completion scoring for multi-step forms.

/// Fraction of satisfied conditions, in `[0, 1]`.
///
/// Each condition contributes an equal share. When every condition holds the
/// result is exactly `1.0`. An empty condition set scores `0.0`.
pub fn progress_score(conditions: &[bool]) -> f64 {
    if conditions.is_empty() {
        return 0.0;
    }
    let satisfied = conditions.iter().filter(|done| **done).count();
    satisfied as f64 / conditions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_met() {
        assert_eq!(progress_score(&[false, false, false]), 0.0);
    }

    #[test]
    fn test_all_met_is_exactly_one() {
        assert_eq!(progress_score(&[true, true, true]), 1.0);
        assert_eq!(progress_score(&[true; 7]), 1.0);
    }

    #[test]
    fn test_one_of_three() {
        let score = progress_score(&[false, true, false]);
        assert!((score - 0.33).abs() < 0.01);
    }

    #[test]
    fn test_empty_conditions() {
        assert_eq!(progress_score(&[]), 0.0);
    }
}
