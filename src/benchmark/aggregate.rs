use crate::error::{BenchError, Result};

/// Arithmetic mean of the samples.
///
/// The harness always samples a fixed, positive number of runs, so an empty
/// input is a caller bug and reported as `EmptyInput`.
pub fn mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(BenchError::EmptyInput);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 9.0]).unwrap(), 5.0);
        assert_eq!(mean(&[7.5]).unwrap(), 7.5);
        assert_eq!(mean(&[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_mean_is_sum_over_count() {
        let samples: Vec<f64> = (1..=10).map(|i| i as f64 * 1.5).collect();
        let expected = samples.iter().sum::<f64>() / 10.0;
        assert_eq!(mean(&samples).unwrap(), expected);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert!(matches!(mean(&[]), Err(BenchError::EmptyInput)));
    }
}
