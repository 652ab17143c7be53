pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / n
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_error_means_zero_loss() {
        assert_eq!(MseLoss::loss(&[0.3, 0.7], &[0.3, 0.7]), 0.0);
    }

    #[test]
    fn derivative_is_signed_residual() {
        assert_eq!(MseLoss::derivative(&[1.0, 0.0], &[0.0, 1.0]), vec![1.0, -1.0]);
    }
}
