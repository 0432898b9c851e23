//! Summary statistics used when reducing metric samples.

/// Two-sided z quantile for the 95% confidence level.
const Z_95: f64 = 1.959_963_984_540_054;

/// Arithmetic mean, or `None` for an empty sample.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Unbiased sample standard deviation; zero below two samples.
pub fn sample_std_dev(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let Some(center) = mean(samples) else {
        return 0.0;
    };
    let sum_sq: f64 = samples
        .iter()
        .map(|sample| {
            let delta = sample - center;
            delta * delta
        })
        .sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Half-width of the confidence interval around the sample mean.
///
/// Fixed at the 95% level using the normal approximation `z * s / sqrt(n)`.
/// Fewer than two samples yield a zero half-width.
pub fn confidence_half_width(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    Z_95 * sample_std_dev(samples) / (n as f64).sqrt()
}
