use ndarray::Array1;

/// Mean squared error: (1/n) * Σ(y_true - y_pred)². `None` for empty input.
#[must_use]
pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Option<f64> {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return None;
    }
    let n = y_true.len() as f64;
    Some(
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum::<f64>()
            / n,
    )
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_mean_squared_error() {
        let mse = mean_squared_error(&array![1.0, 2.0, 3.0], &array![1.0, 4.0, 0.0]);
        assert_eq!(mse, Some(13.0 / 3.0));
    }

    #[test]
    fn test_mean_squared_error_empty() {
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(mean_squared_error(&empty, &empty), None);
        assert_eq!(mean_squared_error(&array![1.0], &empty), None);
    }
}
