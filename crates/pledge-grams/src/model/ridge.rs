//! Ridge regression (L2 regularization)
//!
//! Minimizes: ||y - Xβ||² + α||β||²
//!
//! With an intercept the columns of X and y are centered first, so the
//! intercept itself is not penalized.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use super::{LinearFit, Regressor};
use crate::error::ModelError;

/// Regularization strength used for pledge models.
pub const DEFAULT_ALPHA: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeRegression {
    /// Regularization strength (alpha)
    alpha: f64,
    fit_intercept: bool,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl RidgeRegression {
    /// Ridge model with an intercept.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fit_intercept: true,
        }
    }

    #[must_use]
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Solve the symmetric positive definite system `a · x = b` by Cholesky decomposition.
    fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        let n = a.nrows();

        let mut l = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..=i {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += l[[i, k]] * l[[j, k]];
                }

                if i == j {
                    let diag = a[[i, i]] - sum;
                    if diag <= 0.0 {
                        return Err(ModelError::Computation(
                            "matrix not positive definite".to_string(),
                        ));
                    }
                    l[[i, j]] = diag.sqrt();
                } else {
                    l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
                }
            }
        }

        // L · z = b
        let mut z = Array1::<f64>::zeros(n);
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += l[[i, j]] * z[j];
            }
            z[i] = (b[i] - sum) / l[[i, i]];
        }

        // Lᵀ · x = z
        let mut x = Array1::<f64>::zeros(n);
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += l[[j, i]] * x[j];
            }
            x[i] = (z[i] - sum) / l[[i, i]];
        }

        Ok(x)
    }
}

impl Regressor for RidgeRegression {
    /// Closed form: β = (X'X + αI)^(-1) X'y
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearFit, ModelError> {
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(ModelError::InvalidAlpha(self.alpha));
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(ModelError::EmptyInput);
        }

        let n_features = x.ncols();
        let (x_mean, y_mean) = if self.fit_intercept {
            (
                x.mean_axis(Axis(0)).ok_or(ModelError::EmptyInput)?,
                y.mean().ok_or(ModelError::EmptyInput)?,
            )
        } else {
            (Array1::zeros(n_features), 0.0)
        };
        let x_centered = x - &x_mean;
        let y_centered = y - y_mean;

        let mut xtx = x_centered.t().dot(&x_centered);
        for i in 0..n_features {
            xtx[[i, i]] += self.alpha;
        }
        let xty = x_centered.t().dot(&y_centered);

        debug!(
            alpha = self.alpha,
            n_samples = x.nrows(),
            n_features,
            "Solving ridge normal equations"
        );
        let coefficients = Self::solve(&xtx, &xty)?;

        let intercept = if self.fit_intercept {
            y_mean - x_mean.dot(&coefficients)
        } else {
            0.0
        };

        Ok(LinearFit {
            coefficients,
            intercept,
        })
    }
}
