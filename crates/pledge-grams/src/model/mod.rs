use ndarray::{Array1, Array2};

use crate::error::ModelError;

mod metrics;
mod ridge;

pub use metrics::mean_squared_error;
pub use ridge::{DEFAULT_ALPHA, RidgeRegression};

/// A linear regression fitting routine.
///
/// Implementations receive the training feature matrix (one row per record)
/// and the label vector, and return one coefficient per column plus an intercept.
pub trait Regressor {
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearFit, ModelError>;
}

/// Coefficients and intercept of a fitted linear model.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl LinearFit {
    /// `x · coefficients + intercept` for every row of `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if x.ncols() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                got: x.ncols(),
            });
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}
