use core::fmt;

use pledge_pre_processing::pre_processor::NgramOrder;
use serde::Serialize;

/// Fitted coefficient of one vocabulary n-gram: the modelled change in pledged
/// amount when the n-gram is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GramImpact {
    pub gram: String,
    pub order: NgramOrder,
    pub coefficient: f64,
}

impl fmt::Display for GramImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<40} {:>12.2}", self.gram, self.coefficient)
    }
}

/// Outcome of fitting one category's model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub intercept: f64,
    /// Coefficient of the goal amount column, when it was included
    pub goal_coefficient: Option<f64>,
    /// Every vocabulary n-gram, strongest positive association first
    pub correlations: Vec<GramImpact>,
    /// Held-out mean squared error, when validation ran on a non-empty split
    pub mse: Option<f64>,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl CategoryReport {
    /// The `k` n-grams with the largest coefficients.
    #[must_use]
    pub fn strongest(&self, k: usize) -> &[GramImpact] {
        &self.correlations[..k.min(self.correlations.len())]
    }

    /// The `k` n-grams with the smallest coefficients, most negative first.
    pub fn weakest(&self, k: usize) -> impl Iterator<Item = &GramImpact> {
        self.correlations.iter().rev().take(k)
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.correlations.len()
    }
}

impl fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: intercept={:.2}, vocabulary={}, train={}, test={}",
            self.category,
            self.intercept,
            self.vocabulary_size(),
            self.train_rows,
            self.test_rows
        )?;
        if let Some(goal) = self.goal_coefficient {
            write!(f, ", goal={goal:.4}")?;
        }
        if let Some(mse) = self.mse {
            write!(f, ", mse={mse:.2}")?;
        }
        Ok(())
    }
}
