//! # pledge-grams
//!
//! Which words sell a crowdfunding campaign?
//!
//! For each category this crate builds a vocabulary of the most frequent
//! unigrams, bigrams and trigrams in campaign descriptions, encodes every
//! campaign as a binary presence vector, fits a ridge regression on the pledged
//! amount and ranks the n-grams by their fitted coefficient.
//!
//! ## Quick Start
//!
//! ```rust
//! use pledge_grams::{Analyzer, Record};
//!
//! let records = (0..10)
//!     .map(|i| {
//!         let tokens = if i % 2 == 0 { ["indie", "game"] } else { ["board", "game"] };
//!         Record::new(["games"], "", tokens, 100.0 * f64::from(i), 1000.0)
//!     })
//!     .collect::<Vec<_>>();
//!
//! let report = Analyzer::new().analyze(&records, "games")?;
//! for impact in report.strongest(3) {
//!     println!("{impact}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Custom Settings
//!
//! ```rust
//! use pledge_grams::{Analyzer, Cutoffs};
//!
//! let analyzer = Analyzer::new()
//!     .with_alpha(10.0)
//!     .with_cutoffs(Cutoffs::new(100, 50, 10))
//!     .with_validation(true)
//!     .with_goal_feature(true);
//! assert!((analyzer.alpha() - 10.0).abs() < f64::EPSILON);
//! ```

#[cfg(feature = "cli")]
pub mod cli;

mod error;
mod model;
mod params;
mod pipeline;
mod report;

use anyhow::Context;
pub use error::ModelError;
pub use model::{DEFAULT_ALPHA, LinearFit, Regressor, RidgeRegression, mean_squared_error};
pub use params::{DEFAULT_TRAIN_FRACTION, ModelParams, VocabularyScope};
pub use pipeline::{
    FeatureSet, analyze_categories, build_features, create_model, top_categories,
};
pub use pledge_pre_processing::{
    Record,
    pre_processor::{Cutoffs, StopList, VectorizerParams},
};
pub use report::{CategoryReport, GramImpact};

/// Builder for running category analyses with a ridge model.
///
/// # Examples
///
/// ```rust
/// use pledge_grams::{Analyzer, Record};
///
/// let records = vec![
///     Record::new(["art"], "", ["mural"], 500.0, 400.0),
///     Record::new(["art"], "", ["zine"], 50.0, 400.0),
/// ];
/// // Two rows leave a single training row at the default 90% split
/// let report = Analyzer::new().analyze(&records, "art")?;
/// assert_eq!(report.train_rows, 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    params: ModelParams,
    ridge: RidgeRegression,
}

impl Analyzer {
    /// Analyzer with the default ridge strength and vocabulary cutoffs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: ModelParams::default(),
            ridge: RidgeRegression::default(),
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.ridge = RidgeRegression::new(alpha);
        self
    }

    #[must_use]
    pub fn with_cutoffs(mut self, cutoffs: impl Into<Cutoffs>) -> Self {
        let vectorizer = self.params.vectorizer().clone().with_cutoffs(cutoffs);
        self.params = self.params.with_vectorizer(vectorizer);
        self
    }

    #[must_use]
    pub fn with_stop_list(mut self, stop_list: StopList) -> Self {
        let vectorizer = self.params.vectorizer().clone().with_stop_list(stop_list);
        self.params = self.params.with_vectorizer(vectorizer);
        self
    }

    #[must_use]
    pub fn with_train_fraction(mut self, train_fraction: f64) -> Self {
        self.params = self.params.with_train_fraction(train_fraction);
        self
    }

    /// Score mean squared error on the held-out rows.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.params = self.params.with_validation(validate);
        self
    }

    /// Append the goal amount as a feature and report its coefficient.
    #[must_use]
    pub fn with_goal_feature(mut self, include_goal: bool) -> Self {
        self.params = self.params.with_goal_feature(include_goal);
        self
    }

    #[must_use]
    pub fn with_vocabulary_scope(mut self, scope: VocabularyScope) -> Self {
        self.params = self.params.with_vocabulary_scope(scope);
        self
    }

    /// Log the `top_n` most common grams of each order while building vocabularies.
    #[must_use]
    pub fn with_diagnostics(mut self, top_n: Option<usize>) -> Self {
        self.params = self.params.with_diagnostics(top_n);
        self
    }

    /// Draw a progress bar while fitting several categories (on by default).
    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.params = self.params.with_progress(progress);
        self
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.ridge.alpha()
    }

    #[must_use]
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Fit and report a single category (`all` for every record).
    pub fn analyze(&self, records: &[Record], category: &str) -> anyhow::Result<CategoryReport> {
        create_model(records, category, &self.params, &self.ridge)
            .with_context(|| format!("Failed to model category '{category}'"))
    }

    /// Fit and report several categories, in the given order.
    pub fn analyze_categories<S: AsRef<str> + Sync>(
        &self,
        records: &[Record],
        categories: &[S],
    ) -> anyhow::Result<Vec<CategoryReport>> {
        analyze_categories(records, categories, &self.params, &self.ridge)
            .into_iter()
            .zip(categories)
            .map(|(result, category)| {
                result.with_context(|| format!("Failed to model category '{}'", category.as_ref()))
            })
            .collect()
    }

    /// Fit and report the `n` most common category labels.
    pub fn analyze_top_categories(
        &self,
        records: &[Record],
        n: usize,
    ) -> anyhow::Result<Vec<CategoryReport>> {
        let categories = top_categories(records, n)
            .into_iter()
            .map(|(category, _)| category)
            .collect::<Vec<_>>();
        self.analyze_categories(records, &categories)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new(["games"], "", ["indie", "game"], 900.0, 100.0),
            Record::new(["games"], "", ["board", "game"], 100.0, 100.0),
            Record::new(["art", "games"], "", ["mural"], 300.0, 100.0),
            Record::new(["art"], "", ["zine"], 30.0, 100.0),
        ]
    }

    #[test]
    fn test_builder_settings() {
        let analyzer = Analyzer::new()
            .with_alpha(5.0)
            .with_cutoffs((1, 2, 3))
            .with_train_fraction(0.5)
            .with_validation(true)
            .with_goal_feature(true);

        assert!((analyzer.alpha() - 5.0).abs() < f64::EPSILON);
        assert_eq!(analyzer.params().vectorizer().cutoffs(), Cutoffs::new(1, 2, 3));
        assert!((analyzer.params().train_fraction() - 0.5).abs() < f64::EPSILON);
        assert!(analyzer.params().validate());
        assert!(analyzer.params().include_goal());
    }

    #[test]
    fn test_default_alpha() {
        assert!((Analyzer::default().alpha() - DEFAULT_ALPHA).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_names_category() {
        let err = Analyzer::new()
            .analyze(&records(), "dance")
            .expect_err("no dance records");
        assert!(err.to_string().contains("dance"));
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_analyze_top_categories() {
        let reports = Analyzer::new()
            .with_train_fraction(1.0)
            .analyze_top_categories(&records(), 2)
            .expect("both categories have rows");
        let categories = reports.iter().map(|r| r.category.as_str()).collect::<Vec<_>>();
        assert_eq!(categories, ["games", "art"]);
    }
}
