use pledge_pre_processing::pre_processor::{CategorySelector, VectorizerParams};

use crate::error::ModelError;

/// Share of a category's records used for training; the rest is held out.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.9;

/// Records whose n-grams feed a category's vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VocabularyScope {
    /// Records whose first label is the category
    #[default]
    Primary,
    /// Records carrying the category label anywhere
    AnyLabel,
}

impl VocabularyScope {
    #[must_use]
    pub fn selector(self, category: &str) -> CategorySelector {
        match self {
            Self::Primary => CategorySelector::primary(category),
            Self::AnyLabel => CategorySelector::any_label(category),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelParams {
    vectorizer: VectorizerParams,
    vocabulary_scope: VocabularyScope,
    train_fraction: f64,
    /// Score MSE on the held-out split
    validate: bool,
    /// Append the goal amount as a final feature column
    include_goal: bool,
    /// Log this many most common grams per order while aggregating
    diagnostics: Option<usize>,
    /// Draw a progress bar while fitting several categories
    progress: bool,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerParams::default(),
            vocabulary_scope: VocabularyScope::default(),
            train_fraction: DEFAULT_TRAIN_FRACTION,
            validate: false,
            include_goal: false,
            diagnostics: None,
            progress: true,
        }
    }
}

impl ModelParams {
    #[must_use]
    pub fn with_vectorizer(mut self, vectorizer: VectorizerParams) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    #[must_use]
    pub fn with_vocabulary_scope(mut self, scope: VocabularyScope) -> Self {
        self.vocabulary_scope = scope;
        self
    }

    #[must_use]
    pub fn with_train_fraction(mut self, train_fraction: f64) -> Self {
        self.train_fraction = train_fraction;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    #[must_use]
    pub fn with_goal_feature(mut self, include_goal: bool) -> Self {
        self.include_goal = include_goal;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, top_n: Option<usize>) -> Self {
        self.diagnostics = top_n;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn vectorizer(&self) -> &VectorizerParams {
        &self.vectorizer
    }

    #[must_use]
    pub fn vocabulary_scope(&self) -> VocabularyScope {
        self.vocabulary_scope
    }

    #[must_use]
    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    #[must_use]
    pub fn validate(&self) -> bool {
        self.validate
    }

    #[must_use]
    pub fn include_goal(&self) -> bool {
        self.include_goal
    }

    #[must_use]
    pub fn diagnostics(&self) -> Option<usize> {
        self.diagnostics
    }

    #[must_use]
    pub fn progress(&self) -> bool {
        self.progress
    }

    /// Number of leading rows that go to training: `floor(rows * train_fraction)`.
    pub fn split_point(&self, rows: usize) -> Result<usize, ModelError> {
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(ModelError::InvalidTrainFraction(self.train_fraction));
        }
        Ok(((rows as f64) * self.train_fraction) as usize)
    }
}
