/// One crowdfunding campaign.
///
/// Records are immutable once built. `tokens` is the pre-tokenized description
/// (serialized as `text_feats`), `text` is the raw description kept for display.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Category labels, primary label first
    #[cfg_attr(feature = "serde", serde(default))]
    category: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    text: String,
    #[cfg_attr(feature = "serde", serde(rename = "text_feats", default))]
    tokens: Vec<String>,
    pledged: f64,
    goal: f64,
}

impl Record {
    pub fn new<C, T>(category: C, text: impl Into<String>, tokens: T, pledged: f64, goal: f64) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            category: category.into_iter().map(Into::into).collect(),
            text: text.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            pledged,
            goal,
        }
    }

    #[must_use]
    pub fn category(&self) -> &[String] {
        &self.category
    }

    /// The first category label, `None` when the record carries no labels.
    #[must_use]
    pub fn primary_category(&self) -> Option<&str> {
        self.category.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_category(&self, label: &str) -> bool {
        self.category.iter().any(|c| c == label)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn pledged(&self) -> f64 {
        self.pledged
    }

    #[must_use]
    pub fn goal(&self) -> f64 {
        self.goal
    }
}
