use std::fmt;

use crate::record::Record;

/// Category name that selects every record.
pub const ALL_CATEGORIES: &str = "all";

/// Which records a pipeline step looks at.
///
/// The two label modes are deliberately distinct: `AnyLabel` matches a label
/// anywhere in a record's category list, `Primary` only its first label.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategorySelector {
    All,
    AnyLabel(String),
    Primary(String),
}

impl CategorySelector {
    /// `Primary(category)`, or `All` for [`ALL_CATEGORIES`].
    #[must_use]
    pub fn primary(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Primary(category.to_owned())
        }
    }

    /// `AnyLabel(category)`, or `All` for [`ALL_CATEGORIES`].
    #[must_use]
    pub fn any_label(category: &str) -> Self {
        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::AnyLabel(category.to_owned())
        }
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::AnyLabel(label) => record.has_category(label),
            Self::Primary(label) => record.primary_category() == Some(label.as_str()),
        }
    }

    /// The selected records, in input order.
    /// The iterator owns a copy of the selector, so it may outlive `self`.
    pub fn select<'r>(&self, records: &'r [Record]) -> impl Iterator<Item = &'r Record> + use<'r> {
        let selector = self.clone();
        records.iter().filter(move |record| selector.matches(record))
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_CATEGORIES}"),
            Self::AnyLabel(label) => write!(f, "any:{label}"),
            Self::Primary(label) => write!(f, "primary:{label}"),
        }
    }
}
