use std::fmt;

use ahash::HashSet;

/// Synthetic token standing before the first real token of a sequence.
pub const START_MARKER: &str = "<SOS>";

/// Joins the tokens of a bigram or trigram.
///
/// A token containing it can spell the same string as a longer gram; the
/// vocabulary keeps such a string at its first index only.
pub const NGRAM_SEPARATOR: &str = " ";

/// Possessive suffixes that tokenizers split off as standalone tokens.
/// The second entry is the UTF-8 right single quotation mark decoded as cp1252.
pub const DEFAULT_STOP_TOKENS: [&str; 2] = ["'s", "\u{e2}\u{20ac}\u{2122}s"];

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NgramOrder {
    Uni,
    Bi,
    Tri,
}

impl NgramOrder {
    /// Orders in vocabulary block order.
    pub const ALL: [Self; 3] = [Self::Uni, Self::Bi, Self::Tri];
}

impl fmt::Display for NgramOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uni => write!(f, "unigram"),
            Self::Bi => write!(f, "bigram"),
            Self::Tri => write!(f, "trigram"),
        }
    }
}

/// Tokens dropped before n-gram formation. Empty tokens are always dropped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopList {
    tokens: HashSet<String>,
}

impl StopList {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            tokens: HashSet::default(),
        }
    }

    #[must_use]
    pub fn is_skipped(&self, token: &str) -> bool {
        token.is_empty() || self.tokens.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for StopList {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_TOKENS)
    }
}

/// The uni-, bi- and trigrams of one token sequence, each in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ngrams {
    pub uni: Vec<String>,
    pub bi: Vec<String>,
    pub tri: Vec<String>,
}

impl Ngrams {
    #[must_use]
    pub fn get(&self, order: NgramOrder) -> &[String] {
        match order {
            NgramOrder::Uni => &self.uni,
            NgramOrder::Bi => &self.bi,
            NgramOrder::Tri => &self.tri,
        }
    }

    /// Every gram of every order, unigrams first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uni
            .iter()
            .chain(&self.bi)
            .chain(&self.tri)
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uni.is_empty()
    }
}

/// Extract unigrams, bigrams and trigrams from a token sequence.
///
/// Stop-listed tokens are removed before adjacency is considered, so the tokens
/// on either side of a dropped token form a bigram. The first bigram and first
/// trigram start with [`START_MARKER`].
pub fn extract_ngrams<T: AsRef<str>>(tokens: &[T], stop_list: &StopList) -> Ngrams {
    let mut ngrams = Ngrams {
        uni: Vec::with_capacity(tokens.len()),
        bi: Vec::with_capacity(tokens.len()),
        tri: Vec::with_capacity(tokens.len().saturating_sub(1)),
    };

    let mut prev_prev: Option<&str> = None;
    let mut prev = START_MARKER;

    for token in tokens.iter().map(AsRef::as_ref) {
        if stop_list.is_skipped(token) {
            continue;
        }

        ngrams.uni.push(token.to_owned());
        ngrams.bi.push(join(&[prev, token]));
        if let Some(prev_prev) = prev_prev {
            ngrams.tri.push(join(&[prev_prev, prev, token]));
        }

        prev_prev = Some(prev);
        prev = token;
    }
    ngrams
}

fn join(parts: &[&str]) -> String {
    parts.join(NGRAM_SEPARATOR)
}
