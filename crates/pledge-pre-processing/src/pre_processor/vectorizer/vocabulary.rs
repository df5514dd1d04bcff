use std::ops::Range;

use ahash::HashMap;
use tracing::debug;

use super::{
    frequency::NgramFrequencies,
    ngrams::NgramOrder,
    params::Cutoffs,
};

/// Ordered bijection between n-grams and dense feature indices.
///
/// Indices are laid out in three contiguous blocks, unigrams, then bigrams,
/// then trigrams, each block ranked by descending frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    /// N-gram to feature index
    forward: HashMap<String, usize>,
    /// Feature index to n-gram
    reverse: Vec<String>,
    /// Exclusive end index of the uni and bi blocks
    block_ends: [usize; 2],
}

impl Vocabulary {
    /// Take the `cutoffs` most frequent grams of each order.
    ///
    /// A cutoff larger than the number of distinct grams takes all of them.
    /// A gram already indexed by a lower order is not indexed again.
    #[must_use]
    pub fn build(frequencies: &NgramFrequencies, cutoffs: &Cutoffs) -> Self {
        let mut forward = HashMap::default();
        let mut reverse = Vec::new();
        let mut block_ends = [0; 2];

        for order in NgramOrder::ALL {
            for (gram, _) in frequencies.get(order).most_common(cutoffs.get(order)) {
                // a token holding the separator can spell a longer gram; first index wins
                if forward.contains_key(gram) {
                    continue;
                }
                forward.insert(gram.to_owned(), reverse.len());
                reverse.push(gram.to_owned());
            }
            match order {
                NgramOrder::Uni => block_ends[0] = reverse.len(),
                NgramOrder::Bi => block_ends[1] = reverse.len(),
                NgramOrder::Tri => {}
            }
        }

        debug!(
            vocab_size = reverse.len(),
            unigrams = block_ends[0],
            bigrams = block_ends[1] - block_ends[0],
            trigrams = reverse.len() - block_ends[1],
            "Vocabulary built"
        );

        Self {
            forward,
            reverse,
            block_ends,
        }
    }

    #[must_use]
    pub fn index_of(&self, gram: &str) -> Option<usize> {
        self.forward.get(gram).copied()
    }

    #[must_use]
    pub fn gram(&self, index: usize) -> Option<&str> {
        self.reverse.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, gram: &str) -> bool {
        self.forward.contains_key(gram)
    }

    /// Index range occupied by one order's grams.
    #[must_use]
    pub fn block(&self, order: NgramOrder) -> Range<usize> {
        match order {
            NgramOrder::Uni => 0..self.block_ends[0],
            NgramOrder::Bi => self.block_ends[0]..self.block_ends[1],
            NgramOrder::Tri => self.block_ends[1]..self.reverse.len(),
        }
    }

    /// Order of the gram stored at `index`.
    #[must_use]
    pub fn order_of(&self, index: usize) -> Option<NgramOrder> {
        NgramOrder::ALL
            .into_iter()
            .find(|&order| self.block(order).contains(&index))
    }

    /// Grams in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.reverse.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
