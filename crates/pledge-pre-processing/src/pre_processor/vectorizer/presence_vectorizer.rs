use sprs::CsMat;
use tracing::debug;

use super::{
    aggregator,
    ngrams::{self, StopList},
    params::VectorizerParams,
    vocabulary::Vocabulary,
};
use crate::{pre_processor::CategorySelector, record::Record};

/// Binary bag-of-n-grams encoder over a fixed [`Vocabulary`].
///
/// The vocabulary size, and therefore the vector length, never changes after
/// construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct PresenceVectorizer {
    vocab: Vocabulary,
    /// Stop list used to build `vocab`; reused so vectorized grams line up
    stop_list: StopList,
}

impl PresenceVectorizer {
    #[must_use]
    pub fn new(vocab: Vocabulary, stop_list: StopList) -> Self {
        Self { vocab, stop_list }
    }

    /// Build the vocabulary from the records matched by `selector`.
    #[must_use]
    pub fn fit(records: &[Record], selector: &CategorySelector, params: &VectorizerParams) -> Self {
        debug!(%selector, num_records = records.len(), "Fitting PresenceVectorizer");
        let frequencies = aggregator::aggregate(records, selector, params.stop_list());
        Self::new(
            Vocabulary::build(&frequencies, &params.cutoffs()),
            params.stop_list().clone(),
        )
    }

    /// Presence vector of one token sequence: slot `i` is 1 iff the gram at
    /// vocabulary index `i` occurs anywhere in `tokens`.
    #[must_use]
    pub fn vectorize<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<u8> {
        let mut features = vec![0u8; self.num_features()];
        for index in self.present_indices(tokens) {
            features[index] = 1;
        }
        features
    }

    /// Sorted, deduplicated vocabulary indices present in `tokens`.
    fn present_indices<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<usize> {
        let ngrams = ngrams::extract_ngrams(tokens, &self.stop_list);
        let mut indices = ngrams
            .iter()
            .filter_map(|gram| self.vocab.index_of(gram))
            .collect::<Vec<_>>();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Feature matrix with one row per record, in input order.
    pub fn transform<'a, I>(&self, records: I) -> CsMat<f64>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut indptr = vec![0];
        let mut indices = Vec::new();
        let mut data = Vec::new();

        for record in records {
            let row = self.present_indices(record.tokens());
            data.extend(std::iter::repeat_n(1.0, row.len()));
            indices.extend(row);
            indptr.push(indices.len());
        }

        let num_rows = indptr.len() - 1;
        debug!(
            num_rows,
            num_features = self.num_features(),
            non_zero_entries = data.len(),
            "Records transformed to presence matrix"
        );
        CsMat::new((num_rows, self.num_features()), indptr, indices, data)
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    #[must_use]
    pub fn stop_list(&self) -> &StopList {
        &self.stop_list
    }
}
