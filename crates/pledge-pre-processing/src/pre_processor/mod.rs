mod selection;
mod vectorizer;

pub use selection::{ALL_CATEGORIES, CategorySelector};
pub use vectorizer::{
    Cutoffs, DEFAULT_STOP_TOKENS, FrequencyDistribution, NGRAM_SEPARATOR, NgramFrequencies,
    NgramOrder, Ngrams, PresenceVectorizer, START_MARKER, StopList, VectorizerParams, Vocabulary,
    aggregate, aggregate_with_diagnostics, extract_ngrams,
};
