mod aggregator;
mod frequency;
mod ngrams;
mod params;
mod presence_vectorizer;
mod vocabulary;

pub use aggregator::{aggregate, aggregate_with_diagnostics};
pub use frequency::{FrequencyDistribution, NgramFrequencies};
pub use ngrams::{
    DEFAULT_STOP_TOKENS, NGRAM_SEPARATOR, NgramOrder, Ngrams, START_MARKER, StopList,
    extract_ngrams,
};
pub use params::{Cutoffs, VectorizerParams};
pub use presence_vectorizer::PresenceVectorizer;
pub use vocabulary::Vocabulary;
