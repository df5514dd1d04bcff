//! # pledge-pre-processing
//!
//! Word n-gram features for crowdfunding campaign descriptions.
//!
//! Records flow through four steps: [`extract_ngrams`](pre_processor::extract_ngrams)
//! per record, [`aggregate`](pre_processor::aggregate) across the records of a
//! category, [`Vocabulary::build`](pre_processor::Vocabulary::build) from the
//! top-K grams of each order, and
//! [`PresenceVectorizer`](pre_processor::PresenceVectorizer) to encode each record
//! as a fixed-length binary vector.
//!
//! ```rust
//! use pledge_pre_processing::{
//!     Record,
//!     pre_processor::{CategorySelector, PresenceVectorizer, VectorizerParams},
//! };
//!
//! let records = vec![
//!     Record::new(["games"], "", ["great", "indie", "games"], 1200.0, 1000.0),
//!     Record::new(["games"], "", ["indie", "games", "rock"], 300.0, 1000.0),
//! ];
//! let vectorizer = PresenceVectorizer::fit(
//!     &records,
//!     &CategorySelector::primary("games"),
//!     &VectorizerParams::default(),
//! );
//! let features = vectorizer.vectorize(records[0].tokens());
//! assert_eq!(features.len(), vectorizer.num_features());
//! ```

pub mod pre_processor;
mod record;

pub use record::Record;
