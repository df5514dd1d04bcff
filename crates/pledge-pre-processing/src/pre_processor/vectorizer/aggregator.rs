use tracing::{debug, info};

use super::{
    frequency::NgramFrequencies,
    ngrams::{self, NgramOrder, StopList},
};
use crate::{pre_processor::CategorySelector, record::Record};

/// Count the n-grams of every selected record, one distribution per order.
pub fn aggregate(
    records: &[Record],
    selector: &CategorySelector,
    stop_list: &StopList,
) -> NgramFrequencies {
    let mut frequencies = NgramFrequencies::new();
    let mut selected = 0usize;

    for record in selector.select(records) {
        let ngrams = ngrams::extract_ngrams(record.tokens(), stop_list);
        frequencies.add_ngrams(&ngrams);
        selected += 1;
    }

    debug!(
        %selector,
        selected,
        unigrams = frequencies.uni.len(),
        bigrams = frequencies.bi.len(),
        trigrams = frequencies.tri.len(),
        "Aggregated n-gram frequencies"
    );
    frequencies
}

/// Same as [`aggregate`], additionally logging the `top_n` grams of each order.
pub fn aggregate_with_diagnostics(
    records: &[Record],
    selector: &CategorySelector,
    stop_list: &StopList,
    top_n: usize,
) -> NgramFrequencies {
    let frequencies = aggregate(records, selector, stop_list);
    log_most_common(&frequencies, selector, top_n);
    frequencies
}

fn log_most_common(frequencies: &NgramFrequencies, selector: &CategorySelector, top_n: usize) {
    for order in NgramOrder::ALL {
        for (rank, (gram, count)) in frequencies.get(order).most_common(top_n).into_iter().enumerate() {
            info!(%selector, %order, rank = rank + 1, gram, count, "Most common n-gram");
        }
    }
}
