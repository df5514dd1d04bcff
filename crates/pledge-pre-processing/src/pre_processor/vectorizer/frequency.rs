use indexmap::IndexMap;

use super::ngrams::{NgramOrder, Ngrams};

/// Occurrence counts keyed by string, remembering first-insertion order.
///
/// [`most_common`](Self::most_common) sorts by descending count and breaks ties
/// by first insertion, so rankings are deterministic for a given input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyDistribution {
    counts: IndexMap<String, usize, ahash::RandomState>,
}

impl FrequencyDistribution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl AsRef<str>) {
        self.add_count(key, 1);
    }

    pub fn add_count(&mut self, key: impl AsRef<str>, count: usize) {
        let key = key.as_ref();
        if let Some(existing) = self.counts.get_mut(key) {
            *existing += count;
        } else {
            self.counts.insert(key.to_owned(), count);
        }
    }

    /// Fold another distribution into this one by adding counts.
    ///
    /// Keys new to `self` are appended in `other`'s order, so merging partial
    /// distributions left to right keeps the same tie-break as a single pass.
    pub fn merge(&mut self, other: &Self) {
        for (key, &count) in &other.counts {
            self.add_count(key, count);
        }
    }

    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` most frequent keys, or every key when fewer than `n` exist.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked = self
            .counts
            .iter()
            .map(|(key, &count)| (key.as_str(), count))
            .collect::<Vec<_>>();
        // stable: equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyDistribution {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dist = Self::new();
        dist.extend(iter);
        dist
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyDistribution {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

/// One frequency distribution per n-gram order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NgramFrequencies {
    pub uni: FrequencyDistribution,
    pub bi: FrequencyDistribution,
    pub tri: FrequencyDistribution,
}

impl NgramFrequencies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, order: NgramOrder) -> &FrequencyDistribution {
        match order {
            NgramOrder::Uni => &self.uni,
            NgramOrder::Bi => &self.bi,
            NgramOrder::Tri => &self.tri,
        }
    }

    /// Count every gram of one record; repeats within the record count each time.
    pub fn add_ngrams(&mut self, ngrams: &Ngrams) {
        self.uni.extend(&ngrams.uni);
        self.bi.extend(&ngrams.bi);
        self.tri.extend(&ngrams.tri);
    }

    pub fn merge(&mut self, other: &Self) {
        self.uni.merge(&other.uni);
        self.bi.merge(&other.bi);
        self.tri.merge(&other.tri);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uni.is_empty() && self.bi.is_empty() && self.tri.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_common_orders_by_count() {
        let dist = ["b", "a", "b", "c", "b", "a"]
            .into_iter()
            .collect::<FrequencyDistribution>();

        assert_eq!(dist.most_common(2), [("b", 3), ("a", 2)]);
        assert_eq!(dist.count("c"), 1);
        assert_eq!(dist.count("missing"), 0);
        assert_eq!(dist.total(), 6);
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn test_ties_break_by_first_insertion() {
        let dist = ["z", "y", "x", "y", "z", "x"]
            .into_iter()
            .collect::<FrequencyDistribution>();
        assert_eq!(dist.most_common(3), [("z", 2), ("y", 2), ("x", 2)]);
    }

    #[test]
    fn test_most_common_clamps() {
        let dist = ["a"].into_iter().collect::<FrequencyDistribution>();
        assert_eq!(dist.most_common(10).len(), 1);
        assert!(FrequencyDistribution::new().most_common(5).is_empty());
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let tokens = ["a", "b", "c", "b", "d", "a", "e", "c"];
        let single = tokens.iter().collect::<FrequencyDistribution>();

        let mut merged = tokens[..3].iter().collect::<FrequencyDistribution>();
        merged.merge(&tokens[3..].iter().collect());

        assert_eq!(merged.most_common(usize::MAX), single.most_common(usize::MAX));
    }
}
