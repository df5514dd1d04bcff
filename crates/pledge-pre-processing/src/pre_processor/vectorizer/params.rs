use super::ngrams::{NgramOrder, StopList};

/// How many of the most frequent grams of each order enter the vocabulary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cutoffs {
    pub uni: usize,
    pub bi: usize,
    pub tri: usize,
}

impl Cutoffs {
    pub const DEFAULT_UNI: usize = 500;
    pub const DEFAULT_BI: usize = 250;
    pub const DEFAULT_TRI: usize = 25;

    #[must_use]
    pub fn new(uni: usize, bi: usize, tri: usize) -> Self {
        Self { uni, bi, tri }
    }

    #[must_use]
    pub fn get(&self, order: NgramOrder) -> usize {
        match order {
            NgramOrder::Uni => self.uni,
            NgramOrder::Bi => self.bi,
            NgramOrder::Tri => self.tri,
        }
    }
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self::new(Self::DEFAULT_UNI, Self::DEFAULT_BI, Self::DEFAULT_TRI)
    }
}

impl From<(usize, usize, usize)> for Cutoffs {
    fn from(value: (usize, usize, usize)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorizerParams {
    cutoffs: Cutoffs,
    stop_list: StopList,
}

impl VectorizerParams {
    pub fn new(cutoffs: impl Into<Cutoffs>, stop_list: StopList) -> Self {
        Self {
            cutoffs: cutoffs.into(),
            stop_list,
        }
    }

    #[must_use]
    pub fn with_cutoffs(mut self, cutoffs: impl Into<Cutoffs>) -> Self {
        self.cutoffs = cutoffs.into();
        self
    }

    #[must_use]
    pub fn with_stop_list(mut self, stop_list: StopList) -> Self {
        self.stop_list = stop_list;
        self
    }

    #[must_use]
    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    #[must_use]
    pub fn stop_list(&self) -> &StopList {
        &self.stop_list
    }
}
