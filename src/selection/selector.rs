//! Filter-then-sample over the loaded dataset.

use rand::Rng;

use crate::dataset::{Dataset, Hitokoto};

/// Parameters narrowing the candidate pool.
///
/// `None` means "not given". A bound of zero is a real bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionQuery {
    pub category: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
}

impl SelectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: impl Into<String>) -> Self {
        self.category = Some(id.into());
        self
    }

    pub fn min_length(mut self, min: i64) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: i64) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn has_length_bounds(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// Inclusive at both ends.
    pub fn accepts_length(&self, length: usize) -> bool {
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        self.min_length.map_or(true, |min| length >= min)
            && self.max_length.map_or(true, |max| length <= max)
    }

    fn accepts(&self, record: &Hitokoto) -> bool {
        !self.has_length_bounds() || self.accepts_length(record.length())
    }
}

/// Every record matching `query`, in category then file order.
///
/// An unknown category yields nothing rather than falling back to all categories.
pub fn candidates<'d, 'q>(
    dataset: &'d Dataset,
    query: &'q SelectionQuery,
) -> impl Iterator<Item = &'d Hitokoto> + 'q
where
    'd: 'q,
{
    dataset
        .iter()
        .filter(move |(id, _)| {
            query
                .category
                .as_deref()
                .map_or(true, |wanted| id.as_str() == wanted)
        })
        .flat_map(|(_, records)| records.iter())
        .filter(move |record| query.accepts(record))
}

/// Pick one matching record uniformly at random, or `None` if nothing matches.
pub fn select<'a, R: Rng + ?Sized>(
    dataset: &'a Dataset,
    query: &SelectionQuery,
    rng: &mut R,
) -> Option<&'a Hitokoto> {
    let matching = candidates(dataset, query).count();
    if matching == 0 {
        return None;
    }
    let index = rng.gen_range(0..matching);
    candidates(dataset, query).nth(index)
}

/// [`select`] using the thread-local generator.
pub fn select_random<'a>(dataset: &'a Dataset, query: &SelectionQuery) -> Option<&'a Hitokoto> {
    select(dataset, query, &mut rand::thread_rng())
}
