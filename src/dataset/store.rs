//! In-memory dataset: category id → ordered quote records.

use crate::dataset::record::{CategoryId, Hitokoto};

/// Read-only snapshot of every loaded category.
///
/// Categories iterate in insertion order, which is the configured load order.
/// Lookups are linear; category sets are a dozen entries at most.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    categories: Vec<(CategoryId, Vec<Hitokoto>)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category, replacing its records if it is already present.
    ///
    /// Replacing keeps the original position so iteration order is stable.
    pub fn insert(&mut self, id: CategoryId, records: Vec<Hitokoto>) {
        match self.categories.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = records,
            None => self.categories.push((id, records)),
        }
    }

    /// Records of one category, `None` when the category is not loaded.
    pub fn get(&self, id: &str) -> Option<&[Hitokoto]> {
        self.categories
            .iter()
            .find(|(existing, _)| existing.as_str() == id)
            .map(|(_, records)| records.as_slice())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &[Hitokoto])> {
        self.categories
            .iter()
            .map(|(id, records)| (id, records.as_slice()))
    }

    /// Every record, category by category, in file order.
    pub fn records(&self) -> impl Iterator<Item = &Hitokoto> {
        self.categories.iter().flat_map(|(_, records)| records.iter())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn total_sentences(&self) -> usize {
        self.categories.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Per-category record counts in iteration order.
    pub fn counts(&self) -> Vec<(CategoryId, usize)> {
        self.categories
            .iter()
            .map(|(id, records)| (id.clone(), records.len()))
            .collect()
    }
}

impl FromIterator<(CategoryId, Vec<Hitokoto>)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (CategoryId, Vec<Hitokoto>)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for (id, records) in iter {
            dataset.insert(id, records);
        }
        dataset
    }
}
