use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryIndex {
    categories: Vec<String>,
    #[serde(skip)]
    positions: BTreeMap<String, usize>,
}

impl CategoryIndex {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        let categories: Vec<String> = distinct.into_iter().map(ToOwned::to_owned).collect();
        let positions = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.clone(), idx))
            .collect();

        Self {
            categories,
            positions,
        }
    }

    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.positions.get(category).copied()
    }

    pub fn category(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(String::as_str)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
