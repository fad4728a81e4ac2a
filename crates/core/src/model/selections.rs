use std::collections::BTreeMap;

/// Chosen option per question position. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    by_position: BTreeMap<usize, usize>,
}

impl Selections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous choice for `position`, if any.
    pub fn record(&mut self, position: usize, option: usize) -> Option<usize> {
        self.by_position.insert(position, option)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.by_position.get(&position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.by_position.iter().map(|(p, o)| (*p, *o))
    }
}

impl FromIterator<(usize, usize)> for Selections {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let mut selections = Self::new();
        for (position, option) in iter {
            selections.record(position, option);
        }
        selections
    }
}
