//! Per-trial record of which enclosures have been fed.

use std::collections::BTreeSet;

use crate::EnclosureId;

/// Enclosures fed during one trial.
///
/// Each trial starts from an empty set; the builder marks every enclosure it
/// admits and the scorer only credits enclosures found here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FedSet {
    fed: BTreeSet<EnclosureId>,
}

impl FedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EnclosureId) -> bool {
        self.fed.contains(&id)
    }

    /// Mark `id` as fed. Returns `false` if it was already fed.
    pub fn mark(&mut self, id: EnclosureId) -> bool {
        self.fed.insert(id)
    }

    pub fn len(&self) -> usize {
        self.fed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EnclosureId> + '_ {
        self.fed.iter().copied()
    }
}

impl FromIterator<EnclosureId> for FedSet {
    fn from_iter<I: IntoIterator<Item = EnclosureId>>(iter: I) -> Self {
        Self {
            fed: iter.into_iter().collect(),
        }
    }
}
