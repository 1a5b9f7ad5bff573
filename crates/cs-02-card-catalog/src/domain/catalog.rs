//! Ordered, filterable list of card descriptors.

use shared_types::CardDescriptor;

/// Immutable view over the registered cards, ordered by (pack, name).
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    descriptors: Vec<CardDescriptor>,
}

impl CardCatalog {
    pub fn new(mut descriptors: Vec<CardDescriptor>) -> Self {
        descriptors.sort_by(|a, b| a.pack.cmp(&b.pack).then_with(|| a.name.cmp(&b.name)));
        Self { descriptors }
    }

    pub fn count(&self) -> usize {
        self.descriptors.len()
    }

    /// Cards whose name, pack or description contains `filter`,
    /// case-insensitively. An empty (or blank) filter returns everything.
    pub fn cards(&self, filter: &str) -> Vec<CardDescriptor> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.descriptors.clone();
        }

        self.descriptors
            .iter()
            .filter(|d| matches_filter(d, &needle))
            .cloned()
            .collect()
    }

    pub fn find(&self, pack: &str, card: &str) -> Option<&CardDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.pack == pack && d.name == card)
    }
}

fn matches_filter(descriptor: &CardDescriptor, needle: &str) -> bool {
    descriptor.name.to_lowercase().contains(needle)
        || descriptor.pack.to_lowercase().contains(needle)
        || descriptor
            .description()
            .map(|d| d.to_lowercase().contains(needle))
            .unwrap_or(false)
}
