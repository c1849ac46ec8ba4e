use std::collections::{BTreeMap, BTreeSet};

/// A named-entity span reduced to its surface text and label (`ORG`, `GPE`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Deduplicated set of entities. Text is trimmed on insertion so that
/// `" Apple "` and `"Apple"` with the same label collapse into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntitySet(BTreeSet<Entity>);

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the pair was already present or the text is blank.
    pub fn insert(&mut self, entity: Entity) -> bool {
        let text = entity.text.trim();
        if text.is_empty() {
            return false;
        }
        self.0.insert(Entity::new(text, entity.label))
    }

    pub fn contains(&self, text: &str, label: &str) -> bool {
        self.0.contains(&Entity::new(text, label))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.0.iter()
    }

    pub fn grouped_by_label(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entity in &self.0 {
            groups
                .entry(entity.label.as_str())
                .or_default()
                .push(entity.text.as_str());
        }
        groups
    }
}

impl FromIterator<Entity> for EntitySet {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut set = EntitySet::new();
        for entity in iter {
            set.insert(entity);
        }
        set
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a Entity;
    type IntoIter = std::collections::btree_set::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
