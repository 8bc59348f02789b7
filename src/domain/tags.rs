//! Ordered, duplicate-free tag list attached to an article draft.

use serde::Serialize;

/// Reference list offered to authors as one-click tags.
pub const TAG_SUGGESTIONS: &[&str] = &[
    "tutorial",
    "beginners",
    "advanced",
    "productivity",
    "performance",
    "best-practices",
    "architecture",
    "debugging",
    "optimization",
    "security",
    "scalability",
    "design-patterns",
    "code-review",
];

pub fn is_suggestion(tag: &str) -> bool {
    TAG_SUGGESTIONS.contains(&tag.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToggle {
    Added,
    Removed,
    /// Blank input; nothing to add or remove.
    Unchanged,
}

/// Tags compare with case-sensitive string equality; insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trimmed tag. Returns `false` when it was blank or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Returns `false` when the tag was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        match self.0.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the tag when selected, append it otherwise.
    pub fn toggle(&mut self, tag: &str) -> TagToggle {
        if self.remove(tag) {
            TagToggle::Removed
        } else if self.add(tag) {
            TagToggle::Added
        } else {
            TagToggle::Unchanged
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    /// Suggestions not yet selected, in reference order.
    pub fn available_suggestions(&self, limit: usize) -> Vec<&'static str> {
        TAG_SUGGESTIONS
            .iter()
            .copied()
            .filter(|suggestion| !self.contains(suggestion))
            .take(limit)
            .collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    /// Keeps the first occurrence of each tag.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.add(tag.as_ref());
        }
        set
    }
}
