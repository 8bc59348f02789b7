//! Shared domain enumerations for articles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Where an article sits in its publishing lifecycle.
///
/// The backend only persists `isPublished`, so `Archived` and `Draft` share the same
/// wire representation. The distinction survives inside an editor session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Draft,
    Published,
    Archived,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Draft => "draft",
            LifecycleState::Published => "published",
            LifecycleState::Archived => "archived",
        }
    }

    pub fn is_published(self) -> bool {
        matches!(self, LifecycleState::Published)
    }

    pub fn from_published_flag(is_published: bool) -> Self {
        if is_published {
            LifecycleState::Published
        } else {
            LifecycleState::Draft
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of categories an author may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frontend,
    Backend,
    Devops,
    Architecture,
    Tutorial,
    Opinion,
    Career,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Frontend,
        Category::Backend,
        Category::Devops,
        Category::Architecture,
        Category::Tutorial,
        Category::Opinion,
        Category::Career,
    ];

    /// Value stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Devops => "devops",
            Category::Architecture => "architecture",
            Category::Tutorial => "tutorial",
            Category::Opinion => "opinion",
            Category::Career => "career",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Frontend => "Frontend Development",
            Category::Backend => "Backend Development",
            Category::Devops => "DevOps & Infrastructure",
            Category::Architecture => "Software Architecture",
            Category::Tutorial => "Tutorials & Guides",
            Category::Opinion => "Opinion & Analysis",
            Category::Career => "Career Development",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.as_str().eq_ignore_ascii_case(needle)
                    || category.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DomainError::validation(format!("unknown category `{needle}`")))
    }
}
