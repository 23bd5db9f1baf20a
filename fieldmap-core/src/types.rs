//! Data models for graph entities and relationships.
//!
//! Nodes are identified by their display label. A node created only because
//! an edge referenced it carries no category and no tooltip; styling applies
//! fallbacks to it.

use std::fmt;
use std::str::FromStr;

/// Relation label for Author -> Work edges.
pub const RELATION_WROTE: &str = "wrote";

/// Relation label for Subfield -> Author edges.
pub const RELATION_WROTE_ABOUT: &str = "wrote about";

/// Node category from the fixed taxonomy.
///
/// `Other` keeps an unrecognized `Type` value from the entity table so it
/// survives into diagnostics; it is styled like a missing category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Field,
    Subfield,
    Author,
    Work,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Field => "Field",
            Category::Subfield => "Subfield",
            Category::Author => "Author",
            Category::Work => "Work",
            Category::Other(name) => name,
        }
    }

    /// Whether this is one of the four known categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Map a `Type` cell to a category; unknown names become `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "Field" => Category::Field,
            "Subfield" => Category::Subfield,
            "Author" => Category::Author,
            "Work" => Category::Work,
            other => Category::Other(other.to_string()),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from_name(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node weight stored in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeData {
    pub label: String,
    /// `None` for bare nodes created from an edge endpoint.
    pub category: Option<Category>,
    pub tooltip: Option<String>,
}

impl NodeData {
    /// A node with no attributes beyond its label.
    pub fn bare(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            category: None,
            tooltip: None,
        }
    }

    pub fn is_bare(&self) -> bool {
        self.category.is_none() && self.tooltip.is_none()
    }
}

/// Edge weight stored in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeData {
    pub relation: Option<String>,
}

impl EdgeData {
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: Some(relation.into()),
        }
    }
}

/// Tooltip text for a Work node: the title in double quotes.
pub fn work_tooltip(title: &str) -> String {
    format!("\"{}\"", title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("Field".parse::<Category>().unwrap(), Category::Field);
        assert_eq!(" Work ".parse::<Category>().unwrap(), Category::Work);
        assert_eq!(
            "School".parse::<Category>().unwrap(),
            Category::Other("School".to_string())
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Subfield.to_string(), "Subfield");
        assert_eq!(Category::Other("Era".to_string()).to_string(), "Era");
        assert!(!Category::Other("Era".to_string()).is_known());
        assert!(Category::Author.is_known());
    }

    #[test]
    fn test_work_tooltip_is_quoted() {
        assert_eq!(
            work_tooltip("Critique of Practical Reason"),
            "\"Critique of Practical Reason\""
        );
    }

    #[test]
    fn test_bare_node() {
        let node = NodeData::bare("Ethics");
        assert!(node.is_bare());
        assert_eq!(node.label, "Ethics");
    }
}
