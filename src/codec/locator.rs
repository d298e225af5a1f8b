//! Path expressions for selecting elements below a node.
//!
//! Supported steps: `.` (self), `..` (parent), `*` (any child element) and
//! element names, joined by `/`. A leading `./` is accepted; a leading `/`
//! starts from the document's root element.

use roxmltree::Node;

use super::is_xml_name;
use crate::error::LocatorError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Current,
    Parent,
    AnyChild,
    Child(String),
}

/// A compiled locator expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    absolute: bool,
    steps: Vec<Step>,
}

impl Locator {
    /// Compiles a locator expression.
    ///
    /// # Errors
    /// Returns a [`LocatorError`] for empty expressions, empty steps and steps
    /// that are not valid XML names.
    pub fn parse(expr: &str) -> Result<Self, LocatorError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(LocatorError::Empty);
        }

        let (absolute, rest) = match trimmed.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if absolute && rest.is_empty() {
            return Err(LocatorError::EmptyStep(expr.to_string()));
        }

        let mut steps = Vec::new();
        for raw in rest.split('/') {
            let step = match raw {
                "" => return Err(LocatorError::EmptyStep(expr.to_string())),
                "." => Step::Current,
                ".." => Step::Parent,
                "*" => Step::AnyChild,
                name if is_xml_name(name) => Step::Child(name.to_string()),
                other => {
                    return Err(LocatorError::InvalidStep {
                        locator: expr.to_string(),
                        step: other.to_string(),
                    })
                }
            };
            steps.push(step);
        }

        Ok(Self { absolute, steps })
    }

    /// Returns every matching element in document order
    pub fn select_all<'a, 'input>(&self, node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let start = if self.absolute {
            // First step selects among the document node's children
            node.document().root()
        } else {
            node
        };

        let mut current = vec![start];
        for step in &self.steps {
            let mut next = Vec::new();
            for n in &current {
                match step {
                    Step::Current => next.push(*n),
                    Step::Parent => {
                        if let Some(parent) = n.parent_element() {
                            next.push(parent);
                        }
                    }
                    Step::AnyChild => next.extend(n.children().filter(Node::is_element)),
                    Step::Child(name) => next.extend(
                        n.children()
                            .filter(|c| c.is_element() && c.tag_name().name() == name.as_str()),
                    ),
                }
            }
            // Parent steps can reach the same element twice
            next.dedup_by_key(|n| n.id());
            current = next;
            if current.is_empty() {
                break;
            }
        }
        current
    }

    pub fn select_first<'a, 'input>(&self, node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        self.select_all(node).into_iter().next()
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
