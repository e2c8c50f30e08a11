//! Flat label-to-target table driven by the narrowing state machine.
//!
//! The table stores full labels plus the prefix consumed so far; what a label
//! still displays is its full text with that prefix stripped. Narrowing is a
//! filter over this list and never touches the label tree again.

use crate::render::LabelHandle;
use crate::view::Rect;
use serde::Serialize;

/// One label and the jump target it selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JumpAssociation {
    pub label: String,
    pub position: usize,
    pub next_is_control: bool,
    pub bounds: Rect,
    /// Rendered entity, `None` if the renderer had none to give
    pub handle: Option<LabelHandle>,
}

impl JumpAssociation {
    /// Label text left to type once `consumed` has been typed.
    pub fn remaining<'a>(&'a self, consumed: &str) -> &'a str {
        self.label.strip_prefix(consumed).unwrap_or(&self.label)
    }
}

/// Outcome of feeding one key to the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Narrowing {
    /// The typed keys spell the complete label of association `index`
    Exact(usize),
    /// The consumed prefix grew; `removed` no longer match it
    Narrowed { removed: Vec<JumpAssociation> },
    /// Nothing starts with the typed keys; the table is unchanged
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct JumpTable {
    associations: Vec<JumpAssociation>,
    consumed: String,
}

impl JumpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, association: JumpAssociation) {
        self.associations.push(association);
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    pub fn associations(&self) -> &[JumpAssociation] {
        &self.associations
    }

    pub fn get(&self, index: usize) -> Option<&JumpAssociation> {
        self.associations.get(index)
    }

    /// Keys typed so far in this session.
    pub fn consumed(&self) -> &str {
        &self.consumed
    }

    /// Remaining label text of association `index`.
    pub fn remaining(&self, index: usize) -> Option<&str> {
        self.associations
            .get(index)
            .map(|a| a.remaining(&self.consumed))
    }

    /// Index of the association whose full label is `label`.
    pub fn find_exact(&self, label: &str) -> Option<usize> {
        self.associations.iter().position(|a| a.label == label)
    }

    /// Feed one typed key.
    pub fn narrow(&mut self, key: char) -> Narrowing {
        let mut typed = self.consumed.clone();
        typed.push(key);

        if let Some(index) = self.find_exact(&typed) {
            return Narrowing::Exact(index);
        }
        if !self.associations.iter().any(|a| a.label.starts_with(&typed)) {
            return Narrowing::Empty;
        }

        self.consumed = typed;
        let removed = self.retain_matching();
        Narrowing::Narrowed { removed }
    }

    /// Drop every association that does not start with the consumed prefix
    /// and return the dropped ones in table order.
    pub fn retain_matching(&mut self) -> Vec<JumpAssociation> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.associations)
            .into_iter()
            .partition(|a| a.label.starts_with(&self.consumed));
        self.associations = kept;
        removed
    }

    /// Empty the table, returning everything it held.
    pub fn drain(&mut self) -> Vec<JumpAssociation> {
        self.consumed.clear();
        std::mem::take(&mut self.associations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: &[&str]) -> JumpTable {
        let mut table = JumpTable::new();
        for (i, label) in labels.iter().enumerate() {
            table.push(JumpAssociation {
                label: label.to_string(),
                position: i * 10,
                next_is_control: false,
                bounds: Rect::default(),
                handle: None,
            });
        }
        table
    }

    fn labels(table: &JumpTable) -> Vec<&str> {
        table.associations().iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn test_narrow_keeps_prefix_matches() {
        let mut t = table(&["a", "ba", "bb", "ca"]);
        let Narrowing::Narrowed { removed } = t.narrow('b') else {
            panic!("expected narrowing");
        };
        assert_eq!(removed.len(), 2);
        assert_eq!(labels(&t), vec!["ba", "bb"]);
        assert_eq!(t.consumed(), "b");
        assert_eq!(t.remaining(0), Some("a"));
        assert_eq!(t.remaining(1), Some("b"));
    }

    #[test]
    fn test_exact_match() {
        let mut t = table(&["a", "ba", "bb"]);
        assert_eq!(t.narrow('a'), Narrowing::Exact(0));

        let mut t = table(&["a", "ba", "bb"]);
        t.narrow('b');
        assert_eq!(t.narrow('b'), Narrowing::Exact(1));
    }

    #[test]
    fn test_unmatched_key_leaves_table_alone() {
        let mut t = table(&["a", "ba", "bb"]);
        t.narrow('b');
        assert_eq!(t.narrow('z'), Narrowing::Empty);
        assert_eq!(t.consumed(), "b");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_refilter_is_noop() {
        let mut t = table(&["aa", "ab", "ba", "bb"]);
        t.narrow('a');
        let before = labels(&t).into_iter().map(String::from).collect::<Vec<_>>();
        assert!(t.retain_matching().is_empty());
        assert_eq!(labels(&t), before);
    }

    #[test]
    fn test_drain_resets_prefix() {
        let mut t = table(&["aa", "ab"]);
        t.narrow('a');
        assert_eq!(t.drain().len(), 2);
        assert!(t.is_empty());
        assert_eq!(t.consumed(), "");
    }
}
