//! SC-Tree label assignment.
//!
//! Candidates are split into a key-prefix tree where every branch consumes
//! one key. The first level hands out one leaf per key before anything
//! branches, deeper levels hand out `K - 1` more targets per key, so that
//! single keys double as complete labels and branch prefixes without
//! creating single-child branches. Sibling subtrees own contiguous ranges of
//! the candidate list, which keeps neighbouring targets under neighbouring
//! prefixes.

use crate::alphabet::Alphabet;
use crate::error::{JumpError, Result};

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelNode {
    /// A complete label for candidate `candidate`
    Leaf { candidate: usize },
    /// One entry per key, in alphabet order
    Branch { children: Vec<(char, NodeId)> },
}

/// A candidate index and its label, in the order leaves were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub candidate: usize,
    pub label: String,
}

/// The label tree for one session.
///
/// # Example
/// ```
/// use jumpmotion_core::{Alphabet, LabelTree};
///
/// let alphabet = Alphabet::new("ab").unwrap();
/// let tree = LabelTree::build(3, &alphabet).unwrap();
///
/// assert_eq!(tree.labels(), ["a", "ba", "bb"]);
/// assert_eq!(tree.resolve("ba"), Some(1));
/// assert_eq!(tree.resolve("b"), None); // prefix, not a complete label
/// ```
#[derive(Debug, Clone)]
pub struct LabelTree {
    nodes: Vec<LabelNode>,
    root: NodeId,
    assignments: Vec<Assignment>,
    /// Label per candidate index
    labels: Vec<String>,
}

impl LabelTree {
    /// Build labels for `count` candidates, indexed `0..count` in ranked
    /// order.
    ///
    /// Fails with [`JumpError::AlphabetTooSmall`] when a single key would
    /// have to label more than one candidate.
    pub fn build(count: usize, alphabet: &Alphabet) -> Result<Self> {
        if alphabet.len() < 2 && count > 1 {
            return Err(JumpError::AlphabetTooSmall {
                size: alphabet.len(),
                candidates: count,
            });
        }

        let mut builder = Builder {
            keys: alphabet.keys(),
            nodes: Vec::new(),
            assignments: Vec::with_capacity(count),
        };
        let root = if count == 0 {
            builder.push(LabelNode::Branch {
                children: Vec::new(),
            })
        } else {
            builder.grow(0, count, &mut String::new())
        };

        let mut labels = vec![String::new(); count];
        for assignment in &builder.assignments {
            labels[assignment.candidate] = assignment.label.clone();
        }

        Ok(Self {
            nodes: builder.nodes,
            root,
            assignments: builder.assignments,
            labels,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &LabelNode {
        &self.nodes[id.0]
    }

    /// Number of labelled candidates.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of candidate `candidate`.
    pub fn label(&self, candidate: usize) -> Option<&str> {
        self.labels.get(candidate).map(String::as_str)
    }

    /// All labels, indexed by candidate.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels in leaf-creation order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Follow `keys` from the root.
    pub fn walk(&self, keys: &str) -> Option<NodeId> {
        let mut id = self.root;
        for key in keys.chars() {
            match self.node(id) {
                LabelNode::Branch { children } => {
                    id = children.iter().find(|(k, _)| *k == key).map(|(_, c)| *c)?;
                }
                LabelNode::Leaf { .. } => return None,
            }
        }
        Some(id)
    }

    /// Candidate whose complete label is `label`.
    pub fn resolve(&self, label: &str) -> Option<usize> {
        match self.node(self.walk(label)?) {
            LabelNode::Leaf { candidate } => Some(*candidate),
            LabelNode::Branch { .. } => None,
        }
    }

    /// Length of the longest label (0 for an empty tree).
    pub fn max_depth(&self) -> usize {
        self.labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

struct Builder<'a> {
    keys: &'a [char],
    nodes: Vec<LabelNode>,
    assignments: Vec<Assignment>,
}

impl Builder<'_> {
    fn push(&mut self, node: LabelNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Build the subtree for candidates `first..first + count` under `prefix`.
    fn grow(&mut self, first: usize, count: usize, prefix: &mut String) -> NodeId {
        let counts = key_counts(count, self.keys.len());
        let mut children = Vec::new();
        let mut keys = self.keys.iter();
        let mut offset = first;

        // Empty slots come first and do not consume a key
        for n in counts.into_iter().filter(|&n| n > 0) {
            let Some(&key) = keys.next() else {
                break;
            };
            prefix.push(key);
            let child = if n == 1 {
                self.assignments.push(Assignment {
                    candidate: offset,
                    label: prefix.clone(),
                });
                self.push(LabelNode::Leaf { candidate: offset })
            } else {
                self.grow(offset, n, prefix)
            };
            prefix.pop();
            children.push((key, child));
            offset += n;
        }

        self.push(LabelNode::Branch { children })
    }
}

/// Number of targets each key slot owns at one tree level.
///
/// Slots are filled over the reversed alphabet, level by level: one target
/// per key on the first level, `key_count - 1` per key below it. The result
/// is returned in forward slot order, so it is non-decreasing.
fn key_counts(targets: usize, key_count: usize) -> Vec<usize> {
    let mut counts = vec![0; key_count];
    let mut left = targets;
    let mut level = 0;

    while left > 0 {
        let per_key = if level == 0 { 1 } else { key_count - 1 };
        for slot in counts.iter_mut() {
            let take = per_key.min(left);
            *slot += take;
            left -= take;
            if left == 0 {
                break;
            }
        }
        level += 1;
    }

    counts.reverse();
    counts
}
