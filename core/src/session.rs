//! Jump session: one scan-to-resolution lifecycle.
//!
//! `JumpSession::build` runs scanner, ranker and label tree and registers one
//! rendered label per target. `consume` then narrows the table one key at a
//! time until a label is complete.

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::jump_table::{JumpAssociation, JumpTable, Narrowing};
use crate::label_tree::{Assignment, LabelTree};
use crate::ranker::{effective_caret, rank, RankingMode};
use crate::render::LabelRenderer;
use crate::scanner::scan;
use crate::style::{Color, LabelStyle, StyleField};
use crate::view::TextView;
use crate::Config;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No labels on screen
    #[default]
    Idle,
    /// Labels shown, zero or more keys consumed
    Active,
    /// A label was typed completely
    Resolved,
    /// Aborted by the host
    Cancelled,
}

/// The selected jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    pub position: usize,
    pub next_is_control: bool,
}

impl JumpTarget {
    /// Where the caret should go.
    ///
    /// When extending a selection onto a target that sits right before a
    /// line terminator, the caret moves past the target character so the
    /// selection includes it.
    pub fn caret_position(&self, extend_selection: bool) -> usize {
        if extend_selection && self.next_is_control {
            self.position + 1
        } else {
            self.position
        }
    }
}

/// Result of consuming one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeResult {
    /// No label continues with this key; nothing changed
    NoMatch,
    /// Labels were filtered; `remaining` targets are still live
    Narrowed { remaining: usize },
    Resolved(JumpTarget),
}

#[derive(Debug, Clone, Default)]
pub struct JumpSession {
    state: SessionState,
    table: JumpTable,
    style: LabelStyle,
    /// Associations that did not get a rendered entity
    unrendered: usize,
}

impl JumpSession {
    /// An idle session with no labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the visible range of `view`, assign labels and put them on
    /// screen through `renderer`.
    ///
    /// Alphabet errors are reported before any entity is acquired. An empty
    /// visible range yields an active session without jumps.
    pub fn build<V, R>(view: &V, config: &Config, renderer: &mut R) -> Result<Self>
    where
        V: TextView + ?Sized,
        R: LabelRenderer + ?Sized,
    {
        let alphabet = Alphabet::new(&config.alphabet)?;
        let range = view.visible_range();

        let started = Instant::now();
        let candidates = scan(view, range.clone());
        debug!(
            candidates = candidates.len(),
            start = range.start,
            end = range.end,
            elapsed_us = started.elapsed().as_micros() as u64,
            "scanned visible range"
        );

        let caret = match config.ranking_mode {
            RankingMode::CaretRelative => {
                effective_caret(view, &range, config.caret_sensitivity)
            }
            RankingMode::Sequential => 0,
        };
        let ranked = rank(candidates, config.ranking_mode, caret);

        let started = Instant::now();
        let tree = LabelTree::build(ranked.len(), &alphabet)?;
        let max_label_len = tree.max_depth();

        let mut session = Self {
            state: SessionState::Active,
            table: JumpTable::new(),
            style: config.style.clone(),
            unrendered: 0,
        };
        for Assignment { candidate, label } in tree.into_assignments() {
            let target = &ranked[candidate];
            let handle = match renderer.acquire() {
                Ok(handle) => {
                    renderer.show(handle, &label, target.bounds, &session.style);
                    Some(handle)
                }
                Err(err) => {
                    warn!(%err, position = target.position, "jump label left unrendered");
                    session.unrendered += 1;
                    None
                }
            };
            session.table.push(JumpAssociation {
                label,
                position: target.position,
                next_is_control: target.next_is_control,
                bounds: target.bounds,
                handle,
            });
        }
        debug!(
            jumps = session.table.len(),
            max_label_len,
            mode = ?config.ranking_mode,
            caret,
            elapsed_us = started.elapsed().as_micros() as u64,
            "jump labels assigned"
        );

        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Whether any target can still be selected.
    pub fn has_jumps(&self) -> bool {
        self.is_active() && !self.table.is_empty()
    }

    /// Number of live associations.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &JumpTable {
        &self.table
    }

    pub fn associations(&self) -> &[JumpAssociation] {
        self.table.associations()
    }

    /// Keys consumed so far.
    pub fn consumed(&self) -> &str {
        self.table.consumed()
    }

    /// Number of live associations without a rendered label.
    pub fn unrendered(&self) -> usize {
        self.unrendered
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Full label of the target at `position`, if it is still live.
    pub fn label_at(&self, position: usize) -> Option<&str> {
        self.associations()
            .iter()
            .find(|a| a.position == position)
            .map(|a| a.label.as_str())
    }

    /// Feed one typed key.
    pub fn consume<R: LabelRenderer + ?Sized>(&mut self, key: char, renderer: &mut R) -> ConsumeResult {
        if self.state != SessionState::Active {
            return ConsumeResult::NoMatch;
        }

        match self.table.narrow(key) {
            Narrowing::Exact(index) => {
                let association = &self.table.associations()[index];
                let target = JumpTarget {
                    position: association.position,
                    next_is_control: association.next_is_control,
                };
                trace!(label = %association.label, position = target.position, "jump resolved");
                self.release_all(renderer);
                self.state = SessionState::Resolved;
                ConsumeResult::Resolved(target)
            }
            Narrowing::Narrowed { removed } => {
                for association in removed {
                    match association.handle {
                        Some(handle) => renderer.release(handle),
                        None => self.unrendered -= 1,
                    }
                }
                let consumed = self.table.consumed();
                for association in self.table.associations() {
                    if let Some(handle) = association.handle {
                        renderer.update(handle, association.remaining(consumed), &self.style);
                    }
                }
                trace!(consumed, remaining = self.table.len(), "jump labels narrowed");
                ConsumeResult::Narrowed {
                    remaining: self.table.len(),
                }
            }
            Narrowing::Empty => {
                trace!(%key, consumed = self.table.consumed(), "no jump label continues with key");
                ConsumeResult::NoMatch
            }
        }
    }

    /// Tear down all labels and return to `Idle`.
    pub fn reset<R: LabelRenderer + ?Sized>(&mut self, renderer: &mut R) {
        self.release_all(renderer);
        self.state = SessionState::Idle;
    }

    /// Abort an active session.
    pub fn cancel<R: LabelRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.state == SessionState::Active {
            self.release_all(renderer);
            self.state = SessionState::Cancelled;
        }
    }

    /// Apply a colour change to the labels currently on screen.
    ///
    /// First-motion fields affect labels with more than one key left,
    /// final-motion fields those with exactly one.
    pub fn property_changed<R: LabelRenderer + ?Sized>(
        &mut self,
        field: StyleField,
        color: Color,
        renderer: &mut R,
    ) {
        self.style.set(field, color);
        let consumed = self.table.consumed();
        for association in self.table.associations() {
            let Some(handle) = association.handle else {
                continue;
            };
            let remaining = association.remaining(consumed);
            if field.applies_to(remaining.chars().count()) {
                renderer.set_colors(handle, self.style.colors_for(remaining));
            }
        }
    }

    fn release_all<R: LabelRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for association in self.table.drain() {
            if let Some(handle) = association.handle {
                renderer.release(handle);
            }
        }
        self.unrendered = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LabelPool;
    use crate::view::StrView;

    fn config(keys: &str) -> Config {
        let mut config = Config::default();
        config.alphabet = keys.to_string();
        config
    }

    #[test]
    fn test_build_labels_targets_in_scan_order() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::unbounded();
        let session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();

        let labels: Vec<(usize, &str)> = session
            .associations()
            .iter()
            .map(|a| (a.position, a.label.as_str()))
            .collect();
        assert_eq!(labels, vec![(0, "a"), (4, "ba"), (8, "bb")]);
        assert_eq!(pool.in_use(), 3);
        assert!(session.has_jumps());
    }

    #[test]
    fn test_narrow_then_resolve() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::unbounded();
        let mut session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();

        assert_eq!(
            session.consume('b', &mut pool),
            ConsumeResult::Narrowed { remaining: 2 }
        );
        assert_eq!(pool.in_use(), 2);
        let texts: Vec<&str> = pool.visible().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);

        assert_eq!(
            session.consume('b', &mut pool),
            ConsumeResult::Resolved(JumpTarget {
                position: 8,
                next_is_control: false
            })
        );
        assert_eq!(session.state(), SessionState::Resolved);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(session.consume('a', &mut pool), ConsumeResult::NoMatch);
    }

    #[test]
    fn test_no_match_keeps_session() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::unbounded();
        let mut session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();

        assert_eq!(session.consume('z', &mut pool), ConsumeResult::NoMatch);
        assert!(session.is_active());
        assert_eq!(session.len(), 3);
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn test_empty_alphabet_fails_before_rendering() {
        let view = StrView::new("one two");
        let mut pool = LabelPool::unbounded();
        let err = JumpSession::build(&view, &config(""), &mut pool).unwrap_err();
        assert!(matches!(err, crate::JumpError::AlphabetTooSmall { size: 0, .. }));
        assert_eq!(pool.allocated(), 0);
    }

    #[test]
    fn test_pool_exhaustion_keeps_targets_matchable() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::new(1);
        let mut session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.unrendered(), 2);

        session.consume('b', &mut pool);
        assert_eq!(
            session.consume('a', &mut pool),
            ConsumeResult::Resolved(JumpTarget {
                position: 4,
                next_is_control: false
            })
        );
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_cancel_and_reset() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::unbounded();
        let mut session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();
        session.cancel(&mut pool);
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(pool.in_use(), 0);

        session.reset(&mut pool);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.has_jumps());
    }

    #[test]
    fn test_property_changed_targets_label_group() {
        let view = StrView::new("one two three");
        let mut pool = LabelPool::unbounded();
        let mut session = JumpSession::build(&view, &config("ab"), &mut pool).unwrap();
        let red = Color::rgb(255, 0, 0);

        session.property_changed(StyleField::FinalMotionBackground, red, &mut pool);
        let backgrounds: Vec<(String, Color)> = pool
            .visible()
            .map(|e| (e.text.clone(), e.colors.background))
            .collect();
        let first_bg = session.style().first_motion.background;
        assert_eq!(
            backgrounds,
            vec![
                ("a".to_string(), red),
                ("ba".to_string(), first_bg),
                ("bb".to_string(), first_bg),
            ]
        );
    }

    #[test]
    fn test_target_caret_position() {
        let target = JumpTarget {
            position: 7,
            next_is_control: true,
        };
        assert_eq!(target.caret_position(false), 7);
        assert_eq!(target.caret_position(true), 8);
        let plain = JumpTarget {
            position: 7,
            next_is_control: false,
        };
        assert_eq!(plain.caret_position(true), 7);
    }
}
