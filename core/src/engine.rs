//! Jump engine with session management and key event processing.
//!
//! The `JumpEngine` owns the configuration and the host's renderer, and keeps
//! at most one `JumpSession` alive. Hosts call `begin()` when the jump command
//! fires and feed every following key through `process_key()` until it
//! reports a jump or a cancellation.

use crate::error::Result;
use crate::session::{ConsumeResult, JumpSession, JumpTarget};
use crate::render::LabelRenderer;
use crate::style::{Color, StyleField};
use crate::view::TextView;
use crate::Config;

/// Key event types the engine can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A typed character
    Char(char),
    /// Abort the current session
    Escape,
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// No session is active; pass the key through to the editor
    NotHandled,
    /// The key matched no label and was swallowed
    NoMatch,
    /// Labels were narrowed, this many targets remain
    Narrowed(usize),
    /// A label was completed; move the caret
    Jump(JumpTarget),
    Cancelled,
}

/// Jump engine bound to one renderer.
pub struct JumpEngine<R: LabelRenderer> {
    config: Config,
    renderer: R,
    session: JumpSession,
}

impl<R: LabelRenderer> JumpEngine<R> {
    pub fn new(config: Config, renderer: R) -> Self {
        Self {
            config,
            renderer,
            session: JumpSession::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `begin()`.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn session(&self) -> &JumpSession {
        &self.session
    }

    /// Start a new session over `view`, tearing down any previous one.
    ///
    /// Returns the number of jump targets.
    pub fn begin<V: TextView + ?Sized>(&mut self, view: &V) -> Result<usize> {
        self.session.reset(&mut self.renderer);
        self.session = JumpSession::build(view, &self.config, &mut self.renderer)?;
        Ok(self.session.len())
    }

    /// Whether the current session still has selectable targets.
    pub fn any_jumps_available(&self) -> bool {
        self.session.has_jumps()
    }

    /// Process a key event.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        if !self.session.is_active() {
            return KeyResult::NotHandled;
        }

        match key {
            KeyEvent::Escape => {
                self.session.cancel(&mut self.renderer);
                KeyResult::Cancelled
            }
            KeyEvent::Char(ch) => match self.session.consume(ch, &mut self.renderer) {
                ConsumeResult::NoMatch => KeyResult::NoMatch,
                ConsumeResult::Narrowed { remaining } => KeyResult::Narrowed(remaining),
                ConsumeResult::Resolved(target) => KeyResult::Jump(target),
            },
        }
    }

    /// Change one label colour in the configuration and on screen.
    pub fn set_style_color(&mut self, field: StyleField, color: Color) {
        self.config.style.set(field, color);
        self.session.property_changed(field, color, &mut self.renderer);
    }

    /// Drop the current session and its labels.
    pub fn reset(&mut self) {
        self.session.reset(&mut self.renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LabelPool;
    use crate::view::StrView;

    fn engine(keys: &str) -> JumpEngine<LabelPool> {
        let mut config = Config::default();
        config.set_alphabet(keys).unwrap();
        JumpEngine::new(config, LabelPool::unbounded())
    }

    #[test]
    fn test_keys_pass_through_without_session() {
        let mut engine = engine("ab");
        assert_eq!(engine.process_key(KeyEvent::Char('a')), KeyResult::NotHandled);
        assert!(!engine.any_jumps_available());
    }

    #[test]
    fn test_jump_flow() {
        let mut engine = engine("ab");
        let view = StrView::new("one two three");
        assert_eq!(engine.begin(&view).unwrap(), 3);
        assert!(engine.any_jumps_available());

        assert_eq!(engine.process_key(KeyEvent::Char('x')), KeyResult::NoMatch);
        assert_eq!(engine.process_key(KeyEvent::Char('b')), KeyResult::Narrowed(2));
        assert_eq!(
            engine.process_key(KeyEvent::Char('a')),
            KeyResult::Jump(JumpTarget {
                position: 4,
                next_is_control: false
            })
        );
        assert_eq!(engine.renderer().in_use(), 0);
        assert_eq!(engine.process_key(KeyEvent::Char('a')), KeyResult::NotHandled);
    }

    #[test]
    fn test_escape_cancels() {
        let mut engine = engine("ab");
        engine.begin(&StrView::new("one two three")).unwrap();
        assert_eq!(engine.process_key(KeyEvent::Escape), KeyResult::Cancelled);
        assert_eq!(engine.renderer().in_use(), 0);
        assert!(!engine.any_jumps_available());
    }

    #[test]
    fn test_begin_replaces_previous_session() {
        let mut engine = engine("ab");
        engine.begin(&StrView::new("one two three")).unwrap();
        engine.process_key(KeyEvent::Char('b'));
        assert_eq!(engine.begin(&StrView::new("xx yy")).unwrap(), 2);
        assert_eq!(engine.renderer().in_use(), 2);
        assert_eq!(engine.session().consumed(), "");
    }

    #[test]
    fn test_set_style_color_updates_config_and_labels() {
        let mut engine = engine("ab");
        engine.begin(&StrView::new("one two three")).unwrap();
        let blue = Color::rgb(0, 0, 255);
        engine.set_style_color(StyleField::FirstMotionForeground, blue);

        assert_eq!(engine.config().style.first_motion.foreground, blue);
        let blue_labels = engine
            .renderer()
            .visible()
            .filter(|e| e.colors.foreground == blue)
            .count();
        assert_eq!(blue_labels, 2);
    }
}
