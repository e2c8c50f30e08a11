//! Single-pass boundary scanner over the visible text.
//!
//! A candidate starts wherever a word or a punctuation run begins. The scan
//! looks at exactly one character behind (the previous class) and one ahead
//! (for `next_is_control`), never backtracks, and runs in O(range length).

use crate::candidate::Candidate;
use crate::view::TextView;
use std::ops::Range;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Minimum distance between two accepted candidates (fewer than two
/// characters between labels would make them overlap).
pub const MIN_SPACING: usize = 3;

/// Unicode classification of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharClass {
    pub letter_or_digit: bool,
    pub punctuation: bool,
    pub separator: bool,
    pub control: bool,
    pub whitespace: bool,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        use GeneralCategory::*;
        let (letter_or_digit, punctuation, separator, control) = match get_general_category(ch)
        {
            UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter
            | OtherLetter | DecimalNumber => (true, false, false, false),
            ConnectorPunctuation | DashPunctuation | OpenPunctuation | ClosePunctuation
            | InitialPunctuation | FinalPunctuation | OtherPunctuation => {
                (false, true, false, false)
            }
            SpaceSeparator | LineSeparator | ParagraphSeparator => (false, false, true, false),
            Control => (false, false, false, true),
            _ => (false, false, false, false),
        };
        CharClass {
            letter_or_digit,
            punctuation,
            separator,
            control,
            whitespace: ch.is_whitespace(),
        }
    }

    /// `self` follows `prev` and begins a word.
    fn starts_word(self, prev: CharClass) -> bool {
        (prev.control || prev.punctuation || prev.separator) && self.letter_or_digit
    }

    /// `self` follows `prev` and begins a punctuation run.
    fn starts_punctuation(self, prev: CharClass) -> bool {
        (prev.letter_or_digit || prev.separator || prev.control || prev.whitespace)
            && self.punctuation
    }
}

/// Scan `range` of `view` and return jump candidates in ascending position.
///
/// The first position of the range is judged against a virtual NUL
/// predecessor, so a word or punctuation mark there is always a boundary.
/// Candidates without geometry are dropped and do not count for spacing.
pub fn scan<V: TextView + ?Sized>(view: &V, range: Range<usize>) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    if range.start >= range.end {
        return candidates;
    }

    let mut prev = CharClass::of('\0');
    let mut last_accepted: Option<usize> = None;
    let mut current = view.char_at(range.start).map(CharClass::of);

    for pos in range {
        let Some(cur) = current else {
            break;
        };
        let next = view.char_at(pos + 1).map(CharClass::of);

        let boundary = cur.starts_word(prev) || cur.starts_punctuation(prev);
        let spaced = last_accepted.map_or(true, |last| pos >= last + MIN_SPACING);
        if boundary && spaced {
            if let Some(bounds) = view.char_bounds(pos) {
                let next_is_control = next.is_some_and(|n| n.control) && !cur.control;
                candidates.push(Candidate::new(pos, next_is_control, bounds));
                last_accepted = Some(pos);
            }
        }

        prev = cur;
        current = next;
    }

    candidates
}
