use std::ops::Range;

use crate::candidates::Candidate;
use crate::host::TextBuffer;
use crate::selection::Point;

pub const MENTION_TRIGGER: char = '@';

/// Result of scanning the caret node for an `@query` token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MentionQuery {
    pub active: bool,
    pub query: String,
    pub anchor: Point,
}

impl MentionQuery {
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Looks for the last `@` anywhere in `text`. The query runs from just
    /// after it to the end of the node, untrimmed; the caret does not bound
    /// the search.
    pub fn extract(text: &str, anchor: Point) -> Self {
        let Some(at) = text.rfind(MENTION_TRIGGER) else {
            return Self::inactive();
        };
        let query = &text[at + MENTION_TRIGGER.len_utf8()..];
        if query.is_empty() {
            return Self::inactive();
        }
        Self {
            active: true,
            query: query.to_string(),
            anchor,
        }
    }
}

/// A text replacement plus where the caret lands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub replacement: String,
    pub caret_after: usize,
}

impl Splice {
    pub fn apply(&self, buffer: &mut (impl TextBuffer + ?Sized)) {
        buffer.splice(self.range.clone(), &self.replacement);
        buffer.set_caret(self.caret_after);
    }
}

/// Computes the splice that turns the `@query` span into `@display_name`.
///
/// The span starts at the last `@` and ends at the caret, or at the end of
/// the text when the caret sits before the `@`.
pub fn mention_splice(text: &str, caret: usize, display_name: &str) -> Option<Splice> {
    let at = text.rfind(MENTION_TRIGGER)?;
    let caret = clamp_to_char_boundary(text, caret);
    let end = if caret > at { caret } else { text.len() };
    let replacement = format!("{MENTION_TRIGGER}{display_name}");
    let caret_after = at + replacement.len();
    Some(Splice {
        range: at..end,
        replacement,
        caret_after,
    })
}

pub(crate) fn clamp_to_char_boundary(s: &str, mut ix: usize) -> usize {
    ix = ix.min(s.len());
    while ix > 0 && !s.is_char_boundary(ix) {
        ix -= 1;
    }
    ix
}

/// Dropdown state while an `@query` is being composed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MentionMode {
    #[default]
    Inactive,
    Active {
        query: String,
        anchor: Point,
        results: Vec<Candidate>,
        highlighted: usize,
    },
}

impl MentionMode {
    pub fn is_active(&self) -> bool {
        matches!(self, MentionMode::Active { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            MentionMode::Active { query, .. } => Some(query),
            MentionMode::Inactive => None,
        }
    }

    pub fn results(&self) -> &[Candidate] {
        match self {
            MentionMode::Active { results, .. } => results,
            MentionMode::Inactive => &[],
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self {
            MentionMode::Active { highlighted, .. } => Some(*highlighted),
            MentionMode::Inactive => None,
        }
    }

    pub fn highlighted_candidate(&self) -> Option<&Candidate> {
        match self {
            MentionMode::Active {
                results,
                highlighted,
                ..
            } => results.get(*highlighted),
            MentionMode::Inactive => None,
        }
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            MentionMode::Active { anchor, .. } => Some(*anchor),
            MentionMode::Inactive => None,
        }
    }

    /// Moves the highlight by `delta`, wrapping at both ends.
    pub fn move_highlight(&mut self, delta: isize) {
        if let MentionMode::Active {
            results,
            highlighted,
            ..
        } = self
        {
            if results.is_empty() {
                return;
            }
            let len = results.len() as isize;
            *highlighted = (*highlighted as isize + delta).rem_euclid(len) as usize;
        }
    }

    pub fn close(&mut self) {
        *self = MentionMode::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_token_is_the_query() {
        let query = MentionQuery::extract("hello @jo", Point::default());
        assert!(query.active);
        assert_eq!(query.query, "jo");
    }

    #[test]
    fn bare_at_is_inactive() {
        assert!(!MentionQuery::extract("mail me @", Point::default()).active);
        assert!(!MentionQuery::extract("no trigger", Point::default()).active);
    }

    #[test]
    fn splice_clamps_caret_inside_multibyte_char() {
        let text = "hé @jö";
        let splice = mention_splice(text, text.len() - 1, "Jöns").unwrap();
        assert_eq!(splice.range.start, 4);
        assert!(text.is_char_boundary(splice.range.end));
    }

    #[test]
    fn highlight_wraps() {
        let mut mode = MentionMode::Active {
            query: "j".into(),
            anchor: Point::default(),
            results: vec![Candidate::new("1", "A", "a@x", ""), Candidate::new("2", "B", "b@x", "")],
            highlighted: 0,
        };
        mode.move_highlight(-1);
        assert_eq!(mode.highlighted(), Some(1));
        mode.move_highlight(1);
        assert_eq!(mode.highlighted(), Some(0));
    }
}
