use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Position in window coordinates (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y + self.height)
    }

    /// Smallest rect covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Selection offsets as reported to the store, in UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What the host reports on a selection-change notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    /// `None` when the host has no selection range at all.
    pub range: Option<Range<usize>>,
    pub bounds: Option<Rect>,
}

impl SelectionSnapshot {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            range: Some(offset..offset),
            bounds: None,
        }
    }

    pub fn range(range: Range<usize>, bounds: Rect) -> Self {
        Self {
            range: Some(range),
            bounds: Some(bounds),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolbarState {
    pub visible: bool,
    pub anchor: Point,
}

impl ToolbarState {
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Derives the floating toolbar from selection changes.
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    toolbar: ToolbarState,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.toolbar
    }

    /// Updates the toolbar and returns the selection to report to the store.
    pub fn on_selection_change(&mut self, snapshot: &SelectionSnapshot) -> Option<Selection> {
        let Some(range) = snapshot.range.clone() else {
            self.toolbar = ToolbarState::hidden();
            return None;
        };

        self.toolbar = match snapshot.bounds {
            Some(bounds) if !range.is_empty() => ToolbarState {
                visible: true,
                anchor: bounds.top_center(),
            },
            _ => ToolbarState::hidden(),
        };

        tracing::trace!(
            start = range.start,
            end = range.end,
            visible = self.toolbar.visible,
            "selection changed"
        );

        Some(Selection::new(range.start, range.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_range_shows_toolbar_at_top_center() {
        let mut coordinator = SelectionCoordinator::new();
        let reported = coordinator
            .on_selection_change(&SelectionSnapshot::range(2..7, Rect::new(10., 40., 100., 18.)));
        assert_eq!(reported, Some(Selection::new(2, 7)));
        assert!(coordinator.toolbar().visible);
        assert_eq!(coordinator.toolbar().anchor, Point::new(60., 40.));
    }

    #[test]
    fn collapsed_range_hides_toolbar_but_still_reports() {
        let mut coordinator = SelectionCoordinator::new();
        coordinator.on_selection_change(&SelectionSnapshot::range(0..3, Rect::default()));
        let reported = coordinator.on_selection_change(&SelectionSnapshot::caret(3));
        assert_eq!(reported, Some(Selection::new(3, 3)));
        assert!(!coordinator.toolbar().visible);
    }

    #[test]
    fn no_range_reports_nothing() {
        let mut coordinator = SelectionCoordinator::new();
        assert_eq!(coordinator.on_selection_change(&SelectionSnapshot::none()), None);
        assert_eq!(coordinator.toolbar(), ToolbarState::hidden());
    }

    #[test]
    fn union_covers_both_rects() {
        let a = Rect::new(0., 0., 10., 10.);
        let b = Rect::new(20., 5., 10., 10.);
        assert_eq!(a.union(&b), Rect::new(0., 0., 30., 15.));
    }
}
