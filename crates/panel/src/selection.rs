//! Per-view segment selection.

use panel_core::SegmentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A dashboard view with its own segment selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Headline figures and trend charts.
    Overview,
    /// Quarterly, yearly and growth breakdowns.
    Analysis,
    /// Side-by-side comparison table.
    Comparison,
}

impl View {
    /// Every view.
    pub const ALL: [Self; 3] = [Self::Overview, Self::Analysis, Self::Comparison];

    const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Analysis => 1,
            Self::Comparison => 2,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overview => "overview",
            Self::Analysis => "analysis",
            Self::Comparison => "comparison",
        })
    }
}

/// Selected segments of each view over a shared list of available segments.
///
/// Selections stay in the order of the available list regardless of the
/// order segments were toggled in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelections {
    available: Vec<SegmentId>,
    selected: [Vec<SegmentId>; 3],
}

impl ViewSelections {
    /// Creates selections with every available segment selected in every view.
    #[must_use]
    pub fn new(available: Vec<SegmentId>) -> Self {
        let mut selections = Self::default();
        selections.reset(available);
        selections
    }

    /// Returns the available segments.
    #[must_use]
    pub fn available(&self) -> &[SegmentId] {
        &self.available
    }

    /// Returns the segments selected in `view`.
    #[must_use]
    pub fn selected(&self, view: View) -> &[SegmentId] {
        &self.selected[view.index()]
    }

    /// Returns true if `segment` is selected in `view`.
    #[must_use]
    pub fn is_selected(&self, view: View, segment: &SegmentId) -> bool {
        self.selected(view).contains(segment)
    }

    /// Flips `segment` in `view` and returns whether it is now selected.
    ///
    /// Segments that are not available are ignored and reported as not
    /// selected.
    pub fn toggle(&mut self, view: View, segment: &SegmentId) -> bool {
        if !self.available.contains(segment) {
            debug!(%view, %segment, "Ignoring toggle of unavailable segment");
            return false;
        }
        let current = &mut self.selected[view.index()];
        if let Some(pos) = current.iter().position(|s| s == segment) {
            current.remove(pos);
            return false;
        }
        let available = &self.available;
        current.push(segment.clone());
        current.sort_by_key(|s| available.iter().position(|a| a == s));
        true
    }

    /// Selects every available segment in `view`.
    pub fn select_all(&mut self, view: View) {
        self.selected[view.index()] = self.available.clone();
    }

    /// Deselects everything in `view`.
    pub fn clear(&mut self, view: View) {
        self.selected[view.index()].clear();
    }

    /// Replaces the available segments and selects all of them in every view.
    pub fn reset(&mut self, available: Vec<SegmentId>) {
        debug!(segments = available.len(), "Resetting view selections");
        for view in View::ALL {
            self.selected[view.index()] = available.clone();
        }
        self.available = available;
    }
}
