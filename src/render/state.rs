//! Per-render state: the leaf counter and the open-group tracker
//!
//! Group handling is a two-state machine. [`GroupState::advance`] is pure:
//! it maps the current state and the next option to the markup steps to
//! emit and the state that follows, so the loop in `render` only has to
//! carry it forward.

use crate::options::OptionEntry;

/// Whether a group wrapper is currently open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupState {
    #[default]
    Outside,
    InsideGroup,
}

/// A piece of markup the loop must emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CloseGroup,
    OpenGroup,
    Leaf,
}

const CLOSE: &[Step] = &[Step::CloseGroup];
const OPEN: &[Step] = &[Step::OpenGroup];
const REOPEN: &[Step] = &[Step::CloseGroup, Step::OpenGroup];
const LEAF: &[Step] = &[Step::Leaf];

impl GroupState {
    pub fn advance(self, entry: &OptionEntry) -> (GroupState, &'static [Step]) {
        if entry.is_group_end() {
            // Explicit end markers always close, even when nothing is open
            (GroupState::Outside, CLOSE)
        } else if entry.is_group_marker() {
            match self {
                GroupState::InsideGroup => (GroupState::InsideGroup, REOPEN),
                GroupState::Outside => (GroupState::InsideGroup, OPEN),
            }
        } else {
            (self, LEAF)
        }
    }

    /// Steps needed once the list is exhausted
    pub fn finish(self) -> &'static [Step] {
        match self {
            GroupState::InsideGroup => CLOSE,
            GroupState::Outside => &[],
        }
    }
}

/// State threaded through a single render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    /// Leaf options seen so far; group markers do not count
    pub option_count: usize,
    pub group: GroupState,
}

impl RenderState {
    /// Count a leaf option and return its 1-based ordinal
    pub fn next_option(&mut self) -> usize {
        self.option_count += 1;
        self.option_count
    }
}
