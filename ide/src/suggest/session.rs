//! Completion-session state machine.
//!
//! `Idle → Open (≥1 visible) → Filtering (same anchor, narrower partial) →
//! Idle`. A structural change (new connector, or the anchor token no longer
//! matching) forces a full reload by dropping back to `Idle`; closing resets
//! every cache.

use engine::Span;

use super::{Candidate, filter_and_rank};

/// Page step for page-up/page-down selection moves.
pub const PAGE_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Open,
    Filtering,
}

/// Candidate list plus selection state, kept across keystrokes.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    pool: Vec<Candidate>,
    visible: Vec<Candidate>,
    selection: Option<usize>,
    anchor: Option<Span>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn visible(&self) -> &[Candidate] {
        &self.visible
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.visible.get(self.selection?)
    }

    pub fn anchor(&self) -> Option<Span> {
        self.anchor
    }

    /// Loads a fresh pool for a new anchor token. Opens only when at least
    /// one candidate is visible; otherwise the session stays idle.
    pub fn open(&mut self, pool: Vec<Candidate>, anchor: Span, partial: &str) {
        self.close();
        let visible = filter_and_rank(&pool, partial);
        if visible.is_empty() {
            return;
        }
        self.pool = pool;
        self.visible = visible;
        self.selection = Some(0);
        self.anchor = Some(anchor);
        self.state = SessionState::Open;
    }

    /// Narrows the open list as the user keeps typing on the same anchor.
    ///
    /// Returns `false` when the edit was structural (different anchor, or no
    /// open session): the caller must reload via [`Session::open`].
    pub fn refine(&mut self, anchor: Span, partial: &str) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        if self.anchor.is_none_or(|prev| prev.start != anchor.start) {
            // The anchor token changed under us: structural, full reload.
            self.close();
            return false;
        }

        self.visible = filter_and_rank(&self.pool, partial);
        if self.visible.is_empty() {
            self.close();
            return true;
        }
        self.anchor = Some(anchor);
        self.selection = Some(
            self.selection
                .unwrap_or(0)
                .min(self.visible.len().saturating_sub(1)),
        );
        self.state = SessionState::Filtering;
        true
    }

    /// Moves the selection by `delta` (±1, or ±[`PAGE_STEP`]), clamped to
    /// the visible range. Ignored while idle.
    pub fn move_selection(&mut self, delta: i32) {
        if self.state == SessionState::Idle || self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as i32 - 1;
        let current = self.selection.unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, last);
        self.selection = Some(next as usize);
    }

    /// Closes the list and resets all caches.
    pub fn close(&mut self) {
        self.state = SessionState::Idle;
        self.pool.clear();
        self.visible.clear();
        self.selection = None;
        self.anchor = None;
    }
}
