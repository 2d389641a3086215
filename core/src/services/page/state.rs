//! Per-request render state machine
//!
//! `Unresolved -> LocaleResolved -> ContentFetched -> Rendered | NotFound`.
//! Terminal states have no successors; there is no retry edge.

use serde::Serialize;

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    Unresolved,
    LocaleResolved,
    ContentFetched,
    Rendered,
    NotFound,
}

impl RenderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::NotFound)
    }

    pub fn can_transition_to(&self, next: RenderState) -> bool {
        matches!(
            (self, next),
            (RenderState::Unresolved, RenderState::LocaleResolved)
                | (RenderState::LocaleResolved, RenderState::ContentFetched)
                | (RenderState::ContentFetched, RenderState::Rendered)
                | (RenderState::ContentFetched, RenderState::NotFound)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderState::Unresolved => "unresolved",
            RenderState::LocaleResolved => "locale_resolved",
            RenderState::ContentFetched => "content_fetched",
            RenderState::Rendered => "rendered",
            RenderState::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for RenderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one request through the render states
#[derive(Debug, Clone)]
pub struct RenderLifecycle {
    history: Vec<RenderState>,
}

impl Default for RenderLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLifecycle {
    pub fn new() -> Self {
        Self {
            history: vec![RenderState::Unresolved],
        }
    }

    pub fn state(&self) -> RenderState {
        self.history
            .last()
            .copied()
            .unwrap_or(RenderState::Unresolved)
    }

    /// Move to `next`, rejecting any edge the machine does not have
    pub fn advance(&mut self, next: RenderState) -> DomainResult<()> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        self.history.push(next);
        Ok(())
    }

    /// Every state visited, in order
    pub fn history(&self) -> &[RenderState] {
        &self.history
    }
}
