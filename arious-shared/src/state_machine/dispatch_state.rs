use serde::{Deserialize, Serialize};
use crate::models::errors::NotificationError;

/// Lifecycle of one push request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Received,
    Validated,
    TokensResolved,
    PresenceChecked,
    PayloadComposed,
    Dispatched,
    ResultAggregated,
    Rejected,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchState::ResultAggregated | DispatchState::Rejected)
    }

    pub fn can_transition_to(&self, next: DispatchState) -> bool {
        use DispatchState::*;
        matches!(
            (*self, next),
            (Received, Validated)
                | (Received, Rejected)
                | (Validated, TokensResolved)
                | (TokensResolved, PresenceChecked)
                | (TokensResolved, PayloadComposed)
                | (PresenceChecked, PayloadComposed)
                | (PayloadComposed, Dispatched)
                | (Dispatched, ResultAggregated)
        )
    }
}

/// Tracks one request through [`DispatchState`], refusing out-of-order steps.
#[derive(Debug, Clone)]
pub struct DispatchTracker {
    current: DispatchState,
    history: Vec<DispatchState>,
}

impl Default for DispatchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTracker {
    pub fn new() -> Self {
        Self {
            current: DispatchState::Received,
            history: vec![DispatchState::Received],
        }
    }

    pub fn current(&self) -> DispatchState {
        self.current
    }

    pub fn history(&self) -> &[DispatchState] {
        &self.history
    }

    pub fn advance(&mut self, next: DispatchState) -> Result<(), NotificationError> {
        if !self.current.can_transition_to(next) {
            return Err(NotificationError::Internal(format!(
                "Invalid dispatch transition from {:?} to {:?}",
                self.current, next
            )));
        }

        log::debug!("[dispatch] {:?} -> {:?}", self.current, next);
        self.current = next;
        self.history.push(next);
        Ok(())
    }
}
