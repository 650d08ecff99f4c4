use serde::Serialize;

use crate::types::errors::JocxSdkError;

/// Lifecycle of one user-triggered transaction kind. Each action owns its
/// own instance; nothing serializes different actions against each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ActionState {
    #[default]
    Idle,
    Pending,
    Success,
    Failed
}

impl ActionState {
    /// Marks the action busy. Rejects re-entry while a submission is
    /// already pending.
    pub fn begin(&mut self, label: &'static str) -> Result<(), JocxSdkError> {
        if self.is_pending() {
            return Err(JocxSdkError::ActionInFlight(label));
        }
        *self = ActionState::Pending;
        Ok(())
    }

    pub fn complete(&mut self) {
        *self = ActionState::Success;
    }

    pub fn fail(&mut self) {
        *self = ActionState::Failed;
    }

    pub fn reset(&mut self) {
        *self = ActionState::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending)
    }
}
