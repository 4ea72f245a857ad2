use super::history::{PracticeSession, SkillHistory};
use super::milestone::Milestone;
use crate::error::StateError;
use crate::types::CritiqueResult;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shareable handle to one photographer's history. Recording is serialized
/// per history; separate trackers never contend.
#[derive(Debug, Clone, Default)]
pub struct SkillTracker {
    history: Arc<Mutex<SkillHistory>>,
}

impl SkillTracker {
    pub fn new(history: SkillHistory) -> Self {
        Self {
            history: Arc::new(Mutex::new(history)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        SkillHistory::from_json(json).map(Self::new)
    }

    // a panic mid-record leaves the history consistent enough to keep using
    fn lock(&self) -> MutexGuard<'_, SkillHistory> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_critique(&self, critique: &CritiqueResult) -> Vec<Milestone> {
        self.lock().record_critique(critique)
    }

    pub fn record_practice_session(&self, session: PracticeSession) {
        self.lock().record_practice_session(session);
    }

    /// Point-in-time copy of the history.
    pub fn snapshot(&self) -> SkillHistory {
        self.lock().clone()
    }

    pub fn with_history<R>(&self, f: impl FnOnce(&SkillHistory) -> R) -> R {
        f(&self.lock())
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        self.lock().to_json()
    }
}
