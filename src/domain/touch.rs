use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the element a raw touch originated from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Touch lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    End,
    Cancel,
}

/// Raw touch notification delivered by a surface
#[derive(Debug, Clone)]
pub struct RawTouchEvent {
    pub phase: TouchPhase,
    /// Touch points still active once this notification is applied
    pub touches: usize,
    pub target: ElementId,
}

impl RawTouchEvent {
    pub fn new(phase: TouchPhase, touches: usize, target: impl Into<ElementId>) -> Self {
        Self {
            phase,
            touches,
            target: target.into(),
        }
    }

    pub fn start(touches: usize, target: impl Into<ElementId>) -> Self {
        Self::new(TouchPhase::Start, touches, target)
    }

    pub fn end(touches: usize, target: impl Into<ElementId>) -> Self {
        Self::new(TouchPhase::End, touches, target)
    }

    pub fn cancel(touches: usize, target: impl Into<ElementId>) -> Self {
        Self::new(TouchPhase::Cancel, touches, target)
    }
}
