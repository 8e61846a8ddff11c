//! Scripted replay of timed raw touch notifications.
//!
//! ```yaml
//! settle_ms: 800
//! steps:
//!   - { at_ms: 0, phase: start, touches: 1, target: play }
//!   - { at_ms: 120, phase: end, touches: 0, target: play }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, sleep_until, Instant};

use crate::application::input::TouchSurface;
use crate::domain::{ElementId, GestureError, RawTouchEvent, TouchPhase};

/// One raw touch notification, relative to the start of the replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub at_ms: u64,
    pub phase: TouchPhase,
    pub touches: usize,
    pub target: ElementId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// How long to keep the surface alive after the last step
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    pub steps: Vec<ScenarioStep>,
}

fn default_settle_ms() -> u64 {
    1000
}

impl Scenario {
    pub fn parse(content: &str) -> Result<Self, GestureError> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let scenario = Self::parse(&content)?;
        tracing::debug!(
            "Loaded scenario {:?} ({} steps)",
            path.as_ref(),
            scenario.steps.len()
        );
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), GestureError> {
        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(GestureError::Scenario(format!(
                    "step at {}ms follows step at {}ms",
                    pair[1].at_ms, pair[0].at_ms
                )));
            }
        }
        Ok(())
    }

    /// Emit every step on `surface` at its offset, then wait `settle_ms`
    pub async fn replay(&self, surface: &TouchSurface) {
        let started = Instant::now();

        for step in &self.steps {
            sleep_until(started + Duration::from_millis(step.at_ms)).await;
            surface.emit(RawTouchEvent::new(
                step.phase,
                step.touches,
                step.target.clone(),
            ));
        }

        sleep(Duration::from_millis(self.settle_ms)).await;
        tracing::debug!("Scenario replay on {} finished", surface.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(
            r#"
steps:
  - { at_ms: 0, phase: start, touches: 1, target: play }
  - { at_ms: 120, phase: end, touches: 0, target: play }
"#,
        )
        .unwrap();

        assert_eq!(scenario.settle_ms, 1000);
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[1].phase, TouchPhase::End);
        assert_eq!(scenario.steps[1].target, ElementId::new("play"));
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let result = Scenario::parse(
            r#"
steps:
  - { at_ms: 100, phase: start, touches: 1, target: play }
  - { at_ms: 50, phase: end, touches: 0, target: play }
"#,
        );
        assert!(matches!(result, Err(GestureError::Scenario(_))));
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let result = Scenario::parse("steps:\n  - { at_ms: 0, phase: move, touches: 1, target: a }\n");
        assert!(matches!(result, Err(GestureError::Scenario(_))));
    }
}
