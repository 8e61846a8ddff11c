use serde::{Deserialize, Serialize};

use super::touch::ElementId;

/// Semantic gesture signals derived from raw touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureSignal {
    Tap,
    LongTap,
}

impl GestureSignal {
    /// Name listeners subscribe to
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::LongTap => "longtap",
        }
    }
}

/// A signal together with the element it was dispatched on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedSignal {
    pub target: ElementId,
    pub signal: GestureSignal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(GestureSignal::Tap.name(), "tap");
        assert_eq!(GestureSignal::LongTap.name(), "longtap");
    }

    #[test]
    fn test_signal_yaml_uses_names() {
        let yaml = serde_yaml::to_string(&GestureSignal::LongTap).unwrap();
        assert_eq!(yaml.trim(), "longtap");
    }
}
