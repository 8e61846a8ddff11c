use thiserror::Error;

#[derive(Error, Debug)]
pub enum GestureError {
    #[error("A gesture recognizer is already attached to surface {0}")]
    AlreadyAttached(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),
}

impl From<serde_yaml::Error> for GestureError {
    fn from(err: serde_yaml::Error) -> Self {
        GestureError::Scenario(err.to_string())
    }
}
