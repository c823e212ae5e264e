//! Crate-level error types.

use std::fmt;

/// Errors produced by the showreel crate.
#[derive(Debug)]
pub enum ShowreelError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Scene export JSON parsing/serialization failure.
    SceneParse(serde_json::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A keyframe failed [`validate`](crate::scene::SceneExport::validate).
    InvalidKeyframe {
        /// Authoring index of the offending keyframe.
        index: u32,
        /// What is wrong with it.
        reason: String,
    },
    /// The export's initial camera failed validation.
    InvalidCamera(String),
}

impl fmt::Display for ShowreelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SceneParse(e) => write!(f, "scene export parse error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidKeyframe { index, reason } => {
                write!(f, "invalid keyframe {index}: {reason}")
            }
            Self::InvalidCamera(msg) => write!(f, "invalid camera: {msg}"),
        }
    }
}

impl std::error::Error for ShowreelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::SceneParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShowreelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ShowreelError {
    fn from(e: serde_json::Error) -> Self {
        Self::SceneParse(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn invalid_keyframe_message_names_index() {
        let err = ShowreelError::InvalidKeyframe {
            index: 3,
            reason: "zero-length quaternion".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid keyframe 3: zero-length quaternion"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn io_error_keeps_source() {
        let err: ShowreelError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
    }
}
