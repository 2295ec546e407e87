//! Script generation modes.

use serde::{Deserialize, Serialize};

/// Output style requested by the user.
///
/// Controls which prompt template drives the generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    /// Scene description plus dialogue, timestamped.
    #[default]
    Detailed,
    /// Verbatim speech translation with per-utterance timestamps.
    Transcript,
}

impl ScriptMode {
    /// Get string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptMode::Detailed => "detailed",
            ScriptMode::Transcript => "transcript",
        }
    }
}

impl std::fmt::Display for ScriptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
