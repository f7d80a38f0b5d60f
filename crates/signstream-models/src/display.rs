//! Live overlay state machine.
//!
//! `Accumulating` (window not yet full) transitions to a per-tick
//! evaluation outcome once the window fills: `Accepted` when the gate
//! passed (label shown and logged) or `Rejected` when it did not (generic
//! text shown, nothing logged). There is no terminal state; the loop runs
//! until the source is exhausted or a quit signal arrives.

use serde::{Deserialize, Serialize};

/// Overlay text while the window is still filling.
pub const ACCUMULATING_TEXT: &str = "Detecting...";

/// Overlay text for a below-threshold evaluation.
pub const REJECTED_TEXT: &str = "No sign detected";

/// Per-tick display state for the live overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DisplayState {
    /// Window not yet full; no evaluation has run this tick.
    Accumulating,

    /// Window full and confidence cleared the threshold.
    Accepted { label: String, confidence: f64 },

    /// Window full but confidence did not clear the threshold (or the
    /// tick's inference failed under the reject-and-continue policy).
    Rejected { confidence: f64 },
}

impl DisplayState {
    /// Text to render on the live overlay.
    pub fn overlay_text(&self) -> &str {
        match self {
            DisplayState::Accumulating => ACCUMULATING_TEXT,
            DisplayState::Accepted { label, .. } => label,
            DisplayState::Rejected { .. } => REJECTED_TEXT,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, DisplayState::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_text() {
        assert_eq!(DisplayState::Accumulating.overlay_text(), "Detecting...");
        assert_eq!(
            DisplayState::Rejected { confidence: 0.4 }.overlay_text(),
            "No sign detected"
        );
        let accepted = DisplayState::Accepted {
            label: "hello".to_string(),
            confidence: 0.95,
        };
        assert_eq!(accepted.overlay_text(), "hello");
        assert!(accepted.is_accepted());
        assert!(!DisplayState::Accumulating.is_accepted());
    }
}
