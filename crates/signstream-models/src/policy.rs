//! Pipeline policy knobs.
//!
//! Both policies exist because the observed deployments differ:
//! some accumulate every frame into the window, some only frames with an
//! actual detection; some abort the run on a classifier fault, some
//! reject the tick and keep going. Each is an explicit configuration
//! choice rather than a hard-coded default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Window admission policy for per-frame feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PushPolicy {
    /// Every vector enters the window, blank "no detection" frames
    /// included.
    #[default]
    Always,

    /// Blank vectors are skipped; the window only accumulates frames with
    /// an actual detection. Fill is delayed during detection gaps but the
    /// classifier sees a denoised sequence.
    DetectionOnly,
}

impl PushPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushPolicy::Always => "always",
            PushPolicy::DetectionOnly => "detection_only",
        }
    }
}

impl fmt::Display for PushPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PushPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(PushPolicy::Always),
            "detection_only" | "detection" => Ok(PushPolicy::DetectionOnly),
            _ => Err(PolicyParseError("push policy", s.to_string())),
        }
    }
}

/// What to do when the classifier fails to return a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InferenceErrorPolicy {
    /// Treat the tick as rejected and continue; a single inference hiccup
    /// does not end the session.
    #[default]
    RejectTick,

    /// End the run on the first classifier fault.
    Abort,
}

impl InferenceErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceErrorPolicy::RejectTick => "reject_tick",
            InferenceErrorPolicy::Abort => "abort",
        }
    }
}

impl fmt::Display for InferenceErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InferenceErrorPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject_tick" | "reject" => Ok(InferenceErrorPolicy::RejectTick),
            "abort" => Ok(InferenceErrorPolicy::Abort),
            _ => Err(PolicyParseError("inference error policy", s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown {0}: {1}")]
pub struct PolicyParseError(&'static str, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_policy_parse() {
        assert_eq!("always".parse::<PushPolicy>().unwrap(), PushPolicy::Always);
        assert_eq!(
            "detection_only".parse::<PushPolicy>().unwrap(),
            PushPolicy::DetectionOnly
        );
        assert_eq!(
            "detection".parse::<PushPolicy>().unwrap(),
            PushPolicy::DetectionOnly
        );
        assert!("invalid".parse::<PushPolicy>().is_err());
    }

    #[test]
    fn test_inference_policy_parse() {
        assert_eq!(
            "reject_tick".parse::<InferenceErrorPolicy>().unwrap(),
            InferenceErrorPolicy::RejectTick
        );
        assert_eq!(
            "abort".parse::<InferenceErrorPolicy>().unwrap(),
            InferenceErrorPolicy::Abort
        );
        assert!("invalid".parse::<InferenceErrorPolicy>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(PushPolicy::DetectionOnly.to_string(), "detection_only");
        assert_eq!(InferenceErrorPolicy::RejectTick.to_string(), "reject_tick");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PushPolicy::default(), PushPolicy::Always);
        assert_eq!(
            InferenceErrorPolicy::default(),
            InferenceErrorPolicy::RejectTick
        );
    }
}
