use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A tracker user handle. Compared and hashed by handle only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Member(String);

impl Member {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn handle(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Member {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for Member {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Core,
    Maintainer,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Core => "core",
            Tier::Maintainer => "maintainer",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Vote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Approve,
    Reject,
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pending,
    Approved,
    Rejected,
    TimedOut,
}

impl Verdict {
    /// The text shown after the status header in the status comment.
    pub fn display_label(self) -> &'static str {
        match self {
            Verdict::Pending => "🕐 Pending",
            Verdict::Approved => "✅ Approved",
            Verdict::Rejected => "❌ Rejected",
            Verdict::TimedOut => "⏰ Timed Out",
        }
    }

    pub fn status_label(self) -> StatusLabel {
        match self {
            Verdict::Approved => StatusLabel::Accepted,
            Verdict::Rejected => StatusLabel::TurnedDown,
            Verdict::TimedOut => StatusLabel::TimedOut,
            Verdict::Pending => StatusLabel::Proposed,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

// ---------------------------------------------------------------------------
// StatusLabel
// ---------------------------------------------------------------------------

/// The governance-status labels. At most one of them is on an issue at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusLabel {
    Proposed,
    Accepted,
    TurnedDown,
    TimedOut,
}

impl StatusLabel {
    pub fn all() -> &'static [StatusLabel] {
        &[
            StatusLabel::Proposed,
            StatusLabel::Accepted,
            StatusLabel::TurnedDown,
            StatusLabel::TimedOut,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Proposed => "proposed",
            StatusLabel::Accepted => "accepted",
            StatusLabel::TurnedDown => "turned-down",
            StatusLabel::TimedOut => "timed-out",
        }
    }

    pub fn is_status_label(name: &str) -> bool {
        StatusLabel::all().iter().any(|l| l.as_str() == name)
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GovernanceKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceKind {
    Pipeline,
    Sig,
}

impl GovernanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GovernanceKind::Pipeline => "pipeline",
            GovernanceKind::Sig => "sig",
        }
    }
}

impl fmt::Display for GovernanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GovernanceKind {
    type Err = crate::error::ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipeline" => Ok(GovernanceKind::Pipeline),
            "sig" => Ok(GovernanceKind::Sig),
            _ => Err(crate::error::ApprovalError::InvalidGovernance(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
