use crate::error::Result;
use crate::types::Member;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One comment on an issue, as the tracker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    pub author: Member,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl IssueComment {
    pub fn new(id: u64, author: impl Into<Member>, body: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            body: Some(body.into()),
            created_at: None,
        }
    }

    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// The issue-tracker operations the approval flow needs.
///
/// Calls are blocking and made one at a time. `issue_comments` must return
/// comments oldest first.
pub trait IssueTracker {
    fn team_members(&self, team: &str) -> Result<Vec<Member>>;

    fn issue_comments(&self, issue: u64) -> Result<Vec<IssueComment>>;

    fn issue_labels(&self, issue: u64) -> Result<Vec<String>>;

    fn create_comment(&self, issue: u64, body: &str) -> Result<()>;

    fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()>;

    /// Replace the issue's whole label set.
    fn set_labels(&self, issue: u64, labels: &[String]) -> Result<()>;
}
