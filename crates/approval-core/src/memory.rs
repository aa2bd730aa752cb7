//! In-memory [`IssueTracker`] holding a single issue. Records every write.

use crate::error::{ApprovalError, Result};
use crate::tracker::{IssueComment, IssueTracker};
use crate::types::Member;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerWrite {
    CreateComment { body: String },
    EditComment { comment_id: u64, body: String },
    SetLabels { labels: Vec<String> },
}

#[derive(Default)]
struct Inner {
    teams: HashMap<String, Vec<Member>>,
    failing_teams: HashSet<String>,
    comments: Vec<IssueComment>,
    labels: Vec<String>,
    writes: Vec<TrackerWrite>,
    next_id: u64,
}

#[derive(Default)]
pub struct MemoryTracker {
    inner: RefCell<Inner>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(self, team: &str, handles: &[&str]) -> Self {
        self.inner.borrow_mut().teams.insert(
            team.to_string(),
            handles.iter().map(|h| Member::from(*h)).collect(),
        );
        self
    }

    /// Make `team_members(team)` fail with an API error.
    pub fn with_failing_team(self, team: &str) -> Self {
        self.inner.borrow_mut().failing_teams.insert(team.to_string());
        self
    }

    pub fn with_labels(self, labels: &[&str]) -> Self {
        self.inner.borrow_mut().labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_comment(self, author: &str, body: &str) -> Self {
        self.push_comment(author, body);
        self
    }

    /// Append a comment as if a user had just posted it.
    pub fn push_comment(&self, author: &str, body: &str) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.comments.push(IssueComment::new(id, author, body));
        id
    }

    pub fn comments(&self) -> Vec<IssueComment> {
        self.inner.borrow().comments.clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.inner.borrow().labels.clone()
    }

    pub fn writes(&self) -> Vec<TrackerWrite> {
        self.inner.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.inner.borrow_mut().writes.clear();
    }
}

impl IssueTracker for MemoryTracker {
    fn team_members(&self, team: &str) -> Result<Vec<Member>> {
        let inner = self.inner.borrow();
        if inner.failing_teams.contains(team) {
            return Err(ApprovalError::Api {
                status: 403,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        Ok(inner.teams.get(team).cloned().unwrap_or_default())
    }

    fn issue_comments(&self, _issue: u64) -> Result<Vec<IssueComment>> {
        Ok(self.comments())
    }

    fn issue_labels(&self, _issue: u64) -> Result<Vec<String>> {
        Ok(self.labels())
    }

    fn create_comment(&self, _issue: u64, body: &str) -> Result<()> {
        self.push_comment("approval-bot", body);
        self.inner.borrow_mut().writes.push(TrackerWrite::CreateComment {
            body: body.to_string(),
        });
        Ok(())
    }

    fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if let Some(comment) = inner.comments.iter_mut().find(|c| c.id == comment_id) {
            comment.body = Some(body.to_string());
        }
        inner.writes.push(TrackerWrite::EditComment {
            comment_id,
            body: body.to_string(),
        });
        Ok(())
    }

    fn set_labels(&self, _issue: u64, labels: &[String]) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.labels = labels.to_vec();
        inner.writes.push(TrackerWrite::SetLabels {
            labels: labels.to_vec(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_get_increasing_ids() {
        let tracker = MemoryTracker::new()
            .with_comment("alice", "first")
            .with_comment("bob", "second");
        let ids: Vec<u64> = tracker.comments().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn writes_are_recorded_and_applied() {
        let tracker = MemoryTracker::new().with_labels(&["bug"]);
        tracker.create_comment(1, "status").unwrap();
        tracker.edit_comment(1, "status v2").unwrap();
        tracker.set_labels(1, &["bug".to_string(), "proposed".to_string()]).unwrap();

        assert_eq!(tracker.comments()[0].body(), "status v2");
        assert_eq!(tracker.labels(), vec!["bug".to_string(), "proposed".to_string()]);
        assert_eq!(tracker.writes().len(), 3);
    }

    #[test]
    fn failing_team_errors() {
        let tracker = MemoryTracker::new().with_failing_team("core");
        assert!(tracker.team_members("core").is_err());
        assert!(tracker.team_members("maintainers").unwrap().is_empty());
    }
}
