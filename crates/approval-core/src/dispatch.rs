use crate::config::TrackerConfig;
use crate::error::{ApprovalError, Result};
use crate::event::TrackerEvent;
use crate::policy::Policy;
use crate::report::{reconcile_comment, reconcile_labels, render, CommentAction, LabelAction};
use crate::tally::{aggregate, Rosters, VoteState};
use crate::tracker::IssueTracker;
use crate::types::{GovernanceKind, Member, StatusLabel, Verdict};
use serde::Serialize;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What one run did to the issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Ignored {
        reason: String,
    },
    Updated {
        verdict: Verdict,
        comment: CommentAction,
        labels: LabelAction,
        votes: VoteState,
    },
}

impl Outcome {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Outcome::Updated { verdict, .. } => Some(*verdict),
            Outcome::Ignored { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct Dispatcher<'a, T: IssueTracker> {
    tracker: &'a T,
    config: &'a TrackerConfig,
    policy: Policy,
}

impl<'a, T: IssueTracker> Dispatcher<'a, T> {
    pub fn new(tracker: &'a T, config: &'a TrackerConfig, kind: GovernanceKind) -> Self {
        Self {
            tracker,
            config,
            policy: Policy::for_kind(kind),
        }
    }

    /// Handle one tracker event for one issue.
    ///
    /// Every read happens before the first write, so a failed fetch leaves
    /// the issue untouched.
    pub fn handle(&self, issue: u64, event: &TrackerEvent) -> Result<Outcome> {
        if let TrackerEvent::Commented { issue_closed: true } = event {
            info!(issue, "comment event on closed issue, ignoring");
            return Ok(Outcome::Ignored {
                reason: "comment on closed issue".to_string(),
            });
        }

        let rosters = Rosters::new(
            self.fetch_roster(&self.config.core_team)?,
            self.fetch_roster(&self.config.maintainer_team)?,
        );
        let comments = self.tracker.issue_comments(issue)?;
        let current_labels = self.tracker.issue_labels(issue)?;
        debug!(issue, comments = comments.len(), labels = ?current_labels, "fetched issue");

        let votes = aggregate(&rosters, &comments);
        let verdict = match event {
            // Nobody can have voted on a brand-new issue.
            TrackerEvent::Opened => Verdict::Pending,
            _ => self.policy.evaluate(&votes, event),
        };
        info!(
            issue,
            governance = %self.policy.kind,
            verdict = ?verdict,
            core_approvals = votes.core_approvals().len(),
            maintainer_approvals = votes.maintainer_approvals().len(),
            "computed approval status"
        );

        let body = render(verdict, &votes, self.policy.kind, &self.config.web_url);
        let comment = reconcile_comment(&comments, &body);
        let labels = match event {
            // timed-out was just removed by hand; writing labels would put it back.
            TrackerEvent::LabelChanged {
                label: Some(label),
                removed: true,
            } if label == StatusLabel::TimedOut.as_str() =>
            {
                LabelAction::Unchanged
            }
            _ => reconcile_labels(&current_labels, verdict),
        };

        match &comment {
            CommentAction::Unchanged { comment_id } => {
                info!(comment_id, "status comment already up to date");
            }
            CommentAction::Edit { comment_id } => {
                info!(comment_id, "updating status comment");
                self.tracker.edit_comment(*comment_id, &body)?;
            }
            CommentAction::Create => {
                info!(issue, "creating status comment");
                self.tracker.create_comment(issue, &body)?;
            }
        }

        match &labels {
            LabelAction::Unchanged => debug!(issue, "labels already up to date"),
            LabelAction::Replace { labels } => {
                info!(issue, labels = ?labels, "setting labels");
                self.tracker.set_labels(issue, labels)?;
            }
        }

        Ok(Outcome::Updated {
            verdict,
            comment,
            labels,
            votes,
        })
    }

    fn fetch_roster(&self, team: &str) -> Result<Vec<Member>> {
        let members = self
            .tracker
            .team_members(team)
            .map_err(|source| ApprovalError::Roster {
                team: team.to_string(),
                source: Box::new(source),
            })?;
        info!(team, count = members.len(), "fetched team members");
        Ok(members)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
