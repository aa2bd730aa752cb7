use crate::event::TrackerEvent;
use crate::tally::VoteState;
use crate::types::{GovernanceKind, StatusLabel, Verdict};

/// Core approvals needed for a SIG proposal.
pub const SIG_CORE_QUORUM: usize = 2;

/// Core approvals that approve a pipeline proposal without a maintainer.
pub const PIPELINE_CORE_QUORUM: usize = 2;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Threshold predicates for one governance kind.
pub struct Policy {
    pub kind: GovernanceKind,
    pub approves: fn(&VoteState) -> bool,
    /// Whether a not-planned close counts as a rejection.
    pub rejects: fn(&VoteState) -> bool,
}

impl Policy {
    pub fn for_kind(kind: GovernanceKind) -> Self {
        match kind {
            GovernanceKind::Pipeline => Policy {
                kind,
                approves: pipeline_approves,
                rejects: pipeline_rejects,
            },
            GovernanceKind::Sig => Policy {
                kind,
                approves: sig_approves,
                rejects: sig_rejects,
            },
        }
    }

    /// Derive the verdict for this run.
    ///
    /// A `timed-out` label event wins outright, a not-planned close with
    /// recorded rejections comes next, and the approval threshold is checked
    /// last. Anything else is pending.
    pub fn evaluate(&self, votes: &VoteState, event: &TrackerEvent) -> Verdict {
        match event {
            TrackerEvent::LabelChanged {
                label: Some(label), ..
            }
                if label == StatusLabel::TimedOut.as_str() =>
            {
                return Verdict::TimedOut;
            }
            TrackerEvent::Closed { not_planned: true } if (self.rejects)(votes) => {
                return Verdict::Rejected;
            }
            _ => {}
        }

        if (self.approves)(votes) {
            Verdict::Approved
        } else {
            Verdict::Pending
        }
    }
}

fn pipeline_approves(votes: &VoteState) -> bool {
    let core = votes.core_approvals().len();
    core >= PIPELINE_CORE_QUORUM || (core >= 1 && !votes.maintainer_approvals().is_empty())
}

fn pipeline_rejects(votes: &VoteState) -> bool {
    !votes.core_rejections().is_empty() || !votes.maintainer_rejections().is_empty()
}

fn sig_approves(votes: &VoteState) -> bool {
    votes.core_approvals().len() >= SIG_CORE_QUORUM
}

fn sig_rejects(votes: &VoteState) -> bool {
    !votes.core_rejections().is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::{aggregate, Rosters};
    use crate::tracker::IssueComment;
    use crate::types::Member;

    fn votes(entries: &[(&str, &str)]) -> VoteState {
        let rosters = Rosters::new(
            ["a", "b", "c"].into_iter().map(Member::from).collect(),
            ["m", "n"].into_iter().map(Member::from).collect(),
        );
        let comments: Vec<IssueComment> = entries
            .iter()
            .enumerate()
            .map(|(i, (author, body))| IssueComment::new(i as u64, *author, *body))
            .collect();
        aggregate(&rosters, &comments)
    }

    fn pipeline() -> Policy {
        Policy::for_kind(GovernanceKind::Pipeline)
    }

    fn sig() -> Policy {
        Policy::for_kind(GovernanceKind::Sig)
    }

    const COMMENT: TrackerEvent = TrackerEvent::Commented { issue_closed: false };
    const NOT_PLANNED: TrackerEvent = TrackerEvent::Closed { not_planned: true };

    fn timed_out() -> TrackerEvent {
        TrackerEvent::LabelChanged {
            label: Some("timed-out".to_string()),
            removed: false,
        }
    }

    #[test]
    fn pipeline_two_core_approvals() {
        let v = votes(&[("a", "/approve"), ("b", "/approve")]);
        assert_eq!(pipeline().evaluate(&v, &COMMENT), Verdict::Approved);
    }

    #[test]
    fn pipeline_core_plus_maintainer() {
        let v = votes(&[("a", "/approve"), ("m", "/approve")]);
        assert_eq!(pipeline().evaluate(&v, &COMMENT), Verdict::Approved);
    }

    #[test]
    fn pipeline_single_core_is_pending() {
        let v = votes(&[("a", "/approve")]);
        assert_eq!(pipeline().evaluate(&v, &COMMENT), Verdict::Pending);
    }

    #[test]
    fn pipeline_maintainers_alone_are_pending() {
        let v = votes(&[("m", "/approve"), ("n", "/approve")]);
        assert_eq!(pipeline().evaluate(&v, &COMMENT), Verdict::Pending);
    }

    #[test]
    fn sig_needs_two_core() {
        let one = votes(&[("a", "/approve"), ("m", "/approve"), ("n", "/approve")]);
        assert_eq!(sig().evaluate(&one, &COMMENT), Verdict::Pending);
        let two = votes(&[("a", "/approve"), ("b", "/approve")]);
        assert_eq!(sig().evaluate(&two, &COMMENT), Verdict::Approved);
    }

    #[test]
    fn rejection_only_on_not_planned_close() {
        let v = votes(&[("a", "/reject")]);
        assert_eq!(pipeline().evaluate(&v, &COMMENT), Verdict::Pending);
        assert_eq!(pipeline().evaluate(&v, &NOT_PLANNED), Verdict::Rejected);
        assert_eq!(
            pipeline().evaluate(&v, &TrackerEvent::Closed { not_planned: false }),
            Verdict::Pending
        );
        assert_eq!(sig().evaluate(&v, &NOT_PLANNED), Verdict::Rejected);
    }

    #[test]
    fn maintainer_rejection_counts_for_pipeline_only() {
        let v = votes(&[("m", "/reject")]);
        assert_eq!(pipeline().evaluate(&v, &NOT_PLANNED), Verdict::Rejected);
        assert_eq!(sig().evaluate(&v, &NOT_PLANNED), Verdict::Pending);
    }

    #[test]
    fn not_planned_close_without_rejections_falls_through_to_threshold() {
        let v = votes(&[("a", "/approve"), ("b", "/approve")]);
        assert_eq!(pipeline().evaluate(&v, &NOT_PLANNED), Verdict::Approved);
        assert_eq!(pipeline().evaluate(&votes(&[]), &NOT_PLANNED), Verdict::Pending);
    }

    #[test]
    fn rejection_beats_approval_threshold() {
        let v = votes(&[("a", "/approve"), ("b", "/approve"), ("c", "/reject")]);
        assert_eq!(pipeline().evaluate(&v, &NOT_PLANNED), Verdict::Rejected);
    }

    #[test]
    fn timed_out_label_wins() {
        let v = votes(&[("a", "/approve"), ("b", "/approve"), ("c", "/reject")]);
        assert_eq!(pipeline().evaluate(&v, &timed_out()), Verdict::TimedOut);
        assert_eq!(sig().evaluate(&v, &timed_out()), Verdict::TimedOut);
        let removal = TrackerEvent::LabelChanged {
            label: Some("timed-out".to_string()),
            removed: true,
        };
        assert_eq!(pipeline().evaluate(&v, &removal), Verdict::TimedOut);
    }

    #[test]
    fn other_labels_fall_through() {
        let v = votes(&[("a", "/approve"), ("b", "/approve")]);
        let event = TrackerEvent::LabelChanged {
            label: Some("documentation".to_string()),
            removed: false,
        };
        assert_eq!(sig().evaluate(&v, &event), Verdict::Approved);
        let event = TrackerEvent::LabelChanged {
            label: None,
            removed: true,
        };
        assert_eq!(pipeline().evaluate(&votes(&[]), &event), Verdict::Pending);
    }
}
