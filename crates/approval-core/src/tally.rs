use crate::tracker::IssueComment;
use crate::types::{Member, Tier, Vote};
use crate::vote::parse_vote;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// Membership of both voting tiers, in the order the tracker listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rosters {
    pub core: Vec<Member>,
    pub maintainer: Vec<Member>,
}

impl Rosters {
    pub fn new(core: Vec<Member>, maintainer: Vec<Member>) -> Self {
        Self { core, maintainer }
    }

    /// The tier a member votes in. Core is checked first, so someone on both
    /// rosters always votes as core.
    pub fn tier_of(&self, member: &Member) -> Option<Tier> {
        if self.core.contains(member) {
            Some(Tier::Core)
        } else if self.maintainer.contains(member) {
            Some(Tier::Maintainer)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// VoteState
// ---------------------------------------------------------------------------

/// Per-tier approvals, rejections and outstanding reviewers.
///
/// Only [`aggregate`] builds one. Within a tier, a member is never in both
/// the approval and the rejection set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoteState {
    core_approvals: BTreeSet<Member>,
    core_rejections: BTreeSet<Member>,
    maintainer_approvals: BTreeSet<Member>,
    maintainer_rejections: BTreeSet<Member>,
    awaiting_core: Vec<Member>,
    awaiting_maintainer: Vec<Member>,
}

impl VoteState {
    pub fn core_approvals(&self) -> &BTreeSet<Member> {
        &self.core_approvals
    }

    pub fn core_rejections(&self) -> &BTreeSet<Member> {
        &self.core_rejections
    }

    pub fn maintainer_approvals(&self) -> &BTreeSet<Member> {
        &self.maintainer_approvals
    }

    pub fn maintainer_rejections(&self) -> &BTreeSet<Member> {
        &self.maintainer_rejections
    }

    pub fn awaiting_core(&self) -> &[Member] {
        &self.awaiting_core
    }

    pub fn awaiting_maintainer(&self) -> &[Member] {
        &self.awaiting_maintainer
    }
}

#[derive(Default)]
struct Ballot {
    approvals: BTreeSet<Member>,
    rejections: BTreeSet<Member>,
}

impl Ballot {
    fn record(&mut self, member: &Member, vote: Vote) {
        let (cast, withdrawn) = match vote {
            Vote::Approve => (&mut self.approvals, &mut self.rejections),
            Vote::Reject => (&mut self.rejections, &mut self.approvals),
        };
        withdrawn.remove(member);
        cast.insert(member.clone());
    }

    fn awaiting(&self, roster: &[Member]) -> Vec<Member> {
        roster
            .iter()
            .filter(|m| !self.approvals.contains(*m) && !self.rejections.contains(*m))
            .cloned()
            .collect()
    }
}

/// Reduce a chronological comment history to the current vote state.
///
/// Each comment from a roster member contributes its last command; a later
/// comment replaces that author's earlier decision. Comments from anyone
/// outside both rosters are ignored.
pub fn aggregate(rosters: &Rosters, comments: &[IssueComment]) -> VoteState {
    let mut core = Ballot::default();
    let mut maintainer = Ballot::default();

    for comment in comments {
        let Some(tier) = rosters.tier_of(&comment.author) else {
            continue;
        };
        let Some(vote) = parse_vote(comment.body.as_deref()) else {
            continue;
        };
        match tier {
            Tier::Core => core.record(&comment.author, vote),
            Tier::Maintainer => maintainer.record(&comment.author, vote),
        }
    }

    VoteState {
        awaiting_core: core.awaiting(&rosters.core),
        awaiting_maintainer: maintainer.awaiting(&rosters.maintainer),
        core_approvals: core.approvals,
        core_rejections: core.rejections,
        maintainer_approvals: maintainer.approvals,
        maintainer_rejections: maintainer.rejections,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
