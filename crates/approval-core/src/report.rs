use crate::policy::SIG_CORE_QUORUM;
use crate::tally::VoteState;
use crate::tracker::IssueComment;
use crate::types::{GovernanceKind, Member, StatusLabel, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Prefix that identifies the status comment among an issue's comments.
pub const STATUS_HEADER: &str = "## Approval status:";

const PIPELINE_REQUIREMENT: &str =
    "Required approvals: Either 2 core team members OR 1 core team member + 1 maintainer";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `[@handle](<web_url>/handle)` references, comma separated, or `-`
/// when there are none.
pub fn format_members<'a>(
    web_url: &str,
    members: impl IntoIterator<Item = &'a Member>,
) -> String {
    let base = web_url.trim_end_matches('/');
    let refs: Vec<String> = members
        .into_iter()
        .map(|m| format!("[@{m}]({base}/{m})"))
        .collect();
    if refs.is_empty() {
        "-".to_string()
    } else {
        refs.join(", ")
    }
}

/// Build the full status comment body for a verdict.
///
/// Table rows are only emitted for non-empty member lists, and the table is
/// left out entirely when every list is empty.
pub fn render(verdict: Verdict, votes: &VoteState, kind: GovernanceKind, web_url: &str) -> String {
    let mut body = format!("{STATUS_HEADER} {verdict}\n\n");

    let (column, rows) = match kind {
        GovernanceKind::Pipeline => {
            body.push_str(PIPELINE_REQUIREMENT);
            body.push_str("\n\n");
            let rejected: Vec<&Member> = votes
                .core_rejections()
                .iter()
                .chain(votes.maintainer_rejections())
                .collect();
            let rows = vec![
                ("✅&nbsp;Approved (Core)", refs(votes.core_approvals())),
                ("✅&nbsp;Approved (Maintainer)", refs(votes.maintainer_approvals())),
                ("❌&nbsp;Rejected", rejected),
                ("🕐&nbsp;Pending (Core)", votes.awaiting_core().iter().collect()),
                (
                    "🕐&nbsp;Pending (Maintainer)",
                    votes.awaiting_maintainer().iter().collect(),
                ),
            ];
            ("Team members", rows)
        }
        GovernanceKind::Sig => {
            body.push_str(&format!(
                "SIG proposal requires approvals from {SIG_CORE_QUORUM} core team members.\n\n\
                 Current approvals: {}/{SIG_CORE_QUORUM}\n\n",
                votes.core_approvals().len()
            ));
            let rows = vec![
                ("✅&nbsp;Approved", refs(votes.core_approvals())),
                ("❌&nbsp;Rejected", refs(votes.core_rejections())),
                ("🕐&nbsp;Pending", votes.awaiting_core().iter().collect()),
            ];
            ("Core Team members", rows)
        }
    };

    if rows.iter().all(|(_, members)| members.is_empty()) {
        return body;
    }

    body.push_str(&format!("|Review&nbsp;Status|{column}|\n|--|--|\n"));
    for (status, members) in rows.into_iter().filter(|(_, m)| !m.is_empty()) {
        body.push_str(&format!("| {status} | {} |\n", format_members(web_url, members)));
    }
    body
}

fn refs(set: &BTreeSet<Member>) -> Vec<&Member> {
    set.iter().collect()
}

// ---------------------------------------------------------------------------
// Status comment reconciliation
// ---------------------------------------------------------------------------

/// What to do with the status comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommentAction {
    Unchanged { comment_id: u64 },
    Edit { comment_id: u64 },
    Create,
}

/// The first comment whose body starts with [`STATUS_HEADER`].
pub fn find_status_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments.iter().find(|c| c.body().starts_with(STATUS_HEADER))
}

/// Decide how to bring the status comment in line with `rendered`.
///
/// Bodies are compared after trimming, so re-running with unchanged votes
/// produces no edit.
pub fn reconcile_comment(comments: &[IssueComment], rendered: &str) -> CommentAction {
    match find_status_comment(comments) {
        Some(existing) if existing.body().trim() == rendered.trim() => CommentAction::Unchanged {
            comment_id: existing.id,
        },
        Some(existing) => CommentAction::Edit {
            comment_id: existing.id,
        },
        None => CommentAction::Create,
    }
}

// ---------------------------------------------------------------------------
// Label reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LabelAction {
    Unchanged,
    Replace { labels: Vec<String> },
}

/// The issue's labels with every status label swapped for the verdict's one.
/// Other labels keep their order.
pub fn status_labels(current: &[String], verdict: Verdict) -> Vec<String> {
    let mut labels: Vec<String> = current
        .iter()
        .filter(|l| !StatusLabel::is_status_label(l))
        .cloned()
        .collect();
    labels.push(verdict.status_label().as_str().to_string());
    labels
}

/// Decide whether the label set needs a full-replacement write.
pub fn reconcile_labels(current: &[String], verdict: Verdict) -> LabelAction {
    let labels = status_labels(current, verdict);
    let before: BTreeSet<&String> = current.iter().collect();
    let after: BTreeSet<&String> = labels.iter().collect();
    if before == after && current.len() == labels.len() {
        LabelAction::Unchanged
    } else {
        LabelAction::Replace { labels }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
