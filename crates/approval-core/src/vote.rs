use crate::types::Vote;
use regex::Regex;
use std::sync::OnceLock;

static COMMAND_RE: OnceLock<Regex> = OnceLock::new();

fn command_re() -> &'static Regex {
    COMMAND_RE.get_or_init(|| Regex::new(r"(?i)^/(approve|reject)\b").unwrap())
}

/// Return the last voting command in a comment body, if any.
///
/// A command counts only when it opens a line (after trimming) and is
/// followed by a word boundary, so `/approve later` votes but `/approved`
/// and `I /approve` do not. Anything after the command on the same line is
/// ignored.
pub fn parse_vote(body: Option<&str>) -> Option<Vote> {
    body?
        .split(['\n', '\r'])
        .filter_map(|line| parse_line(line.trim()))
        .last()
}

fn parse_line(line: &str) -> Option<Vote> {
    let caps = command_re().captures(line)?;
    if caps[1].eq_ignore_ascii_case("approve") {
        Some(Vote::Approve)
    } else {
        Some(Vote::Reject)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands() {
        assert_eq!(parse_vote(Some("/approve")), Some(Vote::Approve));
        assert_eq!(parse_vote(Some("/reject")), Some(Vote::Reject));
    }

    #[test]
    fn case_insensitive() {
        for body in ["/APPROVE", "/Approve", "/approve", "/aPpRoVe"] {
            assert_eq!(parse_vote(Some(body)), Some(Vote::Approve), "{body}");
        }
        assert_eq!(parse_vote(Some("/REJECT")), Some(Vote::Reject));
    }

    #[test]
    fn must_start_the_line() {
        assert_eq!(parse_vote(Some("I think we should /approve this")), None);
        assert_eq!(parse_vote(Some("please /reject")), None);
        assert_eq!(parse_vote(Some("   /approve   ")), Some(Vote::Approve));
        assert_eq!(parse_vote(Some("\t/reject")), Some(Vote::Reject));
    }

    #[test]
    fn requires_word_boundary() {
        assert_eq!(parse_vote(Some("/approve123")), None);
        assert_eq!(parse_vote(Some("/approveX")), None);
        assert_eq!(parse_vote(Some("/approved")), None);
        assert_eq!(parse_vote(Some("/rejection")), None);
        assert_eq!(parse_vote(Some("/approve, looks good")), Some(Vote::Approve));
        assert_eq!(parse_vote(Some("/reject - needs work")), Some(Vote::Reject));
    }

    #[test]
    fn last_command_in_body_wins() {
        assert_eq!(
            parse_vote(Some("/approve\n/reject\n/approve")),
            Some(Vote::Approve)
        );
        assert_eq!(
            parse_vote(Some("/approve\nsome discussion\n/reject")),
            Some(Vote::Reject)
        );
    }

    #[test]
    fn mixed_line_endings() {
        assert_eq!(parse_vote(Some("hello\r\n/reject\r\n")), Some(Vote::Reject));
        assert_eq!(parse_vote(Some("/reject\r/approve")), Some(Vote::Approve));
    }

    #[test]
    fn empty_and_missing_bodies() {
        assert_eq!(parse_vote(None), None);
        assert_eq!(parse_vote(Some("")), None);
        assert_eq!(parse_vote(Some("\n\n  \n")), None);
        assert_eq!(parse_vote(Some("LGTM!")), None);
    }
}
