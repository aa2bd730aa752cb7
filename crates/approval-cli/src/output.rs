use approval_core::dispatch::Outcome;
use approval_core::report::{CommentAction, LabelAction};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// One line per run: verdict plus what was written.
pub fn summary(issue: u64, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Ignored { reason } => format!("#{issue}: ignored ({reason})"),
        Outcome::Updated {
            verdict,
            comment,
            labels,
            ..
        } => {
            let comment = match comment {
                CommentAction::Unchanged { .. } => "status comment unchanged".to_string(),
                CommentAction::Edit { comment_id } => {
                    format!("status comment {comment_id} updated")
                }
                CommentAction::Create => "status comment created".to_string(),
            };
            let labels = match labels {
                LabelAction::Unchanged => "labels unchanged".to_string(),
                LabelAction::Replace { labels } => format!("labels set to [{}]", labels.join(", ")),
            };
            format!("#{issue}: {verdict}; {comment}; {labels}")
        }
    }
}
