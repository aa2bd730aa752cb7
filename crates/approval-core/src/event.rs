use serde::{Deserialize, Serialize};

/// Webhook fields describing what triggered this run, as passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub event_name: Option<String>,
    pub event_action: Option<String>,
    pub issue_state: Option<String>,
    pub label_name: Option<String>,
    pub issue_state_reason: Option<String>,
}

/// The triggering event, reduced to the cases the approval flow distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerEvent {
    Opened,
    Commented { issue_closed: bool },
    /// `removed` is set for `unlabeled`.
    LabelChanged { label: Option<String>, removed: bool },
    Closed { not_planned: bool },
    Other,
}

impl RawEvent {
    pub fn classify(&self) -> TrackerEvent {
        let name = self.event_name.as_deref();
        let action = self.event_action.as_deref();
        match (name, action) {
            (Some("issue_comment"), _) => TrackerEvent::Commented {
                issue_closed: self.issue_state.as_deref() == Some("closed"),
            },
            (Some("issues"), Some("opened")) => TrackerEvent::Opened,
            (Some("issues"), Some(action @ ("labeled" | "unlabeled"))) => {
                TrackerEvent::LabelChanged {
                    label: self.label_name.clone(),
                    removed: action == "unlabeled",
                }
            }
            (Some("issues"), Some("closed")) => TrackerEvent::Closed {
                not_planned: self.issue_state_reason.as_deref() == Some("not_planned"),
            },
            _ => TrackerEvent::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, action: Option<&str>) -> RawEvent {
        RawEvent {
            event_name: Some(name.to_string()),
            event_action: action.map(str::to_string),
            ..RawEvent::default()
        }
    }

    #[test]
    fn issue_opened() {
        assert_eq!(raw("issues", Some("opened")).classify(), TrackerEvent::Opened);
    }

    #[test]
    fn comment_carries_issue_state() {
        let mut event = raw("issue_comment", Some("created"));
        assert_eq!(
            event.classify(),
            TrackerEvent::Commented { issue_closed: false }
        );
        event.issue_state = Some("closed".to_string());
        assert_eq!(event.classify(), TrackerEvent::Commented { issue_closed: true });
    }

    #[test]
    fn label_added_and_removed() {
        for action in ["labeled", "unlabeled"] {
            let mut event = raw("issues", Some(action));
            event.label_name = Some("timed-out".to_string());
            assert_eq!(
                event.classify(),
                TrackerEvent::LabelChanged {
                    label: Some("timed-out".to_string()),
                    removed: action == "unlabeled",
                }
            );
        }
    }

    #[test]
    fn closed_with_reason() {
        let mut event = raw("issues", Some("closed"));
        event.issue_state_reason = Some("not_planned".to_string());
        assert_eq!(event.classify(), TrackerEvent::Closed { not_planned: true });
        event.issue_state_reason = Some("completed".to_string());
        assert_eq!(event.classify(), TrackerEvent::Closed { not_planned: false });
    }

    #[test]
    fn unrecognised_combinations_are_other() {
        assert_eq!(raw("issues", Some("edited")).classify(), TrackerEvent::Other);
        assert_eq!(raw("push", None).classify(), TrackerEvent::Other);
        assert_eq!(RawEvent::default().classify(), TrackerEvent::Other);
    }
}
