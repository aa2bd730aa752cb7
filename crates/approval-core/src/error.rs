use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("unknown governance kind '{0}': expected 'pipeline' or 'sig'")]
    InvalidGovernance(String),

    #[error("failed to fetch {team} team members: {source}")]
    Roster {
        team: String,
        #[source]
        source: Box<ApprovalError>,
    },

    #[error("tracker API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApprovalError>;
