//! GitHub REST implementation of [`IssueTracker`].

use crate::config::TrackerConfig;
use crate::error::{ApprovalError, Result};
use crate::tracker::{IssueComment, IssueTracker};
use crate::types::Member;
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const PER_PAGE: usize = 100;

/// Login used for comments whose author account no longer exists.
const GHOST_LOGIN: &str = "ghost";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubComment {
    id: u64,
    body: Option<String>,
    user: Option<GitHubUser>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GitHubIssue {
    #[serde(default)]
    labels: Vec<GitHubLabel>,
}

#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct LabelsRequest<'a> {
    labels: &'a [String],
}

impl GitHubClient {
    pub fn new(
        config: &TrackerConfig,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_url, path))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<GitHubError>() {
            Ok(err) => err.message,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(ApprovalError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let request = self
                .request(Method::GET, path)
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let batch: Vec<T> = self.send(request)?.json()?;
            let last = batch.len() < PER_PAGE;
            items.extend(batch);
            if last {
                break;
            }
            page += 1;
        }
        debug!(path, count = items.len(), "fetched paginated list");
        Ok(items)
    }

    fn issue_path(&self, issue: u64) -> String {
        format!("/repos/{}/{}/issues/{}", self.owner, self.repo, issue)
    }
}

impl IssueTracker for GitHubClient {
    fn team_members(&self, team: &str) -> Result<Vec<Member>> {
        let path = format!("/orgs/{}/teams/{}/members", self.owner, team);
        let users: Vec<GitHubUser> = self.get_all(&path)?;
        Ok(users.into_iter().map(|u| Member::new(u.login)).collect())
    }

    fn issue_comments(&self, issue: u64) -> Result<Vec<IssueComment>> {
        let path = format!("{}/comments", self.issue_path(issue));
        let raw: Vec<GitHubComment> = self.get_all(&path)?;
        let mut comments: Vec<IssueComment> = raw
            .into_iter()
            .map(|c| IssueComment {
                id: c.id,
                author: Member::new(c.user.map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login)),
                body: c.body,
                created_at: c.created_at,
            })
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    fn issue_labels(&self, issue: u64) -> Result<Vec<String>> {
        let request = self.request(Method::GET, &self.issue_path(issue));
        let issue: GitHubIssue = self.send(request)?.json()?;
        Ok(issue.labels.into_iter().map(|l| l.name).collect())
    }

    fn create_comment(&self, issue: u64, body: &str) -> Result<()> {
        let path = format!("{}/comments", self.issue_path(issue));
        let request = self
            .request(Method::POST, &path)
            .json(&CommentRequest { body });
        self.send(request)?;
        Ok(())
    }

    fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let path = format!(
            "/repos/{}/{}/issues/comments/{}",
            self.owner, self.repo, comment_id
        );
        let request = self
            .request(Method::PATCH, &path)
            .json(&CommentRequest { body });
        self.send(request)?;
        Ok(())
    }

    fn set_labels(&self, issue: u64, labels: &[String]) -> Result<()> {
        let path = format!("{}/labels", self.issue_path(issue));
        let request = self
            .request(Method::PUT, &path)
            .json(&LabelsRequest { labels });
        self.send(request)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
