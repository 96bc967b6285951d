use std::env;
use std::time::Duration;

use crate::data::{Account, Label, PullRequest, PullResponse, UserResponse};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// The listing endpoint caps `per_page` at 100; larger values are clamped.
pub const MAX_PER_PAGE: u8 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a fetch stopped early. `Status` and `Malformed` are handled
/// identically by callers; they are kept apart so the surfaced message can
/// say what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub responded with {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("could not parse GitHub response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Bearer credential from the environment, if any. An unset or blank
/// variable means unauthenticated requests, not an error.
pub fn github_token() -> Option<String> {
    let raw = env::var("GITHUB_TOKEN").ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Create an HTTP client with GitHub API headers. The token, when present,
/// is attached to every request to raise the unauthenticated rate limit.
pub fn create_client(token: Option<&str>) -> anyhow::Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
    headers.insert(USER_AGENT, HeaderValue::from_static("extprs"));
    if let Some(token) = token {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
    }

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Which repository to list and how far to paginate.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub owner: String,
    pub repo: String,
    pub per_page: u8,
    pub max_pages: u32,
}

/// Fetch open pull requests page by page, starting at page 1.
///
/// Pages are requested strictly in sequence. Each successfully parsed page
/// is handed to `on_page` before the next request goes out, so a slow
/// multi-page fetch surfaces its first page immediately. Pagination stops
/// on the first empty page or once `max_pages` pages have been fetched;
/// any non-success status aborts the whole fetch with no retry.
pub async fn fetch_open_prs<F>(
    client: &reqwest::Client,
    api_base: &str,
    params: &FetchParams,
    mut on_page: F,
) -> Result<Vec<PullRequest>, FetchError>
where
    F: FnMut(&[PullRequest]),
{
    let per_page = params.per_page.min(MAX_PER_PAGE).to_string();
    let url = format!("{}/repos/{}/{}/pulls", api_base, params.owner, params.repo);

    let mut prs = Vec::new();
    for page in 1..=params.max_pages {
        let page = page.to_string();
        let response = client
            .get(&url)
            .query(&[
                ("state", "open"),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        // Parse from text rather than reqwest's json() so a 2xx body that
        // isn't the expected array surfaces as Malformed, not Transport.
        let body = response.text().await?;
        let raw_page: Vec<PullResponse> = serde_json::from_str(&body)?;

        if raw_page.is_empty() {
            break;
        }

        let converted: Vec<PullRequest> = raw_page.into_iter().map(into_pull_request).collect();
        on_page(&converted);
        prs.extend(converted);
    }

    Ok(prs)
}

fn into_account(user: UserResponse) -> Account {
    Account {
        login: user.login,
        avatar_url: user.avatar_url,
    }
}

fn into_pull_request(raw: PullResponse) -> PullRequest {
    let author = raw.user.map(into_account).unwrap_or_else(|| Account {
        login: "unknown".to_string(),
        avatar_url: None,
    });

    PullRequest {
        id: raw.id,
        number: raw.number,
        title: raw.title,
        author,
        html_url: raw.html_url,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        state: raw.state.parse().unwrap(),
        labels: raw
            .labels
            .into_iter()
            .map(|l| Label {
                name: l.name,
                color: l.color,
            })
            .collect(),
        assignees: raw.assignees.into_iter().map(into_account).collect(),
        requested_reviewers: raw
            .requested_reviewers
            .into_iter()
            .map(into_account)
            .collect(),
    }
}
