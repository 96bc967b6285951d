use serde::Deserialize;

// REST response types for the pull request listing endpoint.
// Field names match the GitHub JSON payload; only the fields the
// application consumes are declared.

#[derive(Debug, Deserialize)]
pub struct PullResponse {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub user: Option<UserResponse>,
    #[serde(default)]
    pub labels: Vec<LabelResponse>,
    #[serde(default)]
    pub assignees: Vec<UserResponse>,
    #[serde(default)]
    pub requested_reviewers: Vec<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LabelResponse {
    pub name: String,
    #[serde(default)]
    pub color: String,
}
