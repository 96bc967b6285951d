pub mod models;
pub mod types;

pub use models::{Account, ExcludedAuthors, Label, PrState, PullRequest};
pub use types::{LabelResponse, PullResponse, UserResponse};

pub use crate::icons::SPINNER_FRAMES;
