pub mod config;
pub mod filter;
pub mod github;
pub mod search;

pub use config::{get_config_path, load_settings, Settings};
pub use filter::filter_prs;
pub use github::{
    create_client, fetch_open_prs, github_token, FetchError, FetchParams, GITHUB_API_BASE,
    MAX_PER_PAGE,
};
pub use search::search_prs;
