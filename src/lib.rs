pub mod app;
pub mod data;
pub mod icons;
pub mod services;
pub mod utils;
pub mod view;

pub use app::{update, App, Command, FetchUpdate, Message};
pub use data::{ExcludedAuthors, PullRequest};
pub use services::config::get_config_path;
pub use view::ui;
