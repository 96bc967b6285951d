pub mod message;
pub mod model;
pub mod update;

pub use message::{Command, FetchUpdate, Message};
pub use model::App;
pub use update::update;
