//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod history;
mod login;
mod logout;
mod remove;
mod render;
mod whoami;

pub use check::run_check;
pub use completions::run_completions;
pub use history::run_history;
pub use login::run_login;
pub use logout::run_logout;
pub use remove::run_remove;
pub use whoami::run_whoami;
