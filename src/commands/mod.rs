mod common;
mod contributions;
mod init;
mod profile;
mod repos;

pub use common::{GlobalArgs, Host, run};
pub use contributions::{ContributionsArgs, show_contributions};
pub use init::{InitArgs, init_config};
pub use profile::{ProfileArgs, show_profile};
pub use repos::{ReposArgs, show_repositories};

const LOG_TARGET: &str = "commands";
