//! Command dispatch: CLI args -> config merge -> core workflow.

pub mod delete;
pub mod list;
pub mod register;

use cstemplate_config::IniConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Load the configuration file and run the selected workflow.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let config = IniConfig::load(&global.ini)?;

    match cmd {
        Command::Register(args) => register::handle(&config, args).await,
        Command::Delete(args) => delete::handle(&config, args).await,
        Command::List(args) => list::handle(&config, args).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
