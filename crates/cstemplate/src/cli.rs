//! Clap derive structures for the `cstemplate` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cstemplate -- manage CloudStack templates from an INI file
#[derive(Debug, Parser)]
#[command(
    name = "cstemplate",
    version,
    about = "Register, delete, and list CloudStack templates",
    long_about = "Register, delete, and list CloudStack templates.\n\n\
        Connection details and per-command defaults are read from an INI file;\n\
        command-line values take precedence over the file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file
    #[arg(
        long,
        short = 'i',
        env = "CSTEMPLATE_INI",
        default_value = "/etc/cstemplate.ini",
        global = true
    )]
    pub ini: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register templates and wait until each is ready
    #[command(alias = "reg")]
    Register(RegisterArgs),

    /// Delete templates by id
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// List templates as a table
    #[command(alias = "ls")]
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Template name; registers only this template instead of the [register] section
    #[arg(requires = "url")]
    pub name: Option<String>,

    /// Source image URL for NAME
    pub url: Option<String>,

    /// OS type search term (overrides [main] ostype)
    #[arg(long, short = 'o')]
    pub ostype: Option<String>,

    /// Whether the template supports password reset (only `false` overrides the file)
    #[arg(long = "passwordenabled", short = 'p', value_name = "BOOL")]
    pub password_enabled: Option<bool>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Template ids; defaults to every value in the [delete] section
    pub ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Search term, or `all` for every template
    #[arg(long, short = 'k')]
    pub keyword: Option<String>,

    /// Comma-separated columns to show (replaces the [list] section toggles)
    #[arg(long, short = 'c', value_name = "COLUMNS")]
    pub columns: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
