//! Domain layer between `cstemplate-api` and the `cstemplate` CLI.
//!
//! - **[`TemplateService`]**: the five remote operations the workflows
//!   need, implemented by [`cstemplate_api::CloudStackClient`] and by test
//!   fakes.
//! - **Workflows** ([`workflow`]): register (with [`StatusPoller`]),
//!   delete, and list, each writing progress lines to a caller-supplied
//!   writer and returning a summary.
//! - **Columns** ([`columns`]): named extractors for every template
//!   attribute plus the visible-column overlay used by `list`.
//! - **Formatting** ([`format`]) and **escaping** ([`escape`]) helpers.

pub mod columns;
pub mod config;
pub mod error;
pub mod escape;
pub mod format;
pub mod service;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use columns::ColumnSelection;
pub use config::{
    AuthCredentials, ConnectionConfig, ListSettings, RegisterSettings, TemplateSource,
};
pub use error::CoreError;
pub use service::{TemplateService, connect, disconnect};
pub use workflow::{
    DeleteSummary, ListSummary, PollOutcome, RegisterSummary, StatusPoller,
};
