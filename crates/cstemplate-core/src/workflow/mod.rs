//! The register, delete, and list workflows plus readiness polling.
//!
//! Each workflow writes its user-facing lines to a caller-supplied writer
//! and returns a summary; lookup failures come back as errors instead of
//! terminating the process.

pub mod delete;
pub mod list;
pub mod poller;
pub mod register;

#[cfg(test)]
mod fake;

pub use delete::{DeleteSummary, delete};
pub use list::{ListSummary, list};
pub use poller::{PollOutcome, StatusPoller};
pub use register::{RegisterSummary, register, resolve_os_type, resolve_zone};
