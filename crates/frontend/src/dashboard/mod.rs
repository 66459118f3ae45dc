//! Admin dashboard for the rule-based request filter: rules, recent blocked
//! requests and the analyzer job.

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod state;
pub mod sync;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
