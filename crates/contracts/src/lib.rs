//! Wire types shared by the RuleForge admin host and the dashboard UI.

pub mod admin;
pub mod system;
