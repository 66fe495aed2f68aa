//! CLI command implementations

pub mod effectiveness;
pub mod init;
pub mod record_test;
pub mod schedule;
pub mod signoff;
pub mod trainee;
