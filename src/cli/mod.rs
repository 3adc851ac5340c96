//! CLI command implementations

pub mod init;
pub mod panels;
pub mod run;
