#![allow(clippy::needless_pass_by_value)]

pub mod config;
pub mod history;
pub mod init;
pub mod outcome;
pub mod spin;
pub mod status;
