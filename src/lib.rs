//! # commitwatch
//!
//! Polls a GitHub repository for new commits and runs a redeploy script
//! when something changed.
//!
//! A pass ([`core::watcher::watch_once`]) fetches the five newest commits of
//! the default branch, compares their short hashes with the ones recorded in
//! the state file, rewrites that file and runs the deployment script when at
//! least one hash is new (or when no state exists yet), and finally writes a
//! report of the fetched commits to the log.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod exec;
pub mod github;
pub mod log;
