//! gh-portfolio crate
//!
//! This crate is an implementation detail of the `gh-portfolio` tool. It fetches a GitHub user's
//! repositories and activity through the public REST API and turns them into portfolio data,
//! most notably a ranked summary of the user's contributions to repositories owned by others.

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod contributions;

#[doc(hidden)]
pub mod github;

#[doc(hidden)]
pub mod misc;

#[doc(hidden)]
pub mod portfolio;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run};
