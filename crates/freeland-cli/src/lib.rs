//! # freeland-cli
//!
//! Command-line front end for the freeland provisioning pipeline.
//!
//! ## Commands
//!
//! - **enroll**: store the subject name and secret issued by the authority
//! - **run**: provision, start the engine, stop it on SIGINT/SIGTERM
//! - **check**: provision only and report whether the profile is usable
//! - **profile**: print the synthesized profile
//! - **config**: inspect and edit the settings file

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
