//! CLI command implementations.
//!
//! Each subcommand has its own module with an argument struct and a `run`
//! handler.
//!
//! # Command Modules
//!
//! - [`split`] - Filter the raw file down to one region
//! - [`cleanup`] - Offset coordinates and reduce properties
//! - [`join`] - Attach polygons to an attribute table
//! - [`validate`] - Check required properties
//! - [`build`] - Split and clean up every configured region
//! - [`config`] - Configuration management (path, show, init)

pub mod build;
pub mod cleanup;
pub mod common;
pub mod config;
pub mod join;
pub mod split;
pub mod validate;
