//! Installs a built Node.js tree into a prefix, or removes it again.
//!
//! The runtime binary (or shared library), public headers, documentation,
//! tracing scripts, debugger helpers and the bundled `npm` / `corepack`
//! packages are copied from the source tree into
//! `<staging root><prefix>/`, routed by a handful of flags from
//! `config.gypi` and by the host platform.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: load `config.gypi`
//! - **[`manifest`]**: decide which files go where
//! - **[`installer`]**: copy, link, remove and prune
//! - **[`commands`]**: top-level `install` / `uninstall` orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod installer;
pub mod logging;
pub mod manifest;
pub mod platform;
