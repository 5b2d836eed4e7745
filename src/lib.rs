// Library root
// -----------
// This crate exposes the library surface of the `outris` CLI. The binary
// (`main.rs`) parses arguments and hands them to `commands::run`.
//
// Module responsibilities:
// - `api`: the backend client contract with its mock and HTTP
//   implementations, and the policy that picks one per process.
// - `models`: typed views over backend responses.
// - `config`: credential file and environment settings.
// - `commands`: the command groups (auth, api, query, team, marketplace).
// - `ui`: prompts, spinners and rendering shared by the commands.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod ui;
pub mod validators;

#[cfg(test)]
mod tests;

pub use api::{create_client, BackendClient, BackendKind, MockBackendClient, RealBackendClient};
pub use error::{ClientError, ConfigError};
