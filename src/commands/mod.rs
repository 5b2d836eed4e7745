// Command handlers. Each submodule owns one command group and drives the
// backend client chosen at startup.

pub mod api;
pub mod auth;
pub mod marketplace;
pub mod query;
pub mod team;

use anyhow::{Context as _, Result};
use log::debug;

use crate::api::{create_client_with, BackendClient};
use crate::cli::{ApiCommand, AuthCommand, Cli, Command, MarketplaceCommand, QueryCommand, TeamCommand};
use crate::config::{ConfigStore, EnvSettings};

/// What every handler needs: the backend client for this process and the
/// credential store.
pub struct Context {
    pub client: Box<dyn BackendClient>,
    pub store: ConfigStore,
}

impl Context {
    pub fn new(client: Box<dyn BackendClient>, store: ConfigStore) -> Self {
        Self { client, store }
    }
}

/// Resolve the backend once and dispatch the parsed command.
pub fn run(cli: Cli) -> Result<()> {
    let client = create_client_with(
        cli.use_mock,
        cli.api_url.as_deref(),
        &EnvSettings::from_env(),
    )
    .context("Failed to create backend client")?;
    let store = ConfigStore::default_location()?;
    debug!("Using config file {}", store.path().display());

    let ctx = Context::new(client, store);

    match cli.command {
        Command::Signup | Command::Auth(AuthCommand::Signup) => auth::signup(&ctx),
        Command::Login | Command::Auth(AuthCommand::Login) => auth::login(&ctx),
        Command::Auth(AuthCommand::Logout) => auth::logout(&ctx),
        Command::Auth(AuthCommand::Status) => auth::status(&ctx),
        Command::Api(ApiCommand::Add(args)) => api::add(&ctx, args),
        Command::Api(ApiCommand::AddSecret(args)) => {
            api::add_secret(&ctx, &args.api_name, args.key_name)
        }
        Command::Api(ApiCommand::List { scope }) => api::list(&ctx, scope),
        Command::Query(QueryCommand::Ask { query_text, output }) => {
            query::ask(&ctx, &query_text, output)
        }
        Command::Query(QueryCommand::Interactive) => query::interactive(&ctx),
        Command::Query(QueryCommand::History { limit }) => query::history(&ctx, limit),
        Command::Team(TeamCommand::Invite { email, role }) => team::invite(&ctx, &email, role),
        Command::Team(TeamCommand::Accept { token, email }) => team::accept(&ctx, &token, email),
        Command::Team(TeamCommand::List) => team::list(&ctx),
        Command::Marketplace(MarketplaceCommand::Browse { category }) => {
            marketplace::browse(&ctx, &category)
        }
        Command::Marketplace(MarketplaceCommand::Install { api_name }) => {
            marketplace::install(&ctx, &api_name)
        }
    }
}
