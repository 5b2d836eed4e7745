// Command-line surface. Parsing only; `commands::run` does the work.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::api::DEFAULT_HISTORY_LIMIT;
use crate::models::{InviteRole, OutputFormat, Scope, Visibility};

#[derive(Debug, Parser)]
#[command(name = "outris")]
#[command(about = "Natural language CLI for any API - register, query, and collaborate")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Use the mock backend (true) or the real one (false). Overrides OUTRIS_USE_MOCK.
    #[arg(long, global = true, value_name = "BOOL")]
    pub use_mock: Option<bool>,

    /// Backend base URL. Overrides OUTRIS_API_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// API management commands
    #[command(subcommand)]
    Api(ApiCommand),
    /// Query commands
    #[command(subcommand)]
    Query(QueryCommand),
    /// Team collaboration commands
    #[command(subcommand)]
    Team(TeamCommand),
    /// Marketplace commands
    #[command(subcommand)]
    Marketplace(MarketplaceCommand),
    /// Create new account
    Signup,
    /// Login with OTP
    Login,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Create new account with OTP verification
    Signup,
    /// Login with OTP
    Login,
    /// Logout and clear stored credentials
    Logout,
    /// Show current authentication status
    Status,
}

#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Register new API from OpenAPI specification
    Add(AddApiArgs),
    /// Store encrypted API credentials
    AddSecret(AddSecretArgs),
    /// List registered APIs
    List {
        #[arg(long, value_enum, default_value_t = Scope::All)]
        scope: Scope,
    },
}

#[derive(Debug, Args)]
pub struct AddApiArgs {
    /// Path to OpenAPI spec (YAML/JSON)
    pub spec_path: PathBuf,
    #[arg(long, value_enum, default_value_t = Visibility::Org)]
    pub visibility: Visibility,
    /// Custom API name (defaults to the spec's info.title)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddSecretArgs {
    /// API name
    pub api_name: String,
    /// Secret name (e.g., API_KEY)
    #[arg(long)]
    pub key_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Query APIs using natural language
    Ask {
        /// Natural language query
        query_text: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        output: OutputFormat,
    },
    /// Start interactive CLI session
    Interactive,
    /// Show recent query history
    History {
        /// Number of recent queries to show
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT,
              value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// Invite team member
    Invite {
        /// Email address to invite
        email: String,
        #[arg(long, value_enum, default_value_t = InviteRole::Member)]
        role: InviteRole,
    },
    /// Accept team invitation
    Accept {
        /// Invitation token from email
        token: String,
        /// Your email address
        #[arg(long)]
        email: Option<String>,
    },
    /// List team members
    List,
}

#[derive(Debug, Subcommand)]
pub enum MarketplaceCommand {
    /// Browse public API marketplace
    Browse {
        /// Filter by category
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Install public API from marketplace
    Install {
        /// API name to install
        api_name: String,
    },
}
