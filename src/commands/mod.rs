//! CLI command definitions and dispatch.

pub mod auth;
pub mod config;
pub mod docs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use docshare_client::{ApiClient, FileTokenStore, RouteGuard, SessionManager};
use docshare_core::config::AppConfig;
use docshare_core::error::{AppError, ErrorKind};
use docshare_core::traits::TokenStore;
use docshare_core::types::User;

/// Where unauthenticated users are pointed to.
pub const LOGIN_COMMAND: &str = "`docshare login`";

/// DocShare: share documents with your team
#[derive(Debug, Parser)]
#[command(name = "docshare", version, about, long_about = None)]
pub struct Cli {
    /// Path to an extra configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login(auth::LoginArgs),
    /// Create a new account
    Register(auth::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Document management
    Docs(docs::DocsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, &config, self.format).await,
            Commands::Register(args) => auth::register(args, &config).await,
            Commands::Logout => auth::logout(&config),
            Commands::Whoami => auth::whoami(&config, self.format).await,
            Commands::Docs(args) => docs::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Helper: build the API client backed by the on-disk token store
pub fn api_client(config: &AppConfig) -> Result<ApiClient, AppError> {
    config.validate()?;
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::from_config(&config.session));
    ApiClient::new(&config.api, store)
}

/// Helper: build a session manager and resolve the stored token
pub async fn connect(config: &AppConfig) -> Result<SessionManager, AppError> {
    let api = api_client(config)?;
    Ok(SessionManager::start(api).await)
}

/// Helper: the logged-in user, or an error pointing at `docshare login`
pub async fn require_user(session: &SessionManager) -> Result<User, AppError> {
    RouteGuard::with_login_route(session.subscribe(), LOGIN_COMMAND)
        .require()
        .await
}

/// Helper: map an interactive prompt failure
pub fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::with_source(ErrorKind::Internal, "Failed to read input", err)
}
