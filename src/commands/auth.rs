//! Login, registration and session CLI commands.

use std::io::BufRead;

use clap::Args;
use dialoguer::{Input, Password};

use crate::output::{self, OutputFormat};
use docshare_client::{FileTokenStore, SessionManager};
use docshare_client::session::Registration;
use docshare_core::config::AppConfig;
use docshare_core::error::{AppError, ErrorKind};
use docshare_core::traits::TokenStore;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username; prompted for when omitted
    #[arg(short, long)]
    pub username: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Log in and persist the token
pub async fn login(args: &LoginArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let username = match &args.username {
        Some(name) => name.clone(),
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(super::prompt_error)?,
    };
    let password = if args.password_stdin {
        read_stdin_password()?
    } else {
        Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(super::prompt_error)?
    };

    let session = SessionManager::new(super::api_client(config)?);
    let user = session.login(&username, &password).await?;

    match format {
        OutputFormat::Table => output::print_success(&format!(
            "Logged in as {} <{}>",
            user.name, user.email
        )),
        OutputFormat::Json => output::print_item(&user, format),
    }
    Ok(())
}

/// Create an account; the user logs in separately afterwards
pub async fn register(args: &RegisterArgs, config: &AppConfig) -> Result<(), AppError> {
    let password = if args.password_stdin {
        read_stdin_password()?
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(super::prompt_error)?
    };

    let registration = Registration::new(&args.name, &args.email, password);
    let session = SessionManager::new(super::api_client(config)?);
    session.register(&registration).await?;

    output::print_success(&format!(
        "Account created for {}. Continue with {}",
        registration.email,
        super::LOGIN_COMMAND
    ));
    Ok(())
}

/// Discard the stored token. Needs no service settings and no network.
pub fn logout(config: &AppConfig) -> Result<(), AppError> {
    FileTokenStore::from_config(&config.session).clear()?;
    tracing::info!("Logged out");
    output::print_success("Logged out");
    Ok(())
}

/// Show the user behind the stored token
pub async fn whoami(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::connect(config).await?;
    let user = super::require_user(&session).await?;
    output::print_item(&user, format);
    Ok(())
}

fn read_stdin_password() -> Result<String, AppError> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read password", e))?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }
    Ok(password)
}
