//! `storefront` command-line client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the same session manager as the web client against a JSON session
//! file, so a login here survives between invocations. Output goes to
//! stdout as JSON; logs go to stderr, filtered by `RUST_LOG`.

mod file_storage;


use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use session::{AuthError, Credentials, GatewayConfig, GatewayError, HttpGateway, Registration, SessionManager};
use tracing_subscriber::EnvFilter;

use crate::file_storage::FileStorage;

const DEFAULT_SESSION_FILE: &str = ".storefront-session.json";

type CliSession = SessionManager<FileStorage, HttpGateway>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("missing {0}")]
    MissingInput(&'static str),
    #[error("not logged in; run `storefront login`")]
    NotLoggedIn,
    #[error("current user is not an admin")]
    NotAdmin,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Storefront session CLI")]
struct Cli {
    /// Backend origin (default `http://localhost:5294`).
    #[arg(long, env = "STOREFRONT_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "STOREFRONT_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account. Does not log in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the persisted session.
    Logout,
    /// Print the persisted user and its admin status.
    Whoami,
    /// Exit non-zero unless the persisted session is an admin.
    Admin,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = GatewayConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = GatewayConfig::new(base_url).base_url;
    }
    let gateway = HttpGateway::new(config)?;
    let manager = SessionManager::new(FileStorage::new(cli.session_file), gateway);

    match cli.command {
        Command::Login { email, password } => run_login(&manager, email, password).await,
        Command::Register { name, email, password, confirm_password } => {
            run_register(&manager, name, email, password, confirm_password).await
        }
        Command::Logout => {
            manager.logout();
            print_json(&json!({ "loggedIn": false }))
        }
        Command::Whoami => run_whoami(&manager).await,
        Command::Admin => run_admin(&manager).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

async fn run_login(manager: &CliSession, email: String, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let is_admin = manager.sign_in(&Credentials::new(email, password)).await?;
    print_json(&session_json(manager, is_admin))
}

async fn run_register(
    manager: &CliSession,
    name: String,
    email: String,
    password: Option<String>,
    confirm_password: Option<String>,
) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let confirm_password = match confirm_password {
        Some(confirm) => confirm,
        None => prompt("Confirm password")?,
    };
    let registration = Registration { name, email, password, confirm_password };
    manager.register(&registration).await?;
    print_json(&json!({
        "registered": registration.email,
        "message": "Registration successful! Please log in.",
    }))
}

async fn run_whoami(manager: &CliSession) -> Result<(), CliError> {
    let is_admin = manager.start().await;
    if !manager.is_logged_in() {
        return Err(CliError::NotLoggedIn);
    }
    print_json(&session_json(manager, is_admin))
}

async fn run_admin(manager: &CliSession) -> Result<(), CliError> {
    let is_admin = manager.start().await;
    if !manager.is_logged_in() {
        return Err(CliError::NotLoggedIn);
    }
    if !is_admin {
        return Err(CliError::NotAdmin);
    }
    print_json(&json!({ "admin": true }))
}

fn session_json(manager: &CliSession, is_admin: bool) -> Value {
    let snapshot = manager.snapshot();
    let Some(session) = snapshot.session() else {
        return json!({ "loggedIn": false });
    };
    json!({
        "loggedIn": true,
        "email": session.email(),
        "name": session.display_name(),
        "roles": session.roles(),
        "admin": is_admin,
    })
}

fn prompt(label: &'static str) -> Result<String, CliError> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(CliError::MissingInput(label));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
