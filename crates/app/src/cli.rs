use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};
use services::{AuthBackend, FirebaseConfig};

#[derive(Debug)]
pub enum CliError {
    MissingFirebaseKey,
    InvalidDbUrl { raw: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingFirebaseKey => {
                write!(f, "--auth firebase requires SKILL_FIREBASE_API_KEY")
            }
            CliError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthKind {
    /// Accounts stored next to the catalog, passwords hashed with argon2.
    Local,
    /// Firebase Authentication over its REST API.
    Firebase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the desktop client (default).
    Ui,
    /// Write the demo catalog into the database.
    Seed,
}

#[derive(Debug, Parser)]
#[command(name = "skill-lab", version, about = "Browse hobby courses, take quizzes, track progress")]
pub struct Cli {
    /// `SQLite` database URL or path.
    #[arg(long = "db", env = "SKILL_DB_URL", default_value = "sqlite://dev.sqlite3", global = true)]
    pub db_url: String,

    #[arg(long, env = "SKILL_AUTH", value_enum, default_value_t = AuthKind::Local, global = true)]
    pub auth: AuthKind,

    #[arg(long, env = "SKILL_FIREBASE_API_KEY", hide_env_values = true, global = true)]
    pub firebase_api_key: Option<String>,

    /// Overrides the Identity Toolkit endpoint, e.g. for the auth emulator.
    #[arg(long, env = "SKILL_FIREBASE_AUTH_URL", global = true)]
    pub firebase_auth_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Ui)
    }

    /// Database URL normalised to an absolute `sqlite://` URL.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidDbUrl` for a blank value.
    pub fn database_url(&self) -> Result<String, CliError> {
        if self.db_url.trim().is_empty() {
            return Err(CliError::InvalidDbUrl {
                raw: self.db_url.clone(),
            });
        }
        Ok(normalize_sqlite_url(&self.db_url))
    }

    /// # Errors
    ///
    /// Returns `CliError::MissingFirebaseKey` when Firebase is selected without a key.
    pub fn auth_backend(&self) -> Result<AuthBackend, CliError> {
        match self.auth {
            AuthKind::Local => Ok(AuthBackend::Local),
            AuthKind::Firebase => {
                let api_key = self
                    .firebase_api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .ok_or(CliError::MissingFirebaseKey)?;
                Ok(AuthBackend::Firebase(FirebaseConfig::new(
                    api_key,
                    self.firebase_auth_url.clone(),
                )))
            }
        }
    }
}

pub fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and its directory) so `SQLite` can open it.
///
/// # Errors
///
/// Returns an error if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| CliError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(CliError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
