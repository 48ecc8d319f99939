use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const SERVER_ADDRESS_ENV: &str = "SERVER_ADDRESS";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const FILE_STORAGE_PATH_ENV: &str = "FILE_STORAGE_PATH";
pub const DATABASE_DSN_ENV: &str = "DATABASE_DSN";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "plain")]
    Plain,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plain => write!(f, "plain"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Which repository backs the service, derived from the other settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    Postgres(String),
    File(PathBuf),
    Memory,
}

#[derive(Debug, Parser)]
#[command(name = "shorty", about = "URL shortener HTTP server")]
pub struct CLI {
    /// Address and port to listen on; ":8080" binds every interface.
    #[arg(short = 'a', long, env = SERVER_ADDRESS_ENV, default_value = DEFAULT_SERVER_ADDRESS)]
    pub server_address: String,

    /// Base of the shortened URLs handed back to clients.
    #[arg(short = 'b', long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Append-only JSON log for the file-backed store.
    #[arg(short = 'f', long, env = FILE_STORAGE_PATH_ENV)]
    pub file_storage_path: Option<PathBuf>,

    /// Postgres connection string; takes precedence over the file store.
    #[arg(short = 'd', long, env = DATABASE_DSN_ENV)]
    pub database_dsn: Option<String>,

    #[arg(long, env = LOG_LEVEL_ENV, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl CLI {
    /// Listen address in a form `TcpListener::bind` accepts.
    pub fn listen_addr(&self) -> String {
        if self.server_address.starts_with(':') {
            format!("0.0.0.0{}", self.server_address)
        } else {
            self.server_address.clone()
        }
    }

    pub fn storage(&self) -> StorageChoice {
        if let Some(dsn) = self.database_dsn.as_deref().filter(|dsn| !dsn.is_empty()) {
            return StorageChoice::Postgres(dsn.to_owned());
        }

        match &self.file_storage_path {
            Some(path) if !path.as_os_str().is_empty() => StorageChoice::File(path.clone()),
            _ => StorageChoice::Memory,
        }
    }
}
