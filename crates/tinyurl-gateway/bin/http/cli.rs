use clap::{Parser, ValueEnum};
use tinyurl_generator::seq;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "TINYURL_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "TINYURL_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "TINYURL_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "TINYURL_MYSQL_DSN";
pub const MYSQL_REPLICA_DSN_ENV: &str = "TINYURL_MYSQL_REPLICA_DSN";
pub const REDIS_URL_ENV: &str = "TINYURL_REDIS_URL";
pub const REDIS_REPLICA_URL_ENV: &str = "TINYURL_REDIS_REPLICA_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "TINYURL_REDIS_KEY_PREFIX";
pub const GENERATOR_ENV: &str = "TINYURL_GENERATOR";
pub const GENERATOR_PREFIX_ENV: &str = "TINYURL_GENERATOR_PREFIX";
pub const LOG_FORMAT_ENV: &str = "TINYURL_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_GENERATOR_PREFIX: &str = "tu";
pub const DEFAULT_REDIS_KEY_PREFIX: &str = tinyurl_storage::redis::DEFAULT_KEY_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    Nanoid,
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Nanoid => write!(f, "nanoid"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tinyurl-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public address prepended to every short code.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = MYSQL_REPLICA_DSN_ENV)]
    pub mysql_replica_dsn: Option<String>,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = REDIS_REPLICA_URL_ENV)]
    pub redis_replica_url: Option<String>,

    /// Namespace for redis keys, so several deployments can share one server.
    #[arg(long, env = REDIS_KEY_PREFIX_ENV, default_value = DEFAULT_REDIS_KEY_PREFIX)]
    pub redis_key_prefix: String,

    #[arg(long, env = GENERATOR_ENV, value_enum, default_value_t = GeneratorArg::Nanoid)]
    pub generator: GeneratorArg,

    /// Prefix for the `seq` generator.
    #[arg(
        long,
        env = GENERATOR_PREFIX_ENV,
        default_value = DEFAULT_GENERATOR_PREFIX,
        value_parser = parse_generator_prefix,
    )]
    pub generator_prefix: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

fn parse_generator_prefix(value: &str) -> Result<String, String> {
    seq::validate_prefix(value).map_err(|err| err.to_string())?;
    Ok(value.to_string())
}
