use clap::{Parser, ValueEnum};
use linktracker_service::hasher::{DEFAULT_COST, MAX_COST, MIN_COST};
use std::fmt::{Display, Formatter};

pub const BCRYPT_COST_ENV: &str = "LINKTRACKER_BCRYPT_COST";
pub const LOG_FORMAT_ENV: &str = "LINKTRACKER_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

/// Reads `ACTION key:value ...` commands from stdin and answers on stdout.
///
/// Logs go to stderr; the level is taken from `RUST_LOG`.
#[derive(Debug, Parser)]
#[command(name = "linktracker-shell")]
pub struct CLI {
    #[arg(
        long,
        env = BCRYPT_COST_ENV,
        default_value_t = DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(MIN_COST as i64..=MAX_COST as i64),
    )]
    pub bcrypt_cost: u32,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
