//! Server configuration.
//!
//! コマンドライン引数と環境変数（`HIROBA_HOST`, `PORT`,
//! `HIROBA_UTC_OFFSET_MINUTES`）から `ServerConfig` を組み立てます。

use clap::Parser;
use thiserror::Error;

/// 表示時刻の UTC オフセットの上限（分）。UTC+14:00 / UTC-14:00
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Parser, Debug, Clone)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time room chat server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// UTC offset in minutes used for chat display times (e.g. 540 for JST)
    #[arg(
        long,
        env = "HIROBA_UTC_OFFSET_MINUTES",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub utc_offset_minutes: i32,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("host cannot be empty")]
    EmptyHost,
    #[error("utc offset must be within ±{max} minutes, got {actual}")]
    UtcOffsetOutOfRange { max: i32, actual: i32 },
}

/// 検証済みのサーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub utc_offset_minutes: i32,
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryFrom<ServerArgs> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: ServerArgs) -> Result<Self, Self::Error> {
        let host = args.host.trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if args.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::UtcOffsetOutOfRange {
                max: MAX_UTC_OFFSET_MINUTES,
                actual: args.utc_offset_minutes,
            });
        }

        Ok(Self {
            host,
            port: args.port,
            utc_offset_minutes: args.utc_offset_minutes,
            log_level: args.log_level,
        })
    }
}
