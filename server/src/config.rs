//! Configuration for the scoreboard server.
//!
//! Every tunable has a compile-time default and can be overridden through a
//! dedicated environment variable. Command-line flags (see `main.rs`) take
//! precedence over both.

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_CONFIG_DIR: &str = ".config/scoreboard/data";
const DEV_DATA_DIR: &str = "./data";
const DATABASE_FILE: &str = "scoreboard.db";

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin1234";

/// Get the data directory holding the database file.
///
/// Priority:
/// 1. SCOREBOARD_DATA_DIR env variable if set
/// 2. $HOME/.config/scoreboard/data if HOME is set
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SCOREBOARD_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Get the SQLite database file path.
///
/// Priority:
/// 1. SCOREBOARD_DATABASE_PATH env variable if set
/// 2. `scoreboard.db` inside [`get_data_dir`]
pub fn get_database_path() -> PathBuf {
    if let Ok(path) = std::env::var("SCOREBOARD_DATABASE_PATH") {
        return PathBuf::from(path);
    }

    get_data_dir().join(DATABASE_FILE)
}

/// Get the HTTP listen address.
///
/// `SCOREBOARD_BIND_ADDR` replaces the whole address; `PORT` then replaces
/// only the port. Unparseable values fall back to the default.
pub fn get_bind_addr() -> SocketAddr {
    resolve_bind_addr(
        std::env::var("SCOREBOARD_BIND_ADDR").ok().as_deref(),
        std::env::var("PORT").ok().as_deref(),
    )
}

fn resolve_bind_addr(addr: Option<&str>, port: Option<&str>) -> SocketAddr {
    let mut resolved = addr
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(default_bind_addr);

    if let Some(port) = port.and_then(|p| p.parse::<u16>().ok()) {
        resolved.set_port(port);
    }
    resolved
}

/// `0.0.0.0:3000`
fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Username of the administrator provisioned at startup.
pub fn get_admin_username() -> String {
    std::env::var("SCOREBOARD_ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.into())
}

/// Initial password of the administrator provisioned at startup. Only used
/// when the account does not exist yet.
pub fn get_admin_password() -> String {
    std::env::var("SCOREBOARD_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into())
}

/// Directory for daily-rolling log files. `None` logs to stdout only.
pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var("SCOREBOARD_LOG_DIR").ok().map(PathBuf::from)
}
