use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "EMSKit";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "EMSKIT_DATA_DIR";

/// Environment variable overriding the listen address.
pub const ENV_ADDR: &str = "EMSKIT_ADDR";

/// Default listen address when `EMSKIT_ADDR` is unset or invalid.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Get the application data directory
/// ~/.emskit/ by default, overridable via EMSKIT_DATA_DIR
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".emskit")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("emskit.db")
}

/// Get the directory for uploaded protocol attachments
pub fn uploads_dir() -> PathBuf {
    app_data_dir().join("uploads")
}

/// Listen address for the HTTP server.
pub fn listen_addr() -> SocketAddr {
    std::env::var(ENV_ADDR)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_ADDR
                .parse()
                .expect("default listen address is valid")
        })
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=warn", env!("CARGO_PKG_NAME"))
}
