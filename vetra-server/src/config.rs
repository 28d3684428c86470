use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Idle connections are closed after this long without a request, so
    /// silently-dead peers do not pin a task forever.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// One request must fit in one read of this many bytes; there is no
    /// framing on the wire.
    #[serde(default = "default_recv_buffer")]
    pub recv_buffer_bytes: usize,
}

fn default_read_timeout() -> u64 {
    300
}

fn default_recv_buffer() -> usize {
    4096
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VETRA__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("VETRA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
