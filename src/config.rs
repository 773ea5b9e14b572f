pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self { Self { bind: "0.0.0.0".to_string(), port: DEFAULT_PORT } }
}

fn env_parse_u16(name: &str) -> Option<u16> { std::env::var(name).ok().and_then(|s| s.trim().parse().ok()) }

impl ServerConfig {
    /// Defaults overridden by DAMAS_BIND / DAMAS_PORT when set.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(b) = std::env::var("DAMAS_BIND") { if !b.trim().is_empty() { cfg.bind = b.trim().to_string(); } }
        if let Some(p) = env_parse_u16("DAMAS_PORT") { cfg.port = p; }
        cfg
    }

    pub fn addr(&self) -> String { format!("{}:{}", self.bind, self.port) }
}
