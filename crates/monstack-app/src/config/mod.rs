//! App config loader (strict parsing).

pub mod schema;

use std::fs;

use monstack_core::error::{MonstackError, Result};

pub use schema::{AppConfig, DelayRange, MetricsSection, ServerSection, SimulationSection};

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MonstackError::Io(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| MonstackError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Replace the port of `server.listen`, keeping its host.
pub fn override_port(cfg: &mut AppConfig, port: u16) -> Result<()> {
    let mut addr = cfg.server.listen_addr()?;
    addr.set_port(port);
    cfg.server.listen = addr.to_string();
    Ok(())
}
