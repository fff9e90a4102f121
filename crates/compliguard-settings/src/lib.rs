//! Config parsing and profile/preset resolution.
//!
//! IO-free: configuration arrives as a string and leaves as a validated [`ResolvedConfig`].

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{BatchConfig, CheckConfig, CompliguardConfigV1, LedgerConfig};
pub use presets::{DEFAULT_PROFILE, PROFILES};
pub use resolve::{DEFAULT_LEDGER_DIR, Overrides, ResolvedConfig};

/// Parse `compliguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CompliguardConfigV1> {
    let cfg: CompliguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy (preset + per-check config + overrides) and validate it by
/// building the catalog once.
pub fn resolve_config(
    cfg: CompliguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
