use anyhow::Context;
use compliguard_domain::{RuleCatalog, builtin_catalog};
use compliguard_settings::{CompliguardConfigV1, Overrides, ResolvedConfig};

/// Parse and resolve config text. Empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        CompliguardConfigV1::default()
    } else {
        compliguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    compliguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

pub fn build_catalog(resolved: &ResolvedConfig) -> anyhow::Result<RuleCatalog> {
    builtin_catalog(&resolved.effective).context("build rule catalog")
}

/// Run `f` on a dedicated rayon pool sized from config (`None` = one thread per CPU).
pub(crate) fn run_in_pool<R, F>(workers: Option<usize>, f: F) -> anyhow::Result<R>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.unwrap_or(0))
        .build()
        .context("build worker pool")?;
    Ok(pool.install(f))
}
