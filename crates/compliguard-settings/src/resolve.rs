use crate::model::CompliguardConfigV1;
use crate::presets::{self, DEFAULT_PROFILE, PROFILES};
use anyhow::Context;
use camino::Utf8PathBuf;
use compliguard_domain::builtin_catalog;
use compliguard_domain::network::Ipv4Network;
use compliguard_domain::policy::EffectiveConfig;
use compliguard_types::ids;
use globset::Glob;

pub const DEFAULT_LEDGER_DIR: &str = ".compliguard/ledger";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub ledger_dir: Option<Utf8PathBuf>,
    pub workers: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub ledger_dir: Utf8PathBuf,
    /// `None` means one worker per CPU.
    pub workers: Option<usize>,
}

pub fn resolve_config(
    cfg: CompliguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected one of {})",
            PROFILES.join("|")
        )
    })?;

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .get_mut(check_id)
            .with_context(|| format!("unknown check id in [checks]: {check_id}"))?;

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(allow) = &cc.allow {
            validate_allow(check_id, allow)?;
            entry.allow = allow.clone();
        }
        if let Some(deny) = &cc.deny {
            validate_globs(check_id, "deny", deny)?;
            entry.deny = deny.clone();
        }
    }

    let workers = overrides.workers.or(cfg.batch.workers);
    if workers == Some(0) {
        anyhow::bail!("batch.workers must be at least 1");
    }

    let ledger_dir = overrides
        .ledger_dir
        .or_else(|| cfg.ledger.dir.map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LEDGER_DIR));

    builtin_catalog(&effective)
        .with_context(|| format!("profile '{}' does not yield a usable catalog", profile))?;

    Ok(ResolvedConfig {
        effective,
        ledger_dir,
        workers,
    })
}

fn validate_allow(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    if check_id == ids::CHECK_ROUTER_TRUSTED_NETWORK {
        for pattern in patterns {
            Ipv4Network::parse(pattern)
                .with_context(|| format!("invalid network for {check_id}: {pattern}"))?;
        }
        return Ok(());
    }
    validate_globs(check_id, "allow", patterns)
}

fn validate_globs(check_id: &str, list: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid {list} glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}
