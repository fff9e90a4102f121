use compliguard_domain::policy::{
    CheckPolicy, DEFAULT_LAPTOP_NAMES, DEFAULT_OUTDATED_OS, DEFAULT_TRUSTED_NETWORKS,
    EffectiveConfig,
};
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "strict";

/// Known preset names.
pub const PROFILES: &[&str] = &["strict", "lenient"];

/// Preset profiles are opinionated defaults. Site specifics belong in `compliguard.toml`.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "lenient" => Some(lenient_profile()),
        _ => None,
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        checks: default_checks(),
    }
}

fn lenient_profile() -> EffectiveConfig {
    let mut checks = default_checks();
    checks.insert(
        compliguard_types::ids::CHECK_LAPTOP_NAME_ALLOWLIST.to_string(),
        CheckPolicy::disabled().with_allow(DEFAULT_LAPTOP_NAMES),
    );
    EffectiveConfig {
        profile: "lenient".to_string(),
        checks,
    }
}

fn default_checks() -> BTreeMap<String, CheckPolicy> {
    use compliguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(CHECK_DEVICE_IDENTITY.to_string(), CheckPolicy::enabled());
    m.insert(
        CHECK_LAPTOP_OS_CURRENCY.to_string(),
        CheckPolicy::enabled().with_deny(DEFAULT_OUTDATED_OS),
    );
    m.insert(
        CHECK_LAPTOP_NAME_ALLOWLIST.to_string(),
        CheckPolicy::enabled().with_allow(DEFAULT_LAPTOP_NAMES),
    );
    m.insert(
        CHECK_ROUTER_TRUSTED_NETWORK.to_string(),
        CheckPolicy::enabled().with_allow(DEFAULT_TRUSTED_NETWORKS),
    );
    m.insert(CHECK_IOT_OPEN_PORTS.to_string(), CheckPolicy::enabled());
    m.insert(CHECK_PRINTER_EXTERNAL_COMM.to_string(), CheckPolicy::enabled());

    m
}
