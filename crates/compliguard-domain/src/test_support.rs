use crate::catalog::RuleCatalog;
use crate::checks::builtin_catalog;
use crate::policy::{
    CheckPolicy, DEFAULT_LAPTOP_NAMES, DEFAULT_OUTDATED_OS, DEFAULT_TRUSTED_NETWORKS,
    EffectiveConfig,
};
use compliguard_types::{DeviceProfile, ids};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn strict_config() -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(ids::CHECK_DEVICE_IDENTITY.to_string(), CheckPolicy::enabled());
    checks.insert(
        ids::CHECK_LAPTOP_OS_CURRENCY.to_string(),
        CheckPolicy::enabled().with_deny(DEFAULT_OUTDATED_OS),
    );
    checks.insert(
        ids::CHECK_LAPTOP_NAME_ALLOWLIST.to_string(),
        CheckPolicy::enabled().with_allow(DEFAULT_LAPTOP_NAMES),
    );
    checks.insert(
        ids::CHECK_ROUTER_TRUSTED_NETWORK.to_string(),
        CheckPolicy::enabled().with_allow(DEFAULT_TRUSTED_NETWORKS),
    );
    checks.insert(ids::CHECK_IOT_OPEN_PORTS.to_string(), CheckPolicy::enabled());
    checks.insert(
        ids::CHECK_PRINTER_EXTERNAL_COMM.to_string(),
        CheckPolicy::enabled(),
    );
    EffectiveConfig {
        profile: "test".to_string(),
        checks,
    }
}

pub fn config_with(check_id: &str, policy: CheckPolicy) -> EffectiveConfig {
    let mut cfg = strict_config();
    cfg.checks.insert(check_id.to_string(), policy);
    cfg
}

pub fn strict_catalog() -> RuleCatalog {
    builtin_catalog(&strict_config()).expect("default catalog builds")
}

pub fn profile(name: &str, address: &str, class: &str, os: &str) -> DeviceProfile {
    DeviceProfile::new(name, address, class, os)
}

pub fn laptop(name: &str, os: &str) -> DeviceProfile {
    profile(name, "192.168.1.20", "laptop", os)
}

pub fn router(name: &str, address: &str) -> DeviceProfile {
    profile(name, address, "router", "RouterOS 7")
}

pub fn fixed_time() -> OffsetDateTime {
    datetime!(2024-05-01 12:00:00.123456789 UTC)
}
