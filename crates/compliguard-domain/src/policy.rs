use std::collections::BTreeMap;

/// Outdated operating systems flagged by `laptop.os_currency` unless configured otherwise.
pub const DEFAULT_OUTDATED_OS: &[&str] = &[
    "Windows XP*",
    "Windows Vista*",
    "Windows 7*",
    "Windows 8*",
    "Windows 10*",
];

/// Laptop names accepted by `laptop.name_allowlist` unless configured otherwise.
pub const DEFAULT_LAPTOP_NAMES: &[&str] = &["HP_Elitebook*", "Host_*"];

/// Networks accepted by `router.trusted_network` unless configured otherwise.
pub const DEFAULT_TRUSTED_NETWORKS: &[&str] = &["192.168.0.0/16"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
    /// Check-specific accept list (name globs or CIDR networks).
    pub allow: Vec<String>,
    /// Check-specific reject list (globs).
    pub deny: Vec<String>,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            allow: Vec::new(),
            deny: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::enabled()
        }
    }

    pub fn with_allow(mut self, allow: &[&str]) -> Self {
        self.allow = allow.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_deny(mut self, deny: &[&str]) -> Self {
        self.deny = deny.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Policy the built-in catalog is constructed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
