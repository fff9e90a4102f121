use crate::catalog::{CatalogError, Check};
use crate::checks::utils::{build_globset, matches};
use crate::policy::CheckPolicy;
use compliguard_types::{ReasonCode, Violation, ids};

pub fn check(policy: &CheckPolicy) -> Result<Check, CatalogError> {
    // OS strings come from inventory agents with inconsistent casing.
    let outdated = build_globset(ids::CHECK_LAPTOP_OS_CURRENCY, &policy.deny, true)?;

    Ok(Check::new(ids::CHECK_LAPTOP_OS_CURRENCY, move |profile| {
        let os = profile.os_version.trim();
        if os.is_empty() {
            return Some(Violation::new(
                ReasonCode::OutdatedOs,
                ids::CHECK_LAPTOP_OS_CURRENCY,
                format!("'{}' does not report an OS version", profile.name),
            ));
        }
        if matches(outdated.as_ref(), os) {
            return Some(Violation::new(
                ReasonCode::OutdatedOs,
                ids::CHECK_LAPTOP_OS_CURRENCY,
                format!("'{}' runs outdated OS '{}'", profile.name, os),
            ));
        }
        None
    }))
}
