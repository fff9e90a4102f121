use crate::catalog::{CatalogError, Check};
use crate::checks::utils::{build_globset, matches};
use crate::policy::CheckPolicy;
use compliguard_types::{ReasonCode, Violation, ids};

/// An empty allow-list admits nobody.
pub fn check(policy: &CheckPolicy) -> Result<Check, CatalogError> {
    let allowed = build_globset(ids::CHECK_LAPTOP_NAME_ALLOWLIST, &policy.allow, false)?;

    Ok(Check::new(ids::CHECK_LAPTOP_NAME_ALLOWLIST, move |profile| {
        if matches(allowed.as_ref(), &profile.name) {
            None
        } else {
            Some(Violation::new(
                ReasonCode::UnlistedDevice,
                ids::CHECK_LAPTOP_NAME_ALLOWLIST,
                format!("laptop '{}' is not on the device allow-list", profile.name),
            ))
        }
    }))
}
