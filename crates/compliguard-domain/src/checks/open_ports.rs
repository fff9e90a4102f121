use crate::catalog::{CatalogError, Check};
use crate::checks::utils::{build_globset, matches};
use crate::policy::CheckPolicy;
use compliguard_types::{ReasonCode, Violation, ids};

/// Flags every IoT device whose name has not been individually reviewed (`allow`).
pub fn check(policy: &CheckPolicy) -> Result<Check, CatalogError> {
    let reviewed = build_globset(ids::CHECK_IOT_OPEN_PORTS, &policy.allow, false)?;

    Ok(Check::new(ids::CHECK_IOT_OPEN_PORTS, move |profile| {
        if matches(reviewed.as_ref(), &profile.name) {
            return None;
        }
        Some(Violation::new(
            ReasonCode::OpenPort,
            ids::CHECK_IOT_OPEN_PORTS,
            format!(
                "IoT device '{}' has not been reviewed for exposed ports",
                profile.name
            ),
        ))
    }))
}
