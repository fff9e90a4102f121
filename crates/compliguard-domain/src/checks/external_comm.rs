use crate::catalog::{CatalogError, Check};
use crate::checks::utils::{build_globset, matches};
use crate::policy::CheckPolicy;
use compliguard_types::{ReasonCode, Violation, ids};

pub fn check(policy: &CheckPolicy) -> Result<Check, CatalogError> {
    let reviewed = build_globset(ids::CHECK_PRINTER_EXTERNAL_COMM, &policy.allow, false)?;

    Ok(Check::new(ids::CHECK_PRINTER_EXTERNAL_COMM, move |profile| {
        if matches(reviewed.as_ref(), &profile.name) {
            return None;
        }
        Some(Violation::new(
            ReasonCode::UnauthorizedExternalComm,
            ids::CHECK_PRINTER_EXTERNAL_COMM,
            format!(
                "printer '{}' may communicate with external hosts",
                profile.name
            ),
        ))
    }))
}
