use crate::catalog::Check;
use compliguard_types::{ReasonCode, Violation, ids};

pub fn check() -> Check {
    Check::new(ids::CHECK_DEVICE_IDENTITY, |profile| {
        if profile.name.trim().is_empty() {
            Some(Violation::new(
                ReasonCode::MissingName,
                ids::CHECK_DEVICE_IDENTITY,
                format!("{} device at '{}' has no name", profile.class, profile.address),
            ))
        } else {
            None
        }
    })
}
