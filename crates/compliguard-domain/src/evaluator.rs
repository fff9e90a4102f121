use crate::catalog::RuleCatalog;
use compliguard_types::{DeviceProfile, Verdict};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::debug;

/// Evaluate `profile` against the cascade registered for its class.
///
/// Checks run in registration order and the first violation wins. A panicking check is contained
/// and reported as [`Verdict::EvaluationError`] naming that check.
pub fn evaluate(catalog: &RuleCatalog, profile: &DeviceProfile) -> Verdict {
    let cascade = catalog.lookup(&profile.class);

    if cascade.is_empty() {
        let verdict = if profile.class.is_builtin() {
            Verdict::EvaluationError {
                cause: format!("no checks registered for built-in class '{}'", profile.class),
            }
        } else {
            Verdict::UnknownDevice {
                class: profile.class.to_string(),
            }
        };
        debug!(class = %profile.class, verdict = verdict.label(), "no cascade for class");
        return verdict;
    }

    for check in cascade {
        match catch_unwind(AssertUnwindSafe(|| check.run(profile))) {
            Ok(None) => {}
            Ok(Some(violation)) => {
                debug!(
                    class = %profile.class,
                    check_id = check.id(),
                    reason = violation.reason.as_str(),
                    "check failed"
                );
                return violation.into();
            }
            Err(_) => {
                debug!(class = %profile.class, check_id = check.id(), "check panicked");
                return Verdict::EvaluationError {
                    cause: format!("check '{}' panicked", check.id()),
                };
            }
        }
    }

    Verdict::Compliant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Check;
    use crate::test_support::{laptop, profile, strict_catalog};
    use compliguard_types::{DeviceClass, ReasonCode, Violation};

    #[test]
    fn unregistered_builtin_class_is_an_evaluation_error() {
        let catalog = RuleCatalog::builder().build();
        let verdict = evaluate(&catalog, &laptop("Host_1", "Windows 11"));
        assert!(matches!(verdict, Verdict::EvaluationError { .. }));
    }

    #[test]
    fn unknown_and_other_classes_are_unknown_devices() {
        let catalog = strict_catalog();
        for class in ["unknown", "toaster", ""] {
            let verdict = evaluate(&catalog, &profile("dev", "10.0.0.1", class, "n/a"));
            assert_eq!(
                verdict,
                Verdict::UnknownDevice {
                    class: DeviceClass::parse(class).to_string()
                }
            );
        }
    }

    #[test]
    fn first_violation_wins() {
        let mut builder = RuleCatalog::builder();
        builder
            .register(
                DeviceClass::Iot,
                vec![
                    Check::new("a", |_| None),
                    Check::new("b", |_| {
                        Some(Violation::new(ReasonCode::OpenPort, "b", "first"))
                    }),
                    Check::new("c", |_| {
                        Some(Violation::new(ReasonCode::MissingName, "c", "second"))
                    }),
                ],
            )
            .expect("register");
        let catalog = builder.build();

        let verdict = evaluate(&catalog, &profile("cam", "10.0.0.2", "iot", ""));
        assert_eq!(verdict.reason(), Some(ReasonCode::OpenPort));
    }

    #[test]
    fn panicking_check_is_contained() {
        let mut builder = RuleCatalog::builder();
        builder
            .register(
                DeviceClass::Printer,
                vec![Check::new("boom", |_| panic!("check bug"))],
            )
            .expect("register");
        let catalog = builder.build();

        let verdict = evaluate(&catalog, &profile("p1", "10.0.0.3", "printer", ""));
        match verdict {
            Verdict::EvaluationError { cause } => assert!(cause.contains("boom")),
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }
}
