use super::{builtin_catalog, builtin_check_ids};
use crate::catalog::CatalogError;
use crate::evaluator::evaluate;
use crate::policy::CheckPolicy;
use crate::test_support::{config_with, laptop, profile, router, strict_catalog, strict_config};
use compliguard_types::{DeviceClass, ReasonCode, Verdict, ids};

fn reason(verdict: &Verdict) -> Option<ReasonCode> {
    verdict.reason()
}

#[test]
fn outdated_os_beats_allowlisted_name() {
    let verdict = evaluate(&strict_catalog(), &laptop("HP_Elitebook", "Windows 10"));
    assert_eq!(reason(&verdict), Some(ReasonCode::OutdatedOs));
    match verdict {
        Verdict::Violation { check_id, .. } => {
            assert_eq!(check_id, ids::CHECK_LAPTOP_OS_CURRENCY)
        }
        other => panic!("expected violation, got {other:?}"),
    }
}

#[test]
fn os_globs_are_case_insensitive_and_blank_os_fails_closed() {
    let catalog = strict_catalog();
    for os in ["windows xp sp3", "WINDOWS 7 Pro", "Windows 8.1", "", "   "] {
        let verdict = evaluate(&catalog, &laptop("Host_1", os));
        assert_eq!(reason(&verdict), Some(ReasonCode::OutdatedOs), "os={os:?}");
    }
    assert!(evaluate(&catalog, &laptop("Host_1", "Windows 11 Pro")).is_compliant());
}

#[test]
fn laptop_name_must_be_allowlisted() {
    let catalog = strict_catalog();
    assert!(evaluate(&catalog, &laptop("HP_Elitebook_840", "Windows 11")).is_compliant());
    assert!(evaluate(&catalog, &laptop("Host_42", "Ubuntu 24.04")).is_compliant());

    let verdict = evaluate(&catalog, &laptop("hp_elitebook", "Windows 11"));
    assert_eq!(reason(&verdict), Some(ReasonCode::UnlistedDevice));
}

#[test]
fn empty_allowlist_admits_nobody() {
    let cfg = config_with(ids::CHECK_LAPTOP_NAME_ALLOWLIST, CheckPolicy::enabled());
    let catalog = builtin_catalog(&cfg).expect("catalog");
    let verdict = evaluate(&catalog, &laptop("Host_1", "Windows 11"));
    assert_eq!(reason(&verdict), Some(ReasonCode::UnlistedDevice));
}

#[test]
fn disabled_check_is_skipped() {
    let cfg = config_with(ids::CHECK_LAPTOP_NAME_ALLOWLIST, CheckPolicy::disabled());
    let catalog = builtin_catalog(&cfg).expect("catalog");
    assert!(evaluate(&catalog, &laptop("Anything", "Windows 11")).is_compliant());
}

#[test]
fn missing_name_is_reported_first() {
    let verdict = evaluate(&strict_catalog(), &laptop("  ", "Windows XP"));
    assert_eq!(reason(&verdict), Some(ReasonCode::MissingName));
}

#[test]
fn router_on_trusted_network_is_compliant() {
    let verdict = evaluate(&strict_catalog(), &router("Main_Router", "192.168.0.1"));
    assert_eq!(verdict, Verdict::Compliant);
}

#[test]
fn router_outside_trusted_network_is_flagged() {
    let catalog = strict_catalog();
    for addr in ["10.0.0.1", "192.169.0.1", "8.8.8.8"] {
        let verdict = evaluate(&catalog, &router("Edge", addr));
        assert_eq!(reason(&verdict), Some(ReasonCode::UntrustedNetwork), "{addr}");
    }
}

#[test]
fn short_or_garbage_addresses_are_malformed() {
    let catalog = strict_catalog();
    for addr in ["", "1", "192.168", "192.168.0.1.5", "192.168.0.256", "router.local", "::1"] {
        let verdict = evaluate(&catalog, &router("Edge", addr));
        assert_eq!(reason(&verdict), Some(ReasonCode::MalformedAddress), "{addr:?}");
    }
}

#[test]
fn trusted_networks_are_configurable() {
    let cfg = config_with(
        ids::CHECK_ROUTER_TRUSTED_NETWORK,
        CheckPolicy::enabled().with_allow(&["10.0.0.0/8", "172.16.5.4"]),
    );
    let catalog = builtin_catalog(&cfg).expect("catalog");
    assert!(evaluate(&catalog, &router("A", "10.200.1.1")).is_compliant());
    assert!(evaluate(&catalog, &router("B", "172.16.5.4")).is_compliant());
    assert_eq!(
        reason(&evaluate(&catalog, &router("C", "192.168.0.1"))),
        Some(ReasonCode::UntrustedNetwork)
    );
}

#[test]
fn iot_devices_are_flagged_until_reviewed() {
    let catalog = strict_catalog();
    let verdict = evaluate(&catalog, &profile("Thermostat", "192.168.1.50", "IoT", "fw 2.1"));
    assert_eq!(reason(&verdict), Some(ReasonCode::OpenPort));

    let cfg = config_with(
        ids::CHECK_IOT_OPEN_PORTS,
        CheckPolicy::enabled().with_allow(&["Thermostat"]),
    );
    let catalog = builtin_catalog(&cfg).expect("catalog");
    let verdict = evaluate(&catalog, &profile("Thermostat", "192.168.1.50", "iot", ""));
    assert!(verdict.is_compliant());
}

#[test]
fn printers_are_flagged_for_external_comm() {
    let verdict = evaluate(
        &strict_catalog(),
        &profile("Office_Printer", "192.168.1.9", "Printer", "fw"),
    );
    assert_eq!(reason(&verdict), Some(ReasonCode::UnauthorizedExternalComm));
}

#[test]
fn invalid_glob_is_a_catalog_error() {
    let cfg = config_with(
        ids::CHECK_LAPTOP_OS_CURRENCY,
        CheckPolicy::enabled().with_deny(&["Windows [7"]),
    );
    let err = builtin_catalog(&cfg).expect_err("bad glob");
    assert!(matches!(err, CatalogError::InvalidPattern { .. }));
}

#[test]
fn invalid_cidr_is_a_catalog_error() {
    let cfg = config_with(
        ids::CHECK_ROUTER_TRUSTED_NETWORK,
        CheckPolicy::enabled().with_allow(&["192.168.0.0/33"]),
    );
    let err = builtin_catalog(&cfg).expect_err("bad cidr");
    match err {
        CatalogError::InvalidPattern { check_id, .. } => {
            assert_eq!(check_id, ids::CHECK_ROUTER_TRUSTED_NETWORK)
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn fully_disabled_cascade_is_rejected() {
    let mut cfg = strict_config();
    cfg.checks.insert(
        ids::CHECK_DEVICE_IDENTITY.to_string(),
        CheckPolicy::disabled(),
    );
    cfg.checks.insert(
        ids::CHECK_IOT_OPEN_PORTS.to_string(),
        CheckPolicy::disabled(),
    );
    let err = builtin_catalog(&cfg).expect_err("iot cascade is empty");
    assert!(matches!(err, CatalogError::EmptyCascade(DeviceClass::Iot)));
}

#[test]
fn every_builtin_class_is_registered() {
    let catalog = strict_catalog();
    for class in DeviceClass::BUILTIN {
        assert!(catalog.is_registered(&class), "{class}");
    }
    assert!(!catalog.is_registered(&DeviceClass::Unknown));
}

#[test]
fn builtin_check_ids_are_unique_and_explained() {
    let ids_list = builtin_check_ids();
    assert_eq!(ids_list.len(), 6);
    for id in ids_list {
        assert!(
            compliguard_types::lookup_explanation(id).is_some(),
            "missing explanation for {id}"
        );
    }
}
