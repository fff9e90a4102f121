//! Property-based tests for the evaluator and record builder.

use crate::evaluator::evaluate;
use crate::network::parse_address;
use crate::record::{build, verify};
use crate::test_support::{fixed_time, strict_catalog};
use compliguard_types::{DeviceClass, DeviceProfile, ReasonCode, Verdict};
use proptest::prelude::*;

fn arb_class() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("laptop".to_string()),
        Just("Laptop".to_string()),
        Just("router".to_string()),
        Just("IoT".to_string()),
        Just("printer".to_string()),
        Just("unknown".to_string()),
        "[A-Za-z]{1,12}",
    ]
}

fn arb_address() -> impl Strategy<Value = String> {
    prop_oneof![
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}")),
        (any::<u8>(), any::<u8>()).prop_map(|(a, b)| format!("{a}.{b}")),
        ".{0,20}",
    ]
}

fn arb_profile() -> impl Strategy<Value = DeviceProfile> {
    (
        ".{0,16}",
        arb_address(),
        arb_class(),
        prop_oneof![
            Just("Windows 10".to_string()),
            Just("Windows 11".to_string()),
            ".{0,16}"
        ],
    )
        .prop_map(|(name, address, class, os)| DeviceProfile::new(name, address, class, os))
}

proptest! {
    #[test]
    fn evaluate_is_deterministic(profile in arb_profile()) {
        let catalog = strict_catalog();
        prop_assert_eq!(evaluate(&catalog, &profile), evaluate(&catalog, &profile));
    }

    #[test]
    fn device_data_never_causes_evaluation_errors(profile in arb_profile()) {
        let verdict = evaluate(&strict_catalog(), &profile);
        let is_error = matches!(verdict, Verdict::EvaluationError { .. });
        prop_assert!(!is_error);
    }

    #[test]
    fn unregistered_classes_are_unknown_devices(tag in "[a-z]{3,10}") {
        let class = DeviceClass::parse(&tag);
        prop_assume!(!class.is_builtin());
        let profile = DeviceProfile::new("dev", "192.168.0.9", tag.as_str(), "");
        let verdict = evaluate(&strict_catalog(), &profile);
        let is_unknown = matches!(verdict, Verdict::UnknownDevice { .. });
        prop_assert!(is_unknown);
    }

    #[test]
    fn router_addresses_never_panic(address in arb_address()) {
        let profile = DeviceProfile::new("Edge", address.clone(), "router", "");
        let verdict = evaluate(&strict_catalog(), &profile);
        if parse_address(&address).is_err() {
            prop_assert_eq!(verdict.reason(), Some(ReasonCode::MalformedAddress));
        }
    }

    #[test]
    fn built_records_always_verify(profile in arb_profile(), ref_id in "[a-z0-9/_-]{1,24}") {
        let verdict = evaluate(&strict_catalog(), &profile);
        let record = build(&profile, &verdict, &ref_id, fixed_time()).expect("build");
        prop_assert!(verify(&record).is_ok());
    }
}
