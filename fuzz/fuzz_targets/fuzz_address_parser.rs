//! Fuzz target for device address handling.
//!
//! Goal: parsing an address or a trusted-network CIDR, and evaluating a router profile built
//! around it, must **never panic**. Bad input becomes an error or a `malformed_address` verdict.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_address_parser
//! ```

#![no_main]

use compliguard_domain::network::{Ipv4Network, parse_address};
use compliguard_domain::{RuleCatalog, builtin_catalog, evaluate};
use compliguard_settings::{CompliguardConfigV1, Overrides, resolve_config};
use compliguard_types::{DeviceProfile, Verdict};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

fn catalog() -> &'static RuleCatalog {
    static CATALOG: OnceLock<RuleCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let resolved = resolve_config(CompliguardConfigV1::default(), Overrides::default())
            .expect("default config resolves");
        builtin_catalog(&resolved.effective).expect("default catalog builds")
    })
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 256 {
        return;
    }
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = parse_address(raw);
    let _ = Ipv4Network::parse(raw);

    let profile = DeviceProfile::new("Main_Router", raw, "router", "RouterOS");
    let verdict = evaluate(catalog(), &profile);
    assert!(!matches!(verdict, Verdict::EvaluationError { .. }));
    if parsed.is_err() {
        assert!(matches!(verdict, Verdict::Violation { .. }));
    }
});
