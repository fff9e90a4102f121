//! Fuzz target for `compliguard.toml` parsing and resolution.
//!
//! Goal: arbitrary config text **never panics**. It either resolves to a config whose catalog
//! builds, or is rejected with an error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use compliguard_settings::{Overrides, parse_config_toml, resolve_config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = parse_config_toml(text) else {
        return;
    };
    if let Ok(resolved) = resolve_config(cfg, Overrides::default()) {
        assert!(compliguard_domain::builtin_catalog(&resolved.effective).is_ok());
    }
});
