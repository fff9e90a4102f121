//! Fuzz target for the scan report parser.
//!
//! Goal: the parser is total. It **never panics**, and every host it returns has a
//! non-empty address with no duplicated ports or findings.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_scan_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let text = String::from_utf8_lossy(data);
    let hosts = compliguard_scan::parse_scan_report(&text);

    let mut ips = HashSet::new();
    for host in &hosts {
        assert!(!host.ip.is_empty());
        assert!(ips.insert(host.ip.as_str()), "host {} reported twice", host.ip);
        let ports: HashSet<_> = host.open_ports.iter().collect();
        assert_eq!(ports.len(), host.open_ports.len());
        let vulns: HashSet<_> = host.vulnerabilities.iter().collect();
        assert_eq!(vulns.len(), host.vulnerabilities.len());
    }
});
