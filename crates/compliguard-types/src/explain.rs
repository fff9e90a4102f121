//! Explain registry for checks and reason codes.
//!
//! Maps check IDs and reason codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or reason code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to bring the device back into compliance.
    pub remediation: &'static str,
    /// Before/after device profile examples.
    pub examples: ExamplePair,
}

/// Before and after profile examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Profile that would be flagged.
    pub before: &'static str,
    /// Profile that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or reason code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_DEVICE_IDENTITY => Some(explain_identity()),
        ids::CHECK_LAPTOP_OS_CURRENCY => Some(explain_os_currency()),
        ids::CHECK_LAPTOP_NAME_ALLOWLIST => Some(explain_name_allowlist()),
        ids::CHECK_ROUTER_TRUSTED_NETWORK => Some(explain_trusted_network()),
        ids::CHECK_IOT_OPEN_PORTS => Some(explain_open_ports()),
        ids::CHECK_PRINTER_EXTERNAL_COMM => Some(explain_external_comm()),

        // Codes
        ids::CODE_MISSING_NAME => Some(retitle(explain_identity(), "Missing Device Name")),
        ids::CODE_OUTDATED_OS => Some(retitle(explain_os_currency(), "Outdated Operating System")),
        ids::CODE_UNLISTED_DEVICE => Some(retitle(explain_name_allowlist(), "Unlisted Device")),
        ids::CODE_MALFORMED_ADDRESS => Some(explain_malformed_address()),
        ids::CODE_UNTRUSTED_NETWORK => {
            Some(retitle(explain_trusted_network(), "Address Outside Trusted Networks"))
        }
        ids::CODE_OPEN_PORT => Some(retitle(explain_open_ports(), "Open Port Pending Review")),
        ids::CODE_UNAUTHORIZED_EXTERNAL_COMM => Some(retitle(
            explain_external_comm(),
            "Unauthorized External Communication",
        )),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_DEVICE_IDENTITY,
        ids::CHECK_LAPTOP_OS_CURRENCY,
        ids::CHECK_LAPTOP_NAME_ALLOWLIST,
        ids::CHECK_ROUTER_TRUSTED_NETWORK,
        ids::CHECK_IOT_OPEN_PORTS,
        ids::CHECK_PRINTER_EXTERNAL_COMM,
    ]
}

/// List all known reason codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_NAME,
        ids::CODE_OUTDATED_OS,
        ids::CODE_UNLISTED_DEVICE,
        ids::CODE_MALFORMED_ADDRESS,
        ids::CODE_UNTRUSTED_NETWORK,
        ids::CODE_OPEN_PORT,
        ids::CODE_UNAUTHORIZED_EXTERNAL_COMM,
    ]
}

fn retitle(mut exp: Explanation, title: &'static str) -> Explanation {
    exp.title = title;
    exp
}

// --- Check-level explanations ---

fn explain_identity() -> Explanation {
    Explanation {
        title: "Device Identity Present",
        description: "\
Runs first in every built-in cascade and flags profiles whose `name` is empty or blank.

Without a name a verdict cannot be traced back to an asset in the inventory, and
batch submissions rely on names being unique.",
        remediation: "\
Submit the asset's inventory name in the `name` field.",
        examples: ExamplePair {
            before: r#"{"name": "", "address": "192.168.0.10", "class": "laptop", "osVersion": "Windows 11"}"#,
            after: r#"{"name": "Host_1", "address": "192.168.0.10", "class": "laptop", "osVersion": "Windows 11"}"#,
        },
    }
}

fn explain_os_currency() -> Explanation {
    Explanation {
        title: "Operating System Currency",
        description: "\
Flags laptops whose `osVersion` matches an outdated operating system pattern
(by default Windows XP, Vista, 7, 8 and 10). A missing OS version is treated as
outdated: the check fails closed.

This check runs before the name allow-list, so an allow-listed laptop on an
outdated OS is still reported as `outdated_os`.",
        remediation: "\
Upgrade the device to a supported OS release, or adjust the `deny` patterns for
`laptop.os_currency` in compliguard.toml if the policy has changed.",
        examples: ExamplePair {
            before: r#"{"name": "HP_Elitebook", "address": "192.168.0.20", "class": "laptop", "osVersion": "Windows 10"}"#,
            after: r#"{"name": "HP_Elitebook", "address": "192.168.0.20", "class": "laptop", "osVersion": "Windows 11"}"#,
        },
    }
}

fn explain_name_allowlist() -> Explanation {
    Explanation {
        title: "Laptop Name Allow-list",
        description: "\
Flags laptops whose `name` does not match any pattern in the allow-list
(by default `HP_Elitebook*` and `Host_*`). Unknown laptop names usually mean an
unmanaged personal device on the network.",
        remediation: "\
Enroll the device under an approved name, or add a glob for it to the `allow`
list of `laptop.name_allowlist` in compliguard.toml.",
        examples: ExamplePair {
            before: r#"{"name": "Bobs_Gaming_Rig", "address": "192.168.0.30", "class": "laptop", "osVersion": "Windows 11"}"#,
            after: r#"{"name": "Host_30", "address": "192.168.0.30", "class": "laptop", "osVersion": "Windows 11"}"#,
        },
    }
}

fn explain_trusted_network() -> Explanation {
    Explanation {
        title: "Router on Trusted Network",
        description: "\
Parses the router's `address` as a dotted-quad IPv4 literal and checks it lies in
one of the trusted networks (by default 192.168.0.0/16). An address that cannot
be parsed is reported as `malformed_address`; a parsed address outside every
trusted network is reported as `untrusted_network`.",
        remediation: "\
Move the router onto the management network, or add its network in CIDR form to
the `allow` list of `router.trusted_network` in compliguard.toml.",
        examples: ExamplePair {
            before: r#"{"name": "Edge_Router", "address": "10.0.0.1", "class": "router", "osVersion": "RouterOS"}"#,
            after: r#"{"name": "Main_Router", "address": "192.168.0.1", "class": "router", "osVersion": "RouterOS"}"#,
        },
    }
}

fn explain_open_ports() -> Explanation {
    Explanation {
        title: "IoT Open Ports",
        description: "\
Every IoT device is flagged as `open_port` until it has been reviewed and
allow-listed individually. IoT firmware commonly ships with management ports
exposed.",
        remediation: "\
Review the device's exposed services, then disable `iot.open_ports` for a
profile that covers reviewed devices only.",
        examples: ExamplePair {
            before: r#"{"name": "Lobby_Camera", "address": "192.168.5.40", "class": "iot", "osVersion": "fw-2.1"}"#,
            after: r#"(no compliant IoT profile under the default policy)"#,
        },
    }
}

fn explain_external_comm() -> Explanation {
    Explanation {
        title: "Printer External Communication",
        description: "\
Every printer is flagged as `unauthorized_external_comm`: network printers are
known to phone home for firmware and telemetry, which the default policy does
not permit.",
        remediation: "\
Block outbound traffic from the printer at the firewall, then disable
`printer.external_comm` for a profile that reflects the blocked state.",
        examples: ExamplePair {
            before: r#"{"name": "Office_Printer", "address": "192.168.0.50", "class": "printer", "osVersion": "HP FutureSmart"}"#,
            after: r#"(no compliant printer profile under the default policy)"#,
        },
    }
}

fn explain_malformed_address() -> Explanation {
    Explanation {
        title: "Malformed Address",
        description: "\
The `address` field could not be parsed as a dotted-quad IPv4 literal (for
example it is empty, too short, has extra octets, or carries a CIDR suffix).
The check fails closed instead of guessing.",
        remediation: "\
Report the device's IPv4 address as four decimal octets, e.g. `192.168.0.1`.",
        examples: ExamplePair {
            before: r#"{"name": "Main_Router", "address": "192.168", "class": "router", "osVersion": "RouterOS"}"#,
            after: r#"{"name": "Main_Router", "address": "192.168.0.1", "class": "router", "osVersion": "RouterOS"}"#,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        for id in all_check_ids() {
            assert!(lookup_explanation(id).is_some(), "check_id {id} should be in registry");
        }
    }

    #[test]
    fn lookup_by_code() {
        for code in all_codes() {
            assert!(lookup_explanation(code).is_some(), "code {code} should be in registry");
        }
    }

    #[test]
    fn every_reason_code_is_listed() {
        for code in crate::ReasonCode::ALL {
            assert!(all_codes().contains(&code.as_str()), "{code} missing from all_codes");
        }
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }

    #[test]
    fn code_titles_differ_from_check_titles() {
        let check = lookup_explanation(ids::CHECK_LAPTOP_OS_CURRENCY).expect("check");
        let code = lookup_explanation(ids::CODE_OUTDATED_OS).expect("code");
        assert_ne!(check.title, code.title);
        assert_eq!(check.description, code.description);
    }
}
