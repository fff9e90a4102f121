//! Stable identifiers for checks, reason codes, and device classes.
//!
//! `check_id` is a dotted namespace (`<class>.<rule>`). Reason codes are short snake_case
//! discriminators and match the serialized form of [`crate::ReasonCode`].

// Checks
pub const CHECK_DEVICE_IDENTITY: &str = "device.identity";
pub const CHECK_LAPTOP_OS_CURRENCY: &str = "laptop.os_currency";
pub const CHECK_LAPTOP_NAME_ALLOWLIST: &str = "laptop.name_allowlist";
pub const CHECK_ROUTER_TRUSTED_NETWORK: &str = "router.trusted_network";
pub const CHECK_IOT_OPEN_PORTS: &str = "iot.open_ports";
pub const CHECK_PRINTER_EXTERNAL_COMM: &str = "printer.external_comm";

// Codes: device.identity
pub const CODE_MISSING_NAME: &str = "missing_name";

// Codes: laptop.os_currency
pub const CODE_OUTDATED_OS: &str = "outdated_os";

// Codes: laptop.name_allowlist
pub const CODE_UNLISTED_DEVICE: &str = "unlisted_device";

// Codes: router.trusted_network
pub const CODE_MALFORMED_ADDRESS: &str = "malformed_address";
pub const CODE_UNTRUSTED_NETWORK: &str = "untrusted_network";

// Codes: iot.open_ports
pub const CODE_OPEN_PORT: &str = "open_port";

// Codes: printer.external_comm
pub const CODE_UNAUTHORIZED_EXTERNAL_COMM: &str = "unauthorized_external_comm";

// Device class tags
pub const CLASS_LAPTOP: &str = "laptop";
pub const CLASS_PRINTER: &str = "printer";
pub const CLASS_ROUTER: &str = "router";
pub const CLASS_IOT: &str = "iot";
pub const CLASS_UNKNOWN: &str = "unknown";

// Ledger event types
pub const EVENT_HOST_SCAN: &str = "host_scan";
