use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device class tag. Selects the check cascade a profile is evaluated against.
///
/// Known tags are matched case-insensitively and serialize in lowercase. Anything else is kept
/// verbatim in [`DeviceClass::Other`] so it can be reported back in an `unknown_device` verdict.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceClass {
    Laptop,
    Printer,
    Router,
    Iot,
    Unknown,
    Other(String),
}

impl DeviceClass {
    /// Classes the built-in policy is expected to cover.
    pub const BUILTIN: [DeviceClass; 4] = [
        DeviceClass::Laptop,
        DeviceClass::Printer,
        DeviceClass::Router,
        DeviceClass::Iot,
    ];

    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            ids::CLASS_LAPTOP => DeviceClass::Laptop,
            ids::CLASS_PRINTER => DeviceClass::Printer,
            ids::CLASS_ROUTER => DeviceClass::Router,
            ids::CLASS_IOT => DeviceClass::Iot,
            ids::CLASS_UNKNOWN => DeviceClass::Unknown,
            _ => DeviceClass::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceClass::Laptop => ids::CLASS_LAPTOP,
            DeviceClass::Printer => ids::CLASS_PRINTER,
            DeviceClass::Router => ids::CLASS_ROUTER,
            DeviceClass::Iot => ids::CLASS_IOT,
            DeviceClass::Unknown => ids::CLASS_UNKNOWN,
            DeviceClass::Other(tag) => tag.as_str(),
        }
    }

    /// True for the classes a complete catalog must register a cascade for.
    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(self)
    }
}

impl From<String> for DeviceClass {
    fn from(value: String) -> Self {
        DeviceClass::parse(&value)
    }
}

impl From<&str> for DeviceClass {
    fn from(value: &str) -> Self {
        DeviceClass::parse(value)
    }
}

impl From<DeviceClass> for String {
    fn from(value: DeviceClass) -> Self {
        match value {
            DeviceClass::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and attributes of a managed asset, as submitted for evaluation.
///
/// Short field names (`ip`, `type`, `os`) are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeviceProfile {
    pub name: String,
    /// Expected to be a dotted-quad IPv4 literal; checks never assume it is.
    #[serde(alias = "ip")]
    pub address: String,
    #[serde(alias = "type")]
    #[schemars(with = "String")]
    pub class: DeviceClass,
    #[serde(alias = "os")]
    pub os_version: String,
}

impl DeviceProfile {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        class: impl Into<DeviceClass>,
        os_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            class: class.into(),
            os_version: os_version.into(),
        }
    }
}
