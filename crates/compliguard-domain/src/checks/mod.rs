//! Built-in compliance checks and the catalog assembled from them.

use crate::catalog::{CatalogError, Check, RuleCatalog};
use crate::policy::{CheckPolicy, EffectiveConfig};
use compliguard_types::{DeviceClass, ids};

mod external_comm;
mod identity;
mod name_allowlist;
mod open_ports;
mod os_currency;
mod trusted_network;
mod utils;

#[cfg(test)]
mod tests;

type Factory = fn(&CheckPolicy) -> Result<Check, CatalogError>;

fn identity_check(_: &CheckPolicy) -> Result<Check, CatalogError> {
    Ok(identity::check())
}

fn step(check_id: &'static str, factory: Factory) -> (&'static str, Factory) {
    (check_id, factory)
}

/// Cascades in evaluation order, keyed by class.
fn cascades() -> [(DeviceClass, Vec<(&'static str, Factory)>); 4] {
    [
        (
            DeviceClass::Laptop,
            vec![
                step(ids::CHECK_DEVICE_IDENTITY, identity_check),
                step(ids::CHECK_LAPTOP_OS_CURRENCY, os_currency::check),
                step(ids::CHECK_LAPTOP_NAME_ALLOWLIST, name_allowlist::check),
            ],
        ),
        (
            DeviceClass::Router,
            vec![
                step(ids::CHECK_DEVICE_IDENTITY, identity_check),
                step(ids::CHECK_ROUTER_TRUSTED_NETWORK, trusted_network::check),
            ],
        ),
        (
            DeviceClass::Iot,
            vec![
                step(ids::CHECK_DEVICE_IDENTITY, identity_check),
                step(ids::CHECK_IOT_OPEN_PORTS, open_ports::check),
            ],
        ),
        (
            DeviceClass::Printer,
            vec![
                step(ids::CHECK_DEVICE_IDENTITY, identity_check),
                step(ids::CHECK_PRINTER_EXTERNAL_COMM, external_comm::check),
            ],
        ),
    ]
}

/// Build the catalog for `cfg`. Disabled checks are left out of their cascades.
///
/// Fails on invalid patterns and on a class whose checks are all disabled.
pub fn builtin_catalog(cfg: &EffectiveConfig) -> Result<RuleCatalog, CatalogError> {
    let mut builder = RuleCatalog::builder();
    for (class, cascade) in cascades() {
        let mut checks = Vec::with_capacity(cascade.len());
        for (check_id, factory) in cascade {
            if let Some(policy) = cfg.check_policy(check_id) {
                checks.push(factory(policy)?);
            }
        }
        builder.register(class, checks)?;
    }
    Ok(builder.build())
}

/// Every check id the built-in catalog knows, in first-registration order.
pub fn builtin_check_ids() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for (_, cascade) in cascades() {
        for (id, _) in cascade {
            if !out.contains(&id) {
                out.push(id);
            }
        }
    }
    out
}
