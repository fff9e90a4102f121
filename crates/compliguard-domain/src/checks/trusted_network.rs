use crate::catalog::{CatalogError, Check};
use crate::network::{Ipv4Network, parse_address};
use crate::policy::CheckPolicy;
use compliguard_types::{ReasonCode, Violation, ids};

pub fn check(policy: &CheckPolicy) -> Result<Check, CatalogError> {
    let networks = parse_networks(&policy.allow)?;

    Ok(Check::new(ids::CHECK_ROUTER_TRUSTED_NETWORK, move |profile| {
        let addr = match parse_address(&profile.address) {
            Ok(addr) => addr,
            Err(err) => {
                return Some(Violation::new(
                    ReasonCode::MalformedAddress,
                    ids::CHECK_ROUTER_TRUSTED_NETWORK,
                    format!("router '{}': {}", profile.name, err),
                ));
            }
        };

        if networks.iter().any(|net| net.contains(addr)) {
            None
        } else {
            Some(Violation::new(
                ReasonCode::UntrustedNetwork,
                ids::CHECK_ROUTER_TRUSTED_NETWORK,
                format!(
                    "router '{}' at {} is outside the trusted networks",
                    profile.name, addr
                ),
            ))
        }
    }))
}

fn parse_networks(allow: &[String]) -> Result<Vec<Ipv4Network>, CatalogError> {
    allow
        .iter()
        .map(|raw| {
            Ipv4Network::parse(raw).map_err(|e| CatalogError::InvalidPattern {
                check_id: ids::CHECK_ROUTER_TRUSTED_NETWORK.to_string(),
                pattern: raw.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}
