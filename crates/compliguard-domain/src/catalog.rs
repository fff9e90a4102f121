//! Rule catalog: device class -> ordered check cascade.
//!
//! Registration happens on [`RuleCatalogBuilder`]; [`RuleCatalogBuilder::build`] freezes it into a
//! [`RuleCatalog`] that has no mutation API and can be shared across threads by reference.

use compliguard_types::{DeviceClass, DeviceProfile, Violation};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Signature of a compliance predicate. Pure, deterministic, total.
pub type CheckFn = dyn Fn(&DeviceProfile) -> Option<Violation> + Send + Sync;

/// A named compliance predicate.
pub struct Check {
    id: String,
    run: Box<CheckFn>,
}

impl Check {
    pub fn new<F>(id: impl Into<String>, run: F) -> Self
    where
        F: Fn(&DeviceProfile) -> Option<Violation> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            run: Box::new(run),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn run(&self, profile: &DeviceProfile) -> Option<Violation> {
        (self.run)(profile)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("id", &self.id).finish()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("class '{0}' is already registered")]
    DuplicateClass(DeviceClass),

    #[error("class '{0}' registered with an empty check cascade")]
    EmptyCascade(DeviceClass),

    #[error("invalid pattern for {check_id}: {pattern}: {message}")]
    InvalidPattern {
        check_id: String,
        pattern: String,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct RuleCatalogBuilder {
    entries: BTreeMap<DeviceClass, Vec<Check>>,
}

impl RuleCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the cascade for `class`. Order of `checks` is evaluation order.
    pub fn register(&mut self, class: DeviceClass, checks: Vec<Check>) -> Result<(), CatalogError> {
        if checks.is_empty() {
            return Err(CatalogError::EmptyCascade(class));
        }
        if self.entries.contains_key(&class) {
            return Err(CatalogError::DuplicateClass(class));
        }
        self.entries.insert(class, checks);
        Ok(())
    }

    pub fn build(self) -> RuleCatalog {
        RuleCatalog {
            entries: self.entries,
        }
    }
}

/// Frozen catalog. Read-only after construction.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    entries: BTreeMap<DeviceClass, Vec<Check>>,
}

impl RuleCatalog {
    pub fn builder() -> RuleCatalogBuilder {
        RuleCatalogBuilder::new()
    }

    /// Cascade for `class`; empty when nothing is registered.
    pub fn lookup(&self, class: &DeviceClass) -> &[Check] {
        self.entries.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn classes(&self) -> impl Iterator<Item = &DeviceClass> {
        self.entries.keys()
    }

    pub fn is_registered(&self, class: &DeviceClass) -> bool {
        self.entries.contains_key(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(id: &str) -> Check {
        Check::new(id.to_string(), |_| None)
    }

    #[test]
    fn lookup_unknown_class_is_empty() {
        let catalog = RuleCatalog::builder().build();
        assert!(catalog.lookup(&DeviceClass::Laptop).is_empty());
        assert!(
            catalog
                .lookup(&DeviceClass::Other("toaster".to_string()))
                .is_empty()
        );
    }

    #[test]
    fn lookup_preserves_registration_order() {
        let mut builder = RuleCatalog::builder();
        builder
            .register(DeviceClass::Router, vec![pass("a"), pass("b"), pass("c")])
            .expect("register");
        let catalog = builder.build();
        let ids: Vec<_> = catalog
            .lookup(&DeviceClass::Router)
            .iter()
            .map(Check::id)
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut builder = RuleCatalog::builder();
        builder
            .register(DeviceClass::Iot, vec![pass("a")])
            .expect("first");
        let err = builder
            .register(DeviceClass::Iot, vec![pass("b")])
            .expect_err("second registration must fail");
        assert!(matches!(err, CatalogError::DuplicateClass(DeviceClass::Iot)));
    }

    #[test]
    fn empty_cascade_is_rejected() {
        let mut builder = RuleCatalog::builder();
        let err = builder
            .register(DeviceClass::Printer, Vec::new())
            .expect_err("empty cascade must fail");
        assert!(matches!(err, CatalogError::EmptyCascade(DeviceClass::Printer)));
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleCatalog>();
    }
}
