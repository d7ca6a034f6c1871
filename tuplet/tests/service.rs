use std::any::{Any, TypeId};
use std::sync::Arc;

use tuplet::service::{self, Service, ServiceProvider, ServiceProviderExt, ServiceRegistry};
use tuplet::Error;

#[derive(Debug, PartialEq)]
struct Logger {
    prefix: &'static str,
}

#[derive(Debug, PartialEq)]
struct Clock;

/// Answers every lookup with the same value, whatever type was asked for.
struct Stubborn(Service);

impl ServiceProvider for Stubborn {
    fn get_service(&self, _: TypeId) -> Option<Service> {
        Some(self.0.clone())
    }
}

#[test]
fn matching_service() {
    let mut registry = ServiceRegistry::new();
    let _ = registry.insert(Logger { prefix: "app" });
    let logger = registry.service::<Logger>().expect("logger registered");
    assert_eq!(logger.prefix, "app");
}

#[test]
fn shared_instance_is_returned() {
    let clock = Arc::new(Clock);
    let mut registry = ServiceRegistry::new();
    let _ = registry.insert_arc(clock.clone());
    let found = registry.service::<Clock>().expect("clock registered");
    assert!(Arc::ptr_eq(&found, &clock));
}

#[test]
fn absent_registration() {
    let registry = ServiceRegistry::new();
    assert_eq!(registry.service::<Logger>(), None);
}

#[test]
fn mismatched_type_yields_none() {
    let provider = Stubborn(Arc::new(Clock));
    assert_eq!(provider.service::<Logger>(), None);
    assert_eq!(provider.service::<Clock>().as_deref(), Some(&Clock));

    let mut registry = ServiceRegistry::new();
    let _ = registry.insert_raw(TypeId::of::<Logger>(), Arc::new(Clock));
    assert!(registry.contains::<Logger>());
    assert_eq!(registry.service::<Logger>(), None);
}

#[test]
fn provider_through_references_and_arcs() {
    let mut registry = ServiceRegistry::new();
    let _ = registry.insert(7u32);

    let by_ref = &registry;
    assert_eq!(by_ref.service::<u32>().as_deref(), Some(&7));

    let shared: Arc<dyn ServiceProvider> = Arc::new(registry);
    assert_eq!(shared.service::<u32>().as_deref(), Some(&7));
}

#[test]
fn free_function() {
    let mut registry = ServiceRegistry::new();
    let _ = registry.insert(Clock);

    assert_eq!(
        service::get_service::<Clock, _>(Some(&registry)).map(|c| c.is_some()),
        Ok(true)
    );
    assert_eq!(
        service::get_service::<Logger, _>(Some(&registry)).map(|l| l.is_some()),
        Ok(false)
    );
    assert_eq!(
        service::get_service::<Clock, ServiceRegistry>(None).map(|c| c.is_some()),
        Err(Error::MissingArgument("provider"))
    );
}

#[test]
fn erased_services_can_be_inspected() {
    let mut registry = ServiceRegistry::new();
    let _ = registry.insert(Clock);
    let raw = registry
        .get_service(TypeId::of::<Clock>())
        .expect("clock registered");
    assert!((*raw).type_id() == TypeId::of::<Clock>());
}
