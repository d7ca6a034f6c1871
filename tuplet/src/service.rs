//! Service lookup by type parameter.
//!
//! A [`ServiceProvider`] answers lookups keyed by a runtime [`TypeId`]. The
//! [`ServiceProviderExt`] extension trait, implemented for every provider, lets callers name the
//! service they want as a type parameter instead, and gets back a value of that type:
//!
//! ```
//! use tuplet::service::{ServiceProviderExt, ServiceRegistry};
//!
//! struct Clock(u64);
//!
//! let mut registry = ServiceRegistry::new();
//! let _ = registry.insert(Clock(42));
//!
//! assert_eq!(registry.service::<Clock>().map(|clock| clock.0), Some(42));
//! assert!(registry.service::<String>().is_none());
//! ```

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use crate::Error;

/// A type-erased service, as handed out by a [`ServiceProvider`].
pub type Service = Arc<dyn Any + Send + Sync>;

/// A registry of services keyed by their [`TypeId`].
pub trait ServiceProvider {
    /// The service registered for `ty`, if any.
    ///
    /// Providers are expected, but not trusted, to return a service whose concrete type is the one
    /// `ty` identifies; [`ServiceProviderExt::service`] checks.
    fn get_service(&self, ty: TypeId) -> Option<Service>;
}

impl<P: ServiceProvider + ?Sized> ServiceProvider for &'_ P {
    fn get_service(&self, ty: TypeId) -> Option<Service> {
        (**self).get_service(ty)
    }
}

impl<P: ServiceProvider + ?Sized> ServiceProvider for Arc<P> {
    fn get_service(&self, ty: TypeId) -> Option<Service> {
        (**self).get_service(ty)
    }
}

/// Typed lookups for every [`ServiceProvider`].
pub trait ServiceProviderExt: ServiceProvider {
    /// The service of type `T`.
    ///
    /// Returns `None` both when nothing is registered for `T` and when the provider returns
    /// something that is not a `T`.
    fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let service = match self.get_service(TypeId::of::<T>()) {
            Some(service) => service,
            None => {
                tracing::trace!(service = type_name::<T>(), "no service registered");
                return None;
            }
        };
        match service.downcast::<T>() {
            Ok(service) => Some(service),
            Err(_) => {
                tracing::debug!(
                    service = type_name::<T>(),
                    "provider returned a service of the wrong type"
                );
                None
            }
        }
    }
}

impl<P: ServiceProvider + ?Sized> ServiceProviderExt for P {}

/// The service of type `T` from `provider`; see [`ServiceProviderExt::service`].
///
/// # Errors
///
/// Returns [`Error::MissingArgument`] if `provider` is `None`. A missing or mistyped service is
/// not an error, and yields `Ok(None)`.
pub fn get_service<T, P>(provider: Option<&P>) -> Result<Option<Arc<T>>, Error>
where
    T: Any + Send + Sync,
    P: ServiceProvider + ?Sized,
{
    Ok(provider
        .ok_or(Error::MissingArgument("provider"))?
        .service::<T>())
}

/// A [`ServiceProvider`] backed by a map from [`TypeId`] to service.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Service>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ServiceRegistry::default()
    }

    /// Register `service` as the service of type `T`, returning the service it replaces.
    pub fn insert<T: Any + Send + Sync>(&mut self, service: T) -> Option<Service> {
        self.insert_arc(Arc::new(service))
    }

    /// Register an already shared `service` as the service of type `T`, returning the service it
    /// replaces.
    pub fn insert_arc<T: Any + Send + Sync>(&mut self, service: Arc<T>) -> Option<Service> {
        self.services.insert(TypeId::of::<T>(), service)
    }

    /// Register `service` under an arbitrary key.
    ///
    /// Nothing checks that `service` is of the type `ty` identifies. A mismatch is not an error:
    /// typed lookups for `ty` will simply find nothing.
    pub fn insert_raw(&mut self, ty: TypeId, service: Service) -> Option<Service> {
        self.services.insert(ty, service)
    }

    /// Unregister the service of type `T`, returning it.
    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<Service> {
        self.services.remove(&TypeId::of::<T>())
    }

    /// Whether a service is registered for type `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// The number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no services are registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceProvider for ServiceRegistry {
    fn get_service(&self, ty: TypeId) -> Option<Service> {
        self.services.get(&ty).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_returns_previous() {
        let mut registry = ServiceRegistry::new();
        assert!(registry.insert(1u8).is_none());
        let previous = registry.insert(2u8).expect("a service was registered");
        assert_eq!(previous.downcast_ref::<u8>(), Some(&1));
        assert_eq!(registry.service::<u8>().as_deref(), Some(&2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removal() {
        let mut registry = ServiceRegistry::new();
        let _ = registry.insert("name");
        assert!(registry.contains::<&'static str>());
        assert!(registry.remove::<&'static str>().is_some());
        assert!(registry.is_empty());
        assert!(registry.service::<&'static str>().is_none());
    }
}
