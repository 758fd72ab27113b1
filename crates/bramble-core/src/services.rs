//! Service registry mapping service identifiers to shared instances

use crate::{BrambleError, BrambleResult};
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

type ServiceObject = Arc<dyn Any + Send + Sync>;

/// Runtime directory of platform services
///
/// Services are stored as reference-counted instances. A service cannot be
/// unregistered while anyone else still holds a reference obtained from
/// [`ServiceRegistry::get`].
pub struct ServiceRegistry {
    services: DashMap<String, ServiceObject>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    /// Register a service under `id`
    pub fn register<T>(&self, id: impl Into<String>, service: Arc<T>) -> BrambleResult<()>
    where
        T: Any + Send + Sync,
    {
        let id = id.into();
        match self.services.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                Err(BrambleError::DuplicateService(entry.key().clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                tracing::debug!(service = %entry.key(), "service registered");
                entry.insert(service);
                Ok(())
            }
        }
    }

    /// Look up a service and downcast it to its concrete type
    pub fn get<T>(&self, id: &str) -> BrambleResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let service = self
            .services
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BrambleError::ServiceNotFound(id.to_string()))?;

        service
            .downcast::<T>()
            .map_err(|_| BrambleError::ServiceTypeMismatch(id.to_string()))
    }

    /// Look up a service, returning `None` when absent or of another type
    pub fn get_service_by_id<T>(&self, id: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.get(id).ok()
    }

    /// Remove a service that nobody else references
    ///
    /// The reference check and the removal happen under one shard lock, so a
    /// concurrent [`ServiceRegistry::get`] either sees the service gone or
    /// keeps it registered.
    pub fn unregister(&self, id: &str) -> BrambleResult<()> {
        if self
            .services
            .remove_if(id, |_, service| Arc::strong_count(service) == 1)
            .is_some()
        {
            tracing::debug!(service = id, "service unregistered");
            return Ok(());
        }

        match self.services.get(id) {
            Some(entry) => Err(BrambleError::ServiceInUse {
                id: id.to_string(),
                references: Arc::strong_count(entry.value()).saturating_sub(1),
            }),
            None => Err(BrambleError::ServiceNotFound(id.to_string())),
        }
    }

    /// Check whether a service is registered
    pub fn contains(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// All registered identifiers, sorted
    pub fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.service_ids())
            .finish()
    }
}
