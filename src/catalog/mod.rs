pub mod bundle;
pub mod definition;

pub use bundle::*;
pub use definition::*;

use crate::error::CatalogError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The raw shape returned by the catalog query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

/// Read-only, indexed view over the service catalog.
///
/// The engine never mutates a catalog; it only resolves service and bundle ids
/// through it. Dangling `allowedConnections` entries are tolerated and simply
/// never match.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: Vec<ServiceDefinition>,
    bundles: Vec<Bundle>,
    service_index: AHashMap<String, usize>,
    bundle_index: AHashMap<String, usize>,
}

impl Catalog {
    pub fn new(services: Vec<ServiceDefinition>, bundles: Vec<Bundle>) -> Self {
        let mut service_index = AHashMap::with_capacity(services.len());
        for (i, service) in services.iter().enumerate() {
            service_index.entry(service.id.clone()).or_insert(i);
        }
        let mut bundle_index = AHashMap::with_capacity(bundles.len());
        for (i, bundle) in bundles.iter().enumerate() {
            bundle_index.entry(bundle.id.clone()).or_insert(i);
        }

        let catalog = Self {
            services,
            bundles,
            service_index,
            bundle_index,
        };
        for (source, target) in catalog.dangling_connections() {
            warn!(source = %source, target = %target, "catalog connection references unknown service");
        }
        catalog
    }

    /// Parses the catalog query payload: `{"services": [...], "bundles": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let payload: CatalogPayload =
            serde_json::from_str(json).map_err(|e| CatalogError::JsonParseError(e.to_string()))?;
        Ok(payload.into())
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Looks up a service definition, returning `None` when it is unknown.
    pub fn get(&self, service_id: &str) -> Option<&ServiceDefinition> {
        self.service_index
            .get(service_id)
            .map(|&i| &self.services[i])
    }

    pub fn contains(&self, service_id: &str) -> bool {
        self.service_index.contains_key(service_id)
    }

    /// Looks up a service definition, failing when it is unknown.
    pub fn service(&self, service_id: &str) -> Result<&ServiceDefinition, CatalogError> {
        self.get(service_id)
            .ok_or_else(|| CatalogError::ServiceNotFound(service_id.to_string()))
    }

    pub fn bundle(&self, bundle_id: &str) -> Result<&Bundle, CatalogError> {
        self.bundle_index
            .get(bundle_id)
            .map(|&i| &self.bundles[i])
            .ok_or_else(|| CatalogError::BundleNotFound(bundle_id.to_string()))
    }

    /// Every `(service, allowed)` pair whose `allowed` id is not in the catalog.
    pub fn dangling_connections(&self) -> Vec<(String, String)> {
        self.services
            .iter()
            .flat_map(|service| {
                service
                    .allowed_connections
                    .iter()
                    .filter(|target| !self.contains(target))
                    .map(move |target| (service.id.clone(), target.clone()))
            })
            .collect()
    }
}

impl From<CatalogPayload> for Catalog {
    fn from(payload: CatalogPayload) -> Self {
        Catalog::new(payload.services, payload.bundles)
    }
}
