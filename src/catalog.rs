//! Fixed catalog of shipping container types.
//!
//! Internal dimensions and payloads follow common ISO dry and reefer container
//! figures. Hosts with their own container database can build a catalog from
//! their records with [`ContainerCatalog::from_specs`].

use crate::model::{ContainerSpec, ValidationError};

/// (id, name, internal length, width, height in meters, max payload in kg)
const STANDARD_CONTAINERS: &[(&str, &str, f64, f64, f64, f64)] = &[
    ("20ft-standard", "20' Standard", 5.898, 2.352, 2.393, 28_200.0),
    ("40ft-standard", "40' Standard", 12.032, 2.352, 2.393, 26_680.0),
    ("40ft-high-cube", "40' High Cube", 12.032, 2.352, 2.698, 26_460.0),
    ("45ft-high-cube", "45' High Cube", 13.556, 2.352, 2.698, 27_700.0),
    ("20ft-reefer", "20' Reefer", 5.444, 2.294, 2.276, 27_400.0),
    ("40ft-reefer-high-cube", "40' Reefer High Cube", 11.583, 2.294, 2.554, 29_520.0),
];

/// Read-only lookup of container types by identifier.
#[derive(Clone, Debug)]
pub struct ContainerCatalog {
    containers: Vec<ContainerSpec>,
}

impl ContainerCatalog {
    /// The built-in catalog of ISO shipping containers.
    pub fn standard() -> Self {
        let containers = STANDARD_CONTAINERS
            .iter()
            .map(|&(id, name, length, width, height, payload)| ContainerSpec {
                id: id.to_string(),
                name: name.to_string(),
                internal_length: length,
                internal_width: width,
                internal_height: height,
                max_payload: payload,
            })
            .collect();
        Self { containers }
    }

    /// Builds a catalog from externally supplied specs, keeping their order.
    pub fn from_specs(containers: Vec<ContainerSpec>) -> Self {
        Self { containers }
    }

    pub fn get(&self, id: &str) -> Option<&ContainerSpec> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Like [`get`](Self::get), but reports unknown identifiers as a validation error.
    pub fn lookup(&self, id: &str) -> Result<&ContainerSpec, ValidationError> {
        self.get(id)
            .ok_or_else(|| ValidationError::UnknownContainer(id.to_string()))
    }

    pub fn all(&self) -> &[ContainerSpec] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl Default for ContainerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensional, validation};

    #[test]
    fn standard_catalog_contains_twenty_foot_container() {
        let catalog = ContainerCatalog::standard();
        let twenty = catalog.get("20ft-standard").expect("20ft container is listed");
        assert_eq!(twenty.internal_length, 5.898);
        assert_eq!(twenty.internal_width, 2.352);
        assert_eq!(twenty.internal_height, 2.393);
        assert_eq!(twenty.max_payload, 28_200.0);
    }

    #[test]
    fn standard_catalog_entries_are_valid_and_unique() {
        let catalog = ContainerCatalog::standard();
        assert_eq!(catalog.len(), STANDARD_CONTAINERS.len());
        for spec in catalog.all() {
            assert!(
                validation::validate_dimensions_3d(spec.dimensions().as_tuple(), "Container")
                    .is_ok(),
                "{} invalid",
                spec.id
            );
            assert!(spec.max_payload > 0.0);
            assert_eq!(
                catalog.all().iter().filter(|c| c.id == spec.id).count(),
                1,
                "duplicate id {}",
                spec.id
            );
        }
    }

    #[test]
    fn lookup_reports_unknown_ids() {
        let catalog = ContainerCatalog::standard();
        assert!(catalog.lookup("40ft-high-cube").is_ok());
        assert_eq!(
            catalog.lookup("53ft-domestic").unwrap_err(),
            ValidationError::UnknownContainer("53ft-domestic".to_string())
        );
    }

    #[test]
    fn custom_catalog_keeps_order() {
        let catalog = ContainerCatalog::from_specs(vec![
            ContainerSpec::new("b", "B", (2.0, 2.0, 2.0), 100.0).unwrap(),
            ContainerSpec::new("a", "A", (1.0, 1.0, 1.0), 100.0).unwrap(),
        ]);
        let ids: Vec<_> = catalog.all().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(!catalog.is_empty());
    }
}
