//! Low-level discovery payload.

use std::collections::HashMap;

use serde::Serialize;

use crate::discovery::catalog::RegionMap;

/// One discovered backend service, keyed by monitoring-template macros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryEntry {
    #[serde(rename = "{#PRODUCT_ID}")]
    pub product_id: String,
    #[serde(rename = "{#REGION}")]
    pub region: String,
    #[serde(rename = "{#NAME}")]
    pub name: String,
}

/// `{"data": [...]}` document consumed by low-level discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryPayload {
    pub data: Vec<DiscoveryEntry>,
}

impl DiscoveryPayload {
    /// Single-line JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Flatten per-project catalogs into one payload.
///
/// Projects are visited in `project_ids` order; ids without a catalog (failed
/// fetches) contribute nothing.
pub fn emit(project_ids: &[String], catalogs: &HashMap<String, RegionMap>) -> DiscoveryPayload {
    let data = project_ids
        .iter()
        .filter_map(|project| catalogs.get(project))
        .flat_map(|regions| regions.values().flatten())
        .map(|service| DiscoveryEntry {
            product_id: service.product_id.clone(),
            region: service.region().to_string(),
            name: service.name.clone(),
        })
        .collect();

    DiscoveryPayload { data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Scope;
    use crate::discovery::catalog::BackendServiceRef;

    fn service(project: &str, region: &str, name: &str) -> BackendServiceRef {
        BackendServiceRef {
            product_id: project.to_string(),
            scope: Scope::from_region(region),
            name: name.to_string(),
        }
    }

    fn catalog(services: Vec<BackendServiceRef>) -> RegionMap {
        let mut regions = RegionMap::new();
        for s in services {
            regions.entry(s.region().to_string()).or_default().push(s);
        }
        regions
    }

    #[test]
    fn test_empty_payload() {
        let payload = emit(&[], &HashMap::new());
        assert_eq!(payload.to_json().unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn test_single_entry() {
        let mut catalogs = HashMap::new();
        catalogs.insert(
            "proj-a".to_string(),
            catalog(vec![service("proj-a", "europe-west1", "lb1")]),
        );

        let payload = emit(&["proj-a".to_string()], &catalogs);
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"data":[{"{#PRODUCT_ID}":"proj-a","{#REGION}":"europe-west1","{#NAME}":"lb1"}]}"#
        );
    }

    #[test]
    fn test_project_order_and_missing_catalogs() {
        let mut catalogs = HashMap::new();
        catalogs.insert(
            "proj-b".to_string(),
            catalog(vec![service("proj-b", "global", "api")]),
        );
        catalogs.insert(
            "proj-a".to_string(),
            catalog(vec![
                service("proj-a", "us-east1", "lb2"),
                service("proj-a", "europe-west1", "lb1"),
            ]),
        );

        let projects = vec![
            "proj-b".to_string(),
            "proj-down".to_string(),
            "proj-a".to_string(),
        ];
        let payload = emit(&projects, &catalogs);

        let seen: Vec<_> = payload
            .data
            .iter()
            .map(|e| (e.product_id.as_str(), e.region.as_str(), e.name.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("proj-b", "global", "api"),
                ("proj-a", "europe-west1", "lb1"),
                ("proj-a", "us-east1", "lb2"),
            ]
        );
    }
}
