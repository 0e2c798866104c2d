//! In-memory `ComputeApi` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::AccessToken;
use crate::compute::{
    BackendServiceAggregatedList, BackendServiceDescriptor, ComputeApi, ComputeError,
    ComputeResult, HealthReport, Scope,
};

#[derive(Default)]
pub struct FakeComputeApi {
    pages: HashMap<(String, Option<String>), Value>,
    failing_projects: HashMap<String, (u16, String)>,
    descriptors: HashMap<String, Value>,
    health: HashMap<String, Value>,
    list_calls: Mutex<Vec<(String, Option<String>)>>,
    health_groups: Mutex<Vec<String>>,
}

impl FakeComputeApi {
    pub fn with_page(mut self, project: &str, page_token: Option<&str>, body: Value) -> Self {
        self.pages
            .insert((project.to_string(), page_token.map(str::to_string)), body);
        self
    }

    pub fn with_failing_project(mut self, project: &str, status: u16, message: &str) -> Self {
        self.failing_projects
            .insert(project.to_string(), (status, message.to_string()));
        self
    }

    pub fn with_descriptor(mut self, name: &str, body: Value) -> Self {
        self.descriptors.insert(name.to_string(), body);
        self
    }

    pub fn with_health(mut self, name: &str, body: Value) -> Self {
        self.health.insert(name.to_string(), body);
        self
    }

    pub fn list_calls(&self) -> Vec<(String, Option<String>)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn health_groups(&self) -> Vec<String> {
        self.health_groups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComputeApi for FakeComputeApi {
    async fn aggregated_backend_services(
        &self,
        _token: &AccessToken,
        project: &str,
        page_token: Option<&str>,
    ) -> ComputeResult<BackendServiceAggregatedList> {
        self.list_calls
            .lock()
            .unwrap()
            .push((project.to_string(), page_token.map(str::to_string)));

        if let Some((status, message)) = self.failing_projects.get(project) {
            return Err(ComputeError::Api {
                status: *status,
                message: message.clone(),
            });
        }
        let key = (project.to_string(), page_token.map(str::to_string));
        let body = self.pages.get(&key).cloned().unwrap_or(Value::Null);
        if body.is_null() {
            return Ok(BackendServiceAggregatedList::default());
        }
        Ok(serde_json::from_value(body)?)
    }

    async fn backend_service(
        &self,
        _token: &AccessToken,
        project: &str,
        scope: &Scope,
        name: &str,
    ) -> ComputeResult<BackendServiceDescriptor> {
        match self.descriptors.get(name) {
            Some(body) => Ok(serde_json::from_value(body.clone())?),
            None => Err(ComputeError::Api {
                status: 404,
                message: format!(
                    "The resource 'projects/{}/{}/backendServices/{}' was not found",
                    project,
                    scope.path_segments().join("/"),
                    name
                ),
            }),
        }
    }

    async fn backend_service_health(
        &self,
        _token: &AccessToken,
        _project: &str,
        _scope: &Scope,
        name: &str,
        group: &str,
    ) -> ComputeResult<HealthReport> {
        self.health_groups.lock().unwrap().push(group.to_string());
        match self.health.get(name) {
            Some(body) => HealthReport::from_raw(body.clone()),
            None => Err(ComputeError::Api {
                status: 500,
                message: format!("Internal error while checking health of '{}'", name),
            }),
        }
    }
}
