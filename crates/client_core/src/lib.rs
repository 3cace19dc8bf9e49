use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::domain::{Employee, EmployeeDraft, EmployeeId};
use tracing::{debug, error, info};
use url::Url;

pub mod error;
mod memory;

pub use error::{BoxError, MutationKind, StoreError};
pub use memory::InMemoryEmployeeStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote employee collection: list, create, update-by-id and delete-by-id.
///
/// Implementations hold no cached state; every call goes to the backing store.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn try_list_all(&self) -> StoreResult<Vec<Employee>>;

    /// Lists every employee, degrading to an empty list when the store is unreachable.
    async fn list_all(&self) -> Vec<Employee> {
        match self.try_list_all().await {
            Ok(employees) => employees,
            Err(err) => {
                error!("error fetching employees: {err}");
                Vec::new()
            }
        }
    }

    async fn create(&self, draft: &EmployeeDraft) -> StoreResult<Employee>;

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> StoreResult<Employee>;

    async fn remove(&self, id: &EmployeeId) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpEmployeeStore {
    http: Client,
    endpoint: Url,
}

impl HttpEmployeeStore {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn record_url(&self, id: &EmployeeId) -> StoreResult<Url> {
        let invalid = || StoreError::InvalidEndpoint {
            endpoint: self.endpoint.to_string(),
            id: id.to_string(),
        };
        if id.as_str().is_empty() {
            return Err(invalid());
        }

        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| invalid())?;
            segments.pop_if_empty().push(id.as_str());
        }
        Ok(url)
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, reqwest::Error> {
    request.send().await?.error_for_status()?.json().await
}

#[async_trait]
impl EmployeeStore for HttpEmployeeStore {
    async fn try_list_all(&self) -> StoreResult<Vec<Employee>> {
        let employees: Vec<Employee> = send_json(self.http.get(self.endpoint.clone()))
            .await
            .map_err(StoreError::fetch)?;
        debug!(count = employees.len(), "fetched employees");
        Ok(employees)
    }

    async fn create(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let created: Employee = send_json(self.http.post(self.endpoint.clone()).json(draft))
            .await
            .map_err(|err| StoreError::mutation(MutationKind::Create, err))?;
        info!(employee_id = %created.id(), "created employee");
        Ok(created)
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let url = self.record_url(id)?;
        let updated: Employee = send_json(self.http.put(url).json(draft))
            .await
            .map_err(|err| StoreError::mutation(MutationKind::Update, err))?;
        info!(employee_id = %id, "updated employee");
        Ok(updated)
    }

    async fn remove(&self, id: &EmployeeId) -> StoreResult<()> {
        let url = self.record_url(id)?;
        self.http
            .delete(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|err| StoreError::mutation(MutationKind::Delete, err))?;
        info!(employee_id = %id, "deleted employee");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
