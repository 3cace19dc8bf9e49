use async_trait::async_trait;
use shared::domain::{Employee, EmployeeDraft, EmployeeId};
use tokio::sync::Mutex;

use crate::{EmployeeStore, MutationKind, StoreError, StoreResult};

const ID_PREFIX: &str = "mem-";

#[derive(Default)]
struct MemoryState {
    employees: Vec<Employee>,
    next_id: u64,
    unavailable: bool,
}

/// Process-local store with the same contract as the HTTP store.
///
/// Identifiers are assigned sequentially (`mem-1`, `mem-2`, ...).
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    inner: Mutex<MemoryState>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. New identifiers continue after the highest `mem-N` already present.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let next_id = employees
            .iter()
            .filter_map(|e| e.id().as_str().strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(MemoryState {
                employees,
                next_id,
                unavailable: false,
            }),
        }
    }

    /// While unavailable every call fails the way an unreachable server would.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().await.unavailable = unavailable;
    }

    pub async fn snapshot(&self) -> Vec<Employee> {
        self.inner.lock().await.employees.clone()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn try_list_all(&self) -> StoreResult<Vec<Employee>> {
        let guard = self.inner.lock().await;
        if guard.unavailable {
            return Err(StoreError::fetch("employee store unavailable"));
        }
        Ok(guard.employees.clone())
    }

    async fn create(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let mut guard = self.inner.lock().await;
        if guard.unavailable {
            return Err(StoreError::mutation(
                MutationKind::Create,
                "employee store unavailable",
            ));
        }
        guard.next_id += 1;
        let id = EmployeeId::new(format!("{ID_PREFIX}{}", guard.next_id));
        let employee = Employee::from_draft(id, draft.clone());
        guard.employees.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: &EmployeeId, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let mut guard = self.inner.lock().await;
        if guard.unavailable {
            return Err(StoreError::mutation(
                MutationKind::Update,
                "employee store unavailable",
            ));
        }
        let Some(slot) = guard.employees.iter_mut().find(|e| e.id() == id) else {
            return Err(StoreError::mutation(
                MutationKind::Update,
                format!("employee {id} not found"),
            ));
        };
        *slot = Employee::from_draft(id.clone(), draft.clone());
        Ok(slot.clone())
    }

    async fn remove(&self, id: &EmployeeId) -> StoreResult<()> {
        let mut guard = self.inner.lock().await;
        if guard.unavailable {
            return Err(StoreError::mutation(
                MutationKind::Delete,
                "employee store unavailable",
            ));
        }
        let before = guard.employees.len();
        guard.employees.retain(|e| e.id() != id);
        if guard.employees.len() == before {
            return Err(StoreError::mutation(
                MutationKind::Delete,
                format!("employee {id} not found"),
            ));
        }
        Ok(())
    }
}
