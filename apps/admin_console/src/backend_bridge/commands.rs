//! Backend commands queued from the console to the backend worker.

use shared::domain::{EmployeeDraft, EmployeeId};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    FetchAll,
    Create { draft: EmployeeDraft },
    Update { id: EmployeeId, draft: EmployeeDraft },
    Delete { id: EmployeeId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchAll => "fetch_all",
            BackendCommand::Create { .. } => "create",
            BackendCommand::Update { .. } => "update",
            BackendCommand::Delete { .. } => "delete",
        }
    }
}
