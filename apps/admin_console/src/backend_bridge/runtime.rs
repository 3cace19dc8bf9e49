//! Runtime bridge between the console command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::EmployeeStore;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task and answers
/// with exactly one [`UiEvent`]; the worker stops once the command queue closes.
pub fn launch(
    store: Arc<dyn EmployeeStore>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                let store = Arc::clone(&store);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(store.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("console went away before backend event was delivered");
                    }
                });
            }
        });
    })
}

pub async fn execute(store: &dyn EmployeeStore, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::FetchAll => UiEvent::EmployeesLoaded(store.list_all().await),
        BackendCommand::Create { draft } => match store.create(&draft).await {
            Ok(employee) => UiEvent::EmployeeSaved(employee),
            Err(err) => {
                tracing::warn!("error creating employee: {err}");
                UiEvent::Error(UiError::from_store(UiErrorContext::SaveEmployee, &err))
            }
        },
        BackendCommand::Update { id, draft } => match store.update(&id, &draft).await {
            Ok(employee) => UiEvent::EmployeeSaved(employee),
            Err(err) => {
                tracing::warn!(employee_id = %id, "error updating employee: {err}");
                UiEvent::Error(UiError::from_store(UiErrorContext::SaveEmployee, &err))
            }
        },
        BackendCommand::Delete { id } => match store.remove(&id).await {
            Ok(()) => UiEvent::EmployeeDeleted(id),
            Err(err) => {
                tracing::warn!(employee_id = %id, "error deleting employee: {err}");
                UiEvent::Error(UiError::from_store(UiErrorContext::DeleteEmployee, &err))
            }
        },
    }
}
