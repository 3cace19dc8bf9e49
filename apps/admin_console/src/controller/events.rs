//! Backend events and error modeling for the console controller.

use client_core::StoreError;
use shared::{
    domain::{Employee, EmployeeId},
    error::ValidationError,
};

#[derive(Debug, Clone)]
pub enum UiEvent {
    EmployeesLoaded(Vec<Employee>),
    EmployeeSaved(Employee),
    EmployeeDeleted(EmployeeId),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SaveEmployee,
    DeleteEmployee,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("404") || message_lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("400")
            || message_lower.contains("422")
            || message_lower.contains("invalid")
            || message_lower.contains("must not")
            || message_lower.contains("not a number")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("connect")
            || message_lower.contains("dns")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_store(context: UiErrorContext, err: &StoreError) -> Self {
        // reqwest keeps the status code and cause in the source chain.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self::from_message(context, message)
    }

    pub fn from_validation(err: &ValidationError) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::SaveEmployee,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
