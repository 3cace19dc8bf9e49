//! Backend worker: executes store commands off the console thread.

pub mod commands;
pub mod runtime;
