//! Controller layer: state transitions, backend events and the session driver.

pub mod events;
pub mod form;
pub mod orchestration;
pub mod reducer;
pub mod session;
