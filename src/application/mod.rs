//! Application layer: Use cases and services.
//!
//! This module wires the domain types to the classifier port:
//! the registry owns the loaded models, the dispatcher runs the
//! select / enter / evaluate cycle against it.

mod dispatcher;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{evaluate, DispatchError, DispatchState, Dispatcher};
pub use registry::ModelRegistry;
