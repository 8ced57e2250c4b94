//! Network layer - HTTP request execution
//!
//! The Network actor receives request commands and sends back results.

pub mod actor;
pub mod executor;

pub use actor::NetworkActor;
pub use executor::RequestExecutor;
