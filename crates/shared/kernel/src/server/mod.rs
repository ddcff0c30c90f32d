//! Axum building blocks shared by every slice: state, system routes and error bodies.

mod error;
mod health;
pub mod router;
mod state;

pub use error::ErrorResponse;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
