//! Widget layer: lifecycle, rendered star elements and the controller that
//! ties discretization, tap resolution and animation together.
//!
//! The rating itself is never stored here. Hosts pass it in through
//! [`WidgetConfig`](crate::config::WidgetConfig) and receive new ratings
//! through the selection callback.

mod controller;
mod element;
mod state;

pub use controller::{RatingWidget, TapOutcome, TapRejection};
pub use element::StarElement;
pub use state::Lifecycle;

use thiserror::Error;

/// Errors from mounting and handle registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("Handle index {index} out of range for {len} stars")]
    HandleOutOfRange { index: usize, len: usize },
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: Lifecycle,
        action: &'static str,
    },
}

/// Result type for widget lifecycle operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
