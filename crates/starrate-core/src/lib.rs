//! StarRate Core Library
//!
//! Platform-agnostic logic for star-rating widgets: which stars are lit for
//! a rating, which rating a tap selects, and which stars animate in response.
//! Drawing is left to the host; it receives [`StarElement`]s and reports taps
//! back to the [`RatingWidget`].

pub mod animation;
pub mod config;
pub mod icons;
pub mod rating;
pub mod selection;
pub mod widget;

pub use animation::{
    AnimationHandle, AnimationSequencer, BASE_DURATION, HandleRegistry, STAGGER_STEP,
    StaggerStep, StarAnimation,
};
pub use config::{ConfigError, ConfigResult, StarColor, WidgetConfig};
pub use icons::{IcoMoonSet, IconFont, IconProvider, IconSource, ResolvedIcon, StarIcon};
pub use rating::{StarFill, StarPalette, StarVisualState, discretize, round_rating};
pub use selection::{StarHit, StarLayout, resolve_selection};
pub use widget::{
    Lifecycle, RatingWidget, StarElement, TapOutcome, TapRejection, WidgetError, WidgetResult,
};
