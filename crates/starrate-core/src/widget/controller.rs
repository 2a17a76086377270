//! The rating widget controller.

use std::fmt;
use std::rc::Rc;

use kurbo::Point;

use crate::animation::{AnimationHandle, AnimationSequencer, HandleRegistry};
use crate::config::WidgetConfig;
use crate::rating::{self, StarFill, StarVisualState};
use crate::selection::{StarHit, StarLayout, resolve_selection};

use super::element::StarElement;
use super::state::Lifecycle;
use super::{WidgetError, WidgetResult};

/// Why a tap did not produce a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapRejection {
    /// The widget is disabled.
    Disabled,
    /// The widget is not mounted.
    NotMounted,
    /// No star exists at the tapped index.
    OutOfRange,
}

/// Result of delivering a tap to the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// A rating was selected and reported to the callback.
    Selected(f64),
    Rejected(TapRejection),
}

impl TapOutcome {
    pub fn rating(self) -> Option<f64> {
        match self {
            TapOutcome::Selected(rating) => Some(rating),
            TapOutcome::Rejected(_) => None,
        }
    }
}

/// A row of tappable stars.
///
/// Owns the configuration and the per-star animation handles. Renders star
/// elements on demand and turns taps into ratings, which are passed to the
/// selection callback. The displayed rating only changes when the host
/// supplies a new configuration.
pub struct RatingWidget {
    config: WidgetConfig,
    registry: HandleRegistry,
    lifecycle: Lifecycle,
    sequencer: AnimationSequencer,
    on_select: Box<dyn FnMut(f64)>,
}

impl RatingWidget {
    /// Create an unmounted widget.
    pub fn new(config: WidgetConfig, on_select: impl FnMut(f64) + 'static) -> Self {
        Self {
            config,
            registry: HandleRegistry::default(),
            lifecycle: Lifecycle::Unmounted,
            sequencer: AnimationSequencer::default(),
            on_select: Box::new(on_select),
        }
    }

    /// Use a sequencer with custom timing.
    pub fn with_sequencer(mut self, sequencer: AnimationSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Get the mount state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Get the animation handle registry.
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    /// Whether taps are currently accepted.
    pub fn is_interactive(&self) -> bool {
        self.lifecycle.is_mounted() && !self.config.disabled && self.config.max_stars > 0
    }

    /// Replace the configuration.
    ///
    /// When attached and the star count changes, all handles are dropped and
    /// the widget returns to `Mounting` so the host can register new ones.
    pub fn update_config(&mut self, config: WidgetConfig) {
        let resized = config.max_stars != self.config.max_stars;
        self.config = config;

        if resized && self.lifecycle.is_attached() {
            log::info!(
                "Star count changed to {}, re-registering handles",
                self.config.max_stars
            );
            self.registry.reset(self.config.max_stars);
            self.lifecycle = Lifecycle::Mounting;
        }
    }

    /// Start mounting: size the registry to the current star count.
    pub fn begin_mount(&mut self) -> WidgetResult<()> {
        if self.lifecycle != Lifecycle::Unmounted {
            return Err(WidgetError::InvalidTransition {
                state: self.lifecycle,
                action: "mount",
            });
        }
        self.registry.reset(self.config.max_stars);
        self.lifecycle = Lifecycle::Mounting;
        log::info!("Mounting rating widget with {} stars", self.config.max_stars);
        Ok(())
    }

    /// Register the animation handle for the star at logical `index`.
    pub fn register_handle(
        &mut self,
        index: usize,
        handle: &Rc<dyn AnimationHandle>,
    ) -> WidgetResult<()> {
        if !self.lifecycle.accepts_handles() {
            log::warn!("Rejected handle for star {} while {}", index, self.lifecycle);
            return Err(WidgetError::InvalidTransition {
                state: self.lifecycle,
                action: "register a handle",
            });
        }
        self.registry.register(index, handle).inspect_err(|err| {
            log::warn!("Rejected handle registration: {}", err);
        })
    }

    /// Finish mounting and become interactive.
    pub fn finish_mount(&mut self) -> WidgetResult<()> {
        if self.lifecycle != Lifecycle::Mounting {
            return Err(WidgetError::InvalidTransition {
                state: self.lifecycle,
                action: "finish mounting",
            });
        }
        self.lifecycle = Lifecycle::Mounted;
        log::info!(
            "Rating widget mounted ({} of {} handles live)",
            self.registry.live_count(),
            self.registry.len()
        );
        Ok(())
    }

    /// Mount in one step, registering `handles` in logical star order.
    pub fn mount(&mut self, handles: &[Rc<dyn AnimationHandle>]) -> WidgetResult<()> {
        self.begin_mount()?;
        for (index, handle) in handles.iter().enumerate() {
            self.register_handle(index, handle)?;
        }
        self.finish_mount()
    }

    /// Release all handles and detach.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounting;
        self.registry.clear();
        self.lifecycle = Lifecycle::Unmounted;
        log::info!("Rating widget unmounted");
    }

    /// Fill and color of every star, left to right in logical order.
    pub fn visual_states(&self) -> Vec<StarVisualState> {
        rating::visual_states(
            self.config.rating,
            self.config.max_stars,
            self.config.half_star_enabled,
            &self.config.palette(),
        )
    }

    /// Layout of this widget's row at `origin`.
    pub fn layout(&self, origin: Point, spacing: f64) -> StarLayout {
        StarLayout::new(origin, self.config.star_size, self.config.max_stars)
            .with_spacing(spacing)
            .with_reversed(self.config.reversed)
    }

    /// Build one element per star, in logical order.
    pub fn render(&self) -> Vec<StarElement> {
        let config = &self.config;
        let provider = config.icon_provider();
        let layout = self.layout(Point::ZERO, 0.0);
        let active_opacity = config.active_opacity();

        self.visual_states()
            .into_iter()
            .enumerate()
            .map(|(index, state)| {
                let icon = match state.fill {
                    StarFill::Full => &config.full_star,
                    StarFill::Half => &config.half_star,
                    StarFill::Empty => &config.empty_star,
                };
                StarElement {
                    index,
                    slot: layout.slot_for(index),
                    fill: state.fill,
                    icon: provider.resolve(icon, config.star_size),
                    color: state.color,
                    size: config.star_size,
                    disabled: config.disabled,
                    mirrored: config.reversed,
                    active_opacity,
                }
            })
            .collect()
    }

    /// Find the star under `point`. A disabled widget has no hit surface.
    pub fn hit_test(&self, layout: &StarLayout, point: Point) -> Option<StarHit> {
        if self.config.disabled {
            return None;
        }
        layout.hit_test(point)
    }

    /// Deliver a pointer tap at `point` in the layout's coordinate space.
    ///
    /// Returns `None` when the point hits no star.
    pub fn handle_pointer(&mut self, layout: &StarLayout, point: Point) -> Option<TapOutcome> {
        let hit = self.hit_test(layout, point)?;
        Some(self.handle_tap(hit.index, hit.offset_x))
    }

    /// Deliver a tap on star `index`, `offset_x` from the star's left edge.
    ///
    /// On success the staggered animation fires (if configured), then the
    /// selection callback receives the new rating.
    pub fn handle_tap(&mut self, index: usize, offset_x: f64) -> TapOutcome {
        if self.config.disabled {
            log::debug!("Ignoring tap on star {}: widget disabled", index);
            return TapOutcome::Rejected(TapRejection::Disabled);
        }
        if !self.lifecycle.is_mounted() {
            log::debug!("Ignoring tap on star {}: widget {}", index, self.lifecycle);
            return TapOutcome::Rejected(TapRejection::NotMounted);
        }
        if index >= self.config.max_stars {
            log::debug!(
                "Ignoring tap on star {}: only {} stars",
                index,
                self.config.max_stars
            );
            return TapOutcome::Rejected(TapRejection::OutOfRange);
        }

        let rating = resolve_selection(
            offset_x,
            self.config.star_size,
            index,
            self.config.half_star_enabled,
        );
        log::debug!("Tap on star {} at x={} selects {}", index, offset_x, rating);

        self.sequencer
            .sequence(index, self.config.animation, &self.registry);
        (self.on_select)(rating);

        TapOutcome::Selected(rating)
    }
}

impl fmt::Debug for RatingWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingWidget")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("lifecycle", &self.lifecycle)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}
