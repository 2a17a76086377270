//! Staggered selection animations.
//!
//! When a star is tapped, every star from the first up to and including the
//! tapped one plays the configured animation. Each later star runs a little
//! longer, so the row settles from left to right:
//!
//! ```text
//! star:      0       1       2
//! duration:  1000ms  1200ms  1400ms
//! ```
//!
//! The sequencer only triggers animations. How they look and when they
//! finish is up to the [`AnimationHandle`] implementation.

use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::widget::WidgetError;

/// Duration of the first star's animation.
pub const BASE_DURATION: Duration = Duration::from_millis(1000);

/// Extra duration added per star index.
pub const STAGGER_STEP: Duration = Duration::from_millis(200);

/// Animations a star can play on selection.
///
/// Unknown names are rejected with [`ConfigError::UnknownAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum StarAnimation {
    Bounce,
    Flash,
    Jello,
    Pulse,
    Rotate,
    RubberBand,
    Shake,
    Swing,
    Tada,
    Wobble,
}

impl StarAnimation {
    /// Every animation, in configuration-name order.
    pub const ALL: [StarAnimation; 10] = [
        StarAnimation::Bounce,
        StarAnimation::Flash,
        StarAnimation::Jello,
        StarAnimation::Pulse,
        StarAnimation::Rotate,
        StarAnimation::RubberBand,
        StarAnimation::Shake,
        StarAnimation::Swing,
        StarAnimation::Tada,
        StarAnimation::Wobble,
    ];

    /// Configuration name of the animation.
    pub fn name(self) -> &'static str {
        match self {
            StarAnimation::Bounce => "bounce",
            StarAnimation::Flash => "flash",
            StarAnimation::Jello => "jello",
            StarAnimation::Pulse => "pulse",
            StarAnimation::Rotate => "rotate",
            StarAnimation::RubberBand => "rubberBand",
            StarAnimation::Shake => "shake",
            StarAnimation::Swing => "swing",
            StarAnimation::Tada => "tada",
            StarAnimation::Wobble => "wobble",
        }
    }

    /// Fire this animation on `handle`.
    pub fn trigger(self, handle: &dyn AnimationHandle, duration: Duration) {
        match self {
            StarAnimation::Bounce => handle.bounce(duration),
            StarAnimation::Flash => handle.flash(duration),
            StarAnimation::Jello => handle.jello(duration),
            StarAnimation::Pulse => handle.pulse(duration),
            StarAnimation::Rotate => handle.rotate(duration),
            StarAnimation::RubberBand => handle.rubber_band(duration),
            StarAnimation::Shake => handle.shake(duration),
            StarAnimation::Swing => handle.swing(duration),
            StarAnimation::Tada => handle.tada(duration),
            StarAnimation::Wobble => handle.wobble(duration),
        }
    }
}

impl fmt::Display for StarAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StarAnimation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StarAnimation::ALL
            .into_iter()
            .find(|animation| animation.name() == s)
            .ok_or_else(|| ConfigError::UnknownAnimation(s.to_string()))
    }
}

impl TryFrom<String> for StarAnimation {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<StarAnimation> for &'static str {
    fn from(animation: StarAnimation) -> Self {
        animation.name()
    }
}

/// A mounted star that can play animations.
///
/// Only [`play`](AnimationHandle::play) is required; the per-animation
/// methods route to it unless a host overrides them.
pub trait AnimationHandle {
    /// Start `animation`, running for `duration`. Must not block.
    fn play(&self, animation: StarAnimation, duration: Duration);

    fn bounce(&self, duration: Duration) {
        self.play(StarAnimation::Bounce, duration);
    }

    fn flash(&self, duration: Duration) {
        self.play(StarAnimation::Flash, duration);
    }

    fn jello(&self, duration: Duration) {
        self.play(StarAnimation::Jello, duration);
    }

    fn pulse(&self, duration: Duration) {
        self.play(StarAnimation::Pulse, duration);
    }

    fn rotate(&self, duration: Duration) {
        self.play(StarAnimation::Rotate, duration);
    }

    fn rubber_band(&self, duration: Duration) {
        self.play(StarAnimation::RubberBand, duration);
    }

    fn shake(&self, duration: Duration) {
        self.play(StarAnimation::Shake, duration);
    }

    fn swing(&self, duration: Duration) {
        self.play(StarAnimation::Swing, duration);
    }

    fn tada(&self, duration: Duration) {
        self.play(StarAnimation::Tada, duration);
    }

    fn wobble(&self, duration: Duration) {
        self.play(StarAnimation::Wobble, duration);
    }
}

/// Per-star animation handles, addressed by logical star index.
///
/// The registry holds weak references only. A handle whose owner has been
/// dropped reads as unregistered.
#[derive(Default)]
pub struct HandleRegistry {
    slots: Vec<Option<Weak<dyn AnimationHandle>>>,
}

impl HandleRegistry {
    /// Create a registry with `star_count` empty slots.
    pub fn new(star_count: usize) -> Self {
        Self {
            slots: vec![None; star_count],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the registry has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every handle and resize to `star_count` empty slots.
    pub fn reset(&mut self, star_count: usize) {
        self.slots.clear();
        self.slots.resize(star_count, None);
    }

    /// Drop every handle and remove all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Register the handle for star `index`, replacing any previous one.
    pub fn register(
        &mut self,
        index: usize,
        handle: &Rc<dyn AnimationHandle>,
    ) -> Result<(), WidgetError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(WidgetError::HandleOutOfRange { index, len })?;
        *slot = Some(Rc::downgrade(handle));
        Ok(())
    }

    /// Forget the handle for star `index`.
    pub fn unregister(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Live handle for star `index`, if any.
    pub fn get(&self, index: usize) -> Option<Rc<dyn AnimationHandle>> {
        self.slots.get(index)?.as_ref()?.upgrade()
    }

    /// Number of slots holding a live handle.
    pub fn live_count(&self) -> usize {
        (0..self.slots.len()).filter(|&i| self.get(i).is_some()).count()
    }
}

impl fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("len", &self.len())
            .field("live", &self.live_count())
            .finish()
    }
}

/// One entry of a stagger schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerStep {
    pub index: usize,
    pub duration: Duration,
}

/// Triggers the staggered selection animation across a star row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSequencer {
    base: Duration,
    step: Duration,
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self {
            base: BASE_DURATION,
            step: STAGGER_STEP,
        }
    }
}

impl AnimationSequencer {
    /// Create a sequencer with the standard 1000ms + 200ms-per-star timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom timing.
    pub fn with_timing(base: Duration, step: Duration) -> Self {
        Self { base, step }
    }

    /// Duration for the star at `index`.
    pub fn duration_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base.saturating_add(self.step.saturating_mul(index))
    }

    /// Stars `0..=triggered_index` in trigger order, with their durations.
    pub fn schedule(&self, triggered_index: usize) -> impl Iterator<Item = StaggerStep> {
        let sequencer = *self;
        (0..=triggered_index).map(move |index| StaggerStep {
            index,
            duration: sequencer.duration_for(index),
        })
    }

    /// Fire `animation` on every registered star up to `triggered_index`.
    ///
    /// Missing handles are skipped. Returns the number of handles fired.
    pub fn sequence(
        &self,
        triggered_index: usize,
        animation: Option<StarAnimation>,
        registry: &HandleRegistry,
    ) -> usize {
        let Some(animation) = animation else {
            return 0;
        };
        if registry.is_empty() {
            return 0;
        }

        // Stars past the registry have no handle; stop at the last slot.
        let last = triggered_index.min(registry.len() - 1);
        let mut fired = 0;
        for step in self.schedule(last) {
            match registry.get(step.index) {
                Some(handle) => {
                    log::trace!(
                        "Star {} playing {} for {:?}",
                        step.index,
                        animation,
                        step.duration
                    );
                    animation.trigger(handle.as_ref(), step.duration);
                    fired += 1;
                }
                None => log::warn!("No animation handle for star {}, skipping", step.index),
            }
        }

        log::debug!(
            "Sequenced {} up to star {}: {} of {} handles fired",
            animation,
            triggered_index,
            fired,
            last + 1
        );
        fired
    }
}
