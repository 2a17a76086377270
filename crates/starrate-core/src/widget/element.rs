//! Star elements handed to the host renderer.

use crate::config::StarColor;
use crate::icons::ResolvedIcon;
use crate::rating::StarFill;

use super::controller::{RatingWidget, TapOutcome};

/// Everything a host needs to draw one star and route taps back.
#[derive(Debug, Clone, PartialEq)]
pub struct StarElement {
    /// Logical position, counted from the lowest rating.
    pub index: usize,
    /// Visual position, counted from the left edge.
    pub slot: usize,
    pub fill: StarFill,
    pub icon: ResolvedIcon,
    pub color: StarColor,
    pub size: f64,
    pub disabled: bool,
    /// Draw the icon flipped horizontally.
    pub mirrored: bool,
    /// Opacity while pressed.
    pub active_opacity: f64,
}

impl StarElement {
    /// Report a tap on this star, `offset_x` from its left edge.
    pub fn tap(&self, widget: &mut RatingWidget, offset_x: f64) -> TapOutcome {
        widget.handle_tap(self.index, offset_x)
    }

    /// Horizontal scale the host applies to the icon.
    pub fn scale_x(&self) -> f64 {
        if self.mirrored { -1.0 } else { 1.0 }
    }
}
