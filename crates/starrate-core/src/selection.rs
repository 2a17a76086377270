//! Tap resolution: turning a tap on a star into a rating.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Rating implied by tapping the star at `star_index`.
///
/// `tap_offset_x` is measured from the left edge of the tapped star's
/// bounding box. With half stars enabled, a tap on the left half selects
/// the half value. A non-positive `star_size` never selects a half star.
pub fn resolve_selection(
    tap_offset_x: f64,
    star_size: f64,
    star_index: usize,
    half_star_enabled: bool,
) -> f64 {
    let base = (star_index + 1) as f64;
    if half_star_enabled && tap_offset_x < star_size / 2.0 {
        base - 0.5
    } else {
        base
    }
}

/// Geometry of a rendered star row.
///
/// Stars are square, `star_size` wide, separated by `spacing`. When the
/// row is reversed, star 0 occupies the rightmost slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarLayout {
    /// Top-left corner of the row.
    pub origin: Point,
    pub star_size: f64,
    pub spacing: f64,
    pub star_count: usize,
    pub reversed: bool,
}

/// A point that landed on a star, in that star's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarHit {
    pub index: usize,
    pub offset_x: f64,
}

impl StarLayout {
    /// Create a layout for `star_count` stars with no spacing.
    pub fn new(origin: Point, star_size: f64, star_count: usize) -> Self {
        Self {
            origin,
            star_size,
            spacing: 0.0,
            star_count,
            reversed: false,
        }
    }

    /// Set the gap between neighbouring stars.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Lay the row out right-to-left.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Visual slot (0 = leftmost) a logical star index is drawn in.
    pub fn slot_for(&self, index: usize) -> usize {
        if self.reversed {
            self.star_count.saturating_sub(index + 1)
        } else {
            index
        }
    }

    /// Bounding box of the star at logical `index`.
    pub fn star_rect(&self, index: usize) -> Rect {
        let size = self.star_size.max(0.0);
        let slot = self.slot_for(index) as f64;
        let origin = self.origin + Vec2::new(slot * (size + self.spacing), 0.0);
        Rect::from_origin_size(origin, Size::new(size, size))
    }

    /// Bounding box of the whole row.
    pub fn bounds(&self) -> Rect {
        if self.star_count == 0 {
            return Rect::from_origin_size(self.origin, Size::ZERO);
        }
        let size = self.star_size.max(0.0);
        let width = self.star_count as f64 * size + (self.star_count - 1) as f64 * self.spacing;
        Rect::from_origin_size(self.origin, Size::new(width, size))
    }

    /// Find the star under `point`, reporting the offset from its left edge.
    ///
    /// Points in the gaps between stars hit nothing.
    pub fn hit_test(&self, point: Point) -> Option<StarHit> {
        (0..self.star_count).find_map(|index| {
            let rect = self.star_rect(index);
            let inside = point.x >= rect.x0
                && point.x < rect.x1
                && point.y >= rect.y0
                && point.y < rect.y1;
            inside.then(|| StarHit {
                index,
                offset_x: point.x - rect.x0,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_half_star() {
        assert_eq!(resolve_selection(0.0, 40.0, 2, true), 2.5);
        assert_eq!(resolve_selection(30.0, 40.0, 2, true), 3.0);
        assert_eq!(resolve_selection(20.0, 40.0, 2, true), 3.0);
        assert_eq!(resolve_selection(19.9, 40.0, 0, true), 0.5);
    }

    #[test]
    fn test_resolve_whole_star() {
        assert_eq!(resolve_selection(0.0, 40.0, 2, false), 3.0);
        assert_eq!(resolve_selection(30.0, 40.0, 2, false), 3.0);
    }

    #[test]
    fn test_resolve_degenerate_size() {
        assert_eq!(resolve_selection(0.0, 0.0, 1, true), 2.0);
        assert_eq!(resolve_selection(5.0, -40.0, 1, true), 2.0);
        assert_eq!(resolve_selection(f64::NAN, 40.0, 1, true), 2.0);
    }

    #[test]
    fn test_star_rects() {
        let layout = StarLayout::new(Point::new(10.0, 5.0), 40.0, 3).with_spacing(4.0);
        assert_eq!(layout.star_rect(0), Rect::new(10.0, 5.0, 50.0, 45.0));
        assert_eq!(layout.star_rect(2), Rect::new(98.0, 5.0, 138.0, 45.0));
        assert_eq!(layout.bounds(), Rect::new(10.0, 5.0, 138.0, 45.0));
    }

    #[test]
    fn test_reversed_slots() {
        let layout = StarLayout::new(Point::ZERO, 40.0, 5).with_reversed(true);
        assert_eq!(layout.slot_for(0), 4);
        assert_eq!(layout.slot_for(4), 0);
        assert_eq!(layout.star_rect(0).x0, 160.0);
    }

    #[test]
    fn test_hit_test_local_offset() {
        let layout = StarLayout::new(Point::new(100.0, 0.0), 40.0, 5).with_spacing(10.0);
        let hit = layout.hit_test(Point::new(155.0, 20.0)).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.offset_x - 5.0).abs() < f64::EPSILON);

        // Gap between stars
        assert!(layout.hit_test(Point::new(145.0, 20.0)).is_none());
        // Below the row
        assert!(layout.hit_test(Point::new(105.0, 50.0)).is_none());
    }

    #[test]
    fn test_hit_test_reversed() {
        let layout = StarLayout::new(Point::ZERO, 40.0, 3).with_reversed(true);
        let hit = layout.hit_test(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(hit.index, 2);
        assert!((hit.offset_x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_row() {
        let layout = StarLayout::new(Point::ZERO, 40.0, 0);
        assert!(layout.hit_test(Point::new(1.0, 1.0)).is_none());
        assert_eq!(layout.bounds().area(), 0.0);
    }
}
