//! Rating discretization.
//!
//! Turns a continuous rating into one fill state per star position. The
//! result is always in logical (left-to-right) order; mirroring for
//! reversed layouts happens when elements are laid out, not here.

use serde::{Deserialize, Serialize};

use crate::config::StarColor;

/// How much of a single star is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarFill {
    /// The whole star is lit.
    Full,
    /// Left half lit (only produced when half stars are enabled).
    Half,
    /// Nothing lit.
    Empty,
}

impl StarFill {
    /// Rating value this fill contributes to the row.
    pub fn value(self) -> f64 {
        match self {
            StarFill::Full => 1.0,
            StarFill::Half => 0.5,
            StarFill::Empty => 0.0,
        }
    }
}

/// Colors used for each fill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarPalette {
    pub full: StarColor,
    pub half: StarColor,
    pub empty: StarColor,
}

impl StarPalette {
    /// Color for a fill state.
    pub fn color_for(&self, fill: StarFill) -> StarColor {
        match fill {
            StarFill::Full => self.full,
            StarFill::Half => self.half,
            StarFill::Empty => self.empty,
        }
    }
}

/// Fill state plus the color it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarVisualState {
    pub fill: StarFill,
    pub color: StarColor,
}

/// Round a rating to the granularity the widget can display.
///
/// Negative and NaN ratings collapse to zero.
pub fn round_rating(rating: f64, half_star_enabled: bool) -> f64 {
    // Also catches NaN, which fails every comparison.
    if !(rating > 0.0) {
        return 0.0;
    }
    if half_star_enabled {
        (rating * 2.0).round() / 2.0
    } else {
        rating.round()
    }
}

/// Compute the fill of every star position for `rating`.
///
/// Ratings above `max_stars` show a fully lit row.
pub fn discretize(rating: f64, max_stars: usize, half_star_enabled: bool) -> Vec<StarFill> {
    let mut remaining = round_rating(rating, half_star_enabled);

    (0..max_stars)
        .map(|_| {
            let fill = if remaining >= 1.0 {
                StarFill::Full
            } else if half_star_enabled && remaining == 0.5 {
                StarFill::Half
            } else {
                StarFill::Empty
            };
            remaining -= 1.0;
            fill
        })
        .collect()
}

/// Discretize and attach palette colors in one pass.
pub fn visual_states(
    rating: f64,
    max_stars: usize,
    half_star_enabled: bool,
    palette: &StarPalette,
) -> Vec<StarVisualState> {
    discretize(rating, max_stars, half_star_enabled)
        .into_iter()
        .map(|fill| StarVisualState {
            fill,
            color: palette.color_for(fill),
        })
        .collect()
}

/// Rating value a row of fills displays.
pub fn displayed_rating(fills: &[StarFill]) -> f64 {
    fills.iter().map(|fill| fill.value()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::StarFill::{Empty, Full, Half};

    #[test]
    fn test_whole_stars_only() {
        assert_eq!(discretize(3.0, 5, false), vec![Full, Full, Full, Empty, Empty]);
        // 2.5 rounds away from zero without half stars
        assert_eq!(discretize(2.5, 5, false), vec![Full, Full, Full, Empty, Empty]);
        assert_eq!(discretize(2.4, 5, false), vec![Full, Full, Empty, Empty, Empty]);
    }

    #[test]
    fn test_never_half_when_disabled() {
        let mut rating: f64 = 0.0;
        while rating <= 5.0 {
            let fills = discretize(rating, 5, false);
            assert!(!fills.contains(&Half), "half star at rating {rating}");
            let full = fills.iter().filter(|f| **f == Full).count();
            assert_eq!(full as f64, rating.round());
            // Full stars always come first
            assert!(fills[..full].iter().all(|f| *f == Full));
            assert!(fills[full..].iter().all(|f| *f == Empty));
            rating += 0.1;
        }
    }

    #[test]
    fn test_half_star() {
        assert_eq!(discretize(2.5, 5, true), vec![Full, Full, Half, Empty, Empty]);
        assert_eq!(discretize(2.3, 5, true), vec![Full, Full, Half, Empty, Empty]);
        assert_eq!(discretize(2.2, 5, true), vec![Full, Full, Empty, Empty, Empty]);
        assert_eq!(discretize(0.5, 3, true), vec![Half, Empty, Empty]);
    }

    #[test]
    fn test_displayed_rating_matches_rounded() {
        for step in 0..=60 {
            let rating = step as f64 * 0.1;
            let fills = discretize(rating, 5, true);
            let expected = round_rating(rating, true).clamp(0.0, 5.0);
            assert!(
                (displayed_rating(&fills) - expected).abs() < 1e-9,
                "rating {rating}"
            );
        }
    }

    #[test]
    fn test_fails_closed() {
        assert_eq!(discretize(-2.0, 3, true), vec![Empty, Empty, Empty]);
        assert_eq!(discretize(f64::NAN, 3, true), vec![Empty, Empty, Empty]);
    }

    #[test]
    fn test_over_max_clamps_to_full() {
        assert_eq!(discretize(12.0, 4, false), vec![Full; 4]);
        assert_eq!(discretize(f64::INFINITY, 2, true), vec![Full; 2]);
    }

    #[test]
    fn test_zero_stars() {
        assert!(discretize(3.0, 0, true).is_empty());
    }

    #[test]
    fn test_pure() {
        assert_eq!(discretize(3.7, 5, true), discretize(3.7, 5, true));
    }

    #[test]
    fn test_visual_states_colors() {
        let palette = StarPalette {
            full: StarColor::black(),
            half: StarColor::new(255, 0, 0, 255),
            empty: StarColor::new(128, 128, 128, 255),
        };
        let states = visual_states(1.5, 3, true, &palette);
        assert_eq!(states[0].color, palette.full);
        assert_eq!(states[1].fill, Half);
        assert_eq!(states[1].color, palette.half);
        assert_eq!(states[2].color, palette.empty);
    }
}
