//! Widget configuration.
//!
//! A [`WidgetConfig`] is immutable once handed to a widget; updates replace
//! it wholesale. It reads from JSON with the same camelCase keys hosts use
//! for the rating component, and every key is optional.

use std::fmt;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::animation::StarAnimation;
use crate::icons::{IcoMoonSet, IconFont, IconProvider, IconSource, StarIcon};
use crate::rating::StarPalette;

/// Configuration errors.
///
/// [`WidgetConfig::from_json`] reports unknown animation and icon-set names
/// through their own variants; other malformed input comes back as `Json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),
    #[error("Unknown icon set: {0}")]
    UnknownIconSet(String),
    #[error("Invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },
    #[error("Invalid IcoMoon descriptor: {0}")]
    IcoMoon(serde_json::Error),
    #[error("Invalid widget configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A star color (RGBA8).
///
/// Reads from CSS color strings such as `"gray"` or `"#ffcc00"` and writes
/// back as `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StarColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StarColor {
    /// Create a color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `black`.
    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// CSS `gray`.
    pub const fn gray() -> Self {
        Self::new(128, 128, 128, 255)
    }

    /// Parse any CSS color string.
    pub fn parse(value: &str) -> ConfigResult<Self> {
        let parsed = parse_color(value).map_err(|err| ConfigError::InvalidColor {
            value: value.to_string(),
            reason: err.to_string(),
        })?;
        Ok(parsed.to_alpha_color::<Srgb>().into())
    }

    /// The color as a peniko color for renderers.
    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for StarColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl TryFrom<String> for StarColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StarColor> for String {
    fn from(color: StarColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for StarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Everything a rating widget can be configured with.
///
/// Unknown keys are rejected so misspelled options do not go unnoticed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WidgetConfig {
    /// Opacity of a star while pressed.
    pub active_opacity: f64,
    /// Animation played on selection (none when unset).
    #[serde(alias = "animationName")]
    pub animation: Option<StarAnimation>,
    pub disabled: bool,
    pub empty_star: StarIcon,
    pub empty_star_color: StarColor,
    pub full_star: StarIcon,
    pub full_star_color: StarColor,
    pub half_star: StarIcon,
    /// Falls back to `full_star_color` when unset.
    pub half_star_color: Option<StarColor>,
    pub half_star_enabled: bool,
    pub icon_set: IconSource,
    /// Custom IcoMoon font; takes precedence over `icon_set`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ico_moon_json: Option<IcoMoonSet>,
    pub max_stars: usize,
    pub rating: f64,
    /// Lay stars out right-to-left and mirror their icons.
    pub reversed: bool,
    /// Star edge length; also the basis for half-star hit testing.
    pub star_size: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            active_opacity: 0.2,
            animation: None,
            disabled: false,
            empty_star: StarIcon::name("star-o"),
            empty_star_color: StarColor::gray(),
            full_star: StarIcon::name("star"),
            full_star_color: StarColor::black(),
            half_star: StarIcon::name("star-half-o"),
            half_star_color: None,
            half_star_enabled: false,
            icon_set: IconSource::default(),
            ico_moon_json: None,
            max_stars: 5,
            rating: 0.0,
            reversed: false,
            star_size: 40.0,
        }
    }
}

impl WidgetConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        check_names(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the displayed rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the number of stars.
    pub fn with_max_stars(mut self, max_stars: usize) -> Self {
        self.max_stars = max_stars;
        self
    }

    /// Enable or disable half-star display and selection.
    pub fn with_half_stars(mut self, enabled: bool) -> Self {
        self.half_star_enabled = enabled;
        self
    }

    /// Set the selection animation.
    pub fn with_animation(mut self, animation: Option<StarAnimation>) -> Self {
        self.animation = animation;
        self
    }

    /// Enable or disable interaction.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Lay the row out right-to-left.
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Set the star edge length.
    pub fn with_star_size(mut self, star_size: f64) -> Self {
        self.star_size = star_size;
        self
    }

    /// Set the icon source.
    pub fn with_icon_set(mut self, icon_set: IconSource) -> Self {
        self.icon_set = icon_set;
        self
    }

    /// Use a custom IcoMoon font, overriding the icon source.
    pub fn with_ico_moon(mut self, set: Option<IcoMoonSet>) -> Self {
        self.ico_moon_json = set;
        self
    }

    /// Set the full, half and empty star colors.
    pub fn with_colors(mut self, full: StarColor, half: Option<StarColor>, empty: StarColor) -> Self {
        self.full_star_color = full;
        self.half_star_color = half;
        self.empty_star_color = empty;
        self
    }

    /// Colors for each fill state, with the half-star fallback applied.
    pub fn palette(&self) -> StarPalette {
        StarPalette {
            full: self.full_star_color,
            half: self.half_star_color.unwrap_or(self.full_star_color),
            empty: self.empty_star_color,
        }
    }

    /// Pressed-state opacity, clamped to `[0, 1]`.
    pub fn active_opacity(&self) -> f64 {
        if self.active_opacity.is_nan() {
            return 0.0;
        }
        self.active_opacity.clamp(0.0, 1.0)
    }

    /// Provider that resolves this configuration's glyphs.
    ///
    /// A custom IcoMoon font wins over the configured icon source.
    pub fn icon_provider(&self) -> &dyn IconProvider {
        match &self.ico_moon_json {
            Some(set) => set as &dyn IconProvider,
            None => self.icon_set.provider(),
        }
    }
}

/// Reject unknown animation and icon-set names with their own errors.
fn check_names(value: &Value) -> ConfigResult<()> {
    for key in ["animation", "animationName"] {
        if let Some(name) = value.get(key).and_then(Value::as_str) {
            name.parse::<StarAnimation>()?;
        }
    }
    if let Some(name) = value.get("iconSet").and_then(Value::as_str) {
        name.parse::<IconFont>()?;
    }
    if let Some(descriptor) = value.get("icoMoonJson").filter(|v| !v.is_null()) {
        IcoMoonSet::deserialize(descriptor).map_err(ConfigError::IcoMoon)?;
    }
    Ok(())
}
