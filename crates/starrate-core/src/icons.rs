//! Star icon identifiers and the icon sets that resolve them.
//!
//! Glyph catalogs live with the host's font renderer. This module only
//! decides which font family a star uses and, for custom IcoMoon sets,
//! which code point a glyph name maps to.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Identifier of the icon drawn for a star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarIcon {
    /// Glyph looked up by name in the active icon set.
    Name(String),
    /// Glyph addressed by its numeric code.
    Code(u32),
    /// Image drawn instead of a glyph.
    Image { uri: String },
}

impl StarIcon {
    /// Glyph looked up by name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Image loaded from `uri`.
    pub fn image(uri: impl Into<String>) -> Self {
        Self::Image { uri: uri.into() }
    }
}

/// An icon after resolution against an icon set, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedIcon {
    Glyph {
        family: String,
        name: String,
        /// Known code point, if the icon set carries a glyph map.
        code_point: Option<char>,
        size: f64,
    },
    /// Image scaled to fit a `size` x `size` box.
    Image { uri: String, size: f64 },
}

/// Resolves glyph names for one icon font.
pub trait IconProvider: fmt::Debug {
    /// Font family the host should render glyphs with.
    fn font_family(&self) -> &str;

    /// Code point for a glyph name, when this provider knows it.
    fn code_point(&self, name: &str) -> Option<char>;

    /// Resolve an icon identifier at the given size.
    fn resolve(&self, icon: &StarIcon, size: f64) -> ResolvedIcon {
        match icon {
            StarIcon::Name(name) => ResolvedIcon::Glyph {
                family: self.font_family().to_string(),
                name: name.clone(),
                code_point: self.code_point(name),
                size,
            },
            StarIcon::Code(code) => ResolvedIcon::Glyph {
                family: self.font_family().to_string(),
                name: code.to_string(),
                code_point: char::from_u32(*code),
                size,
            },
            StarIcon::Image { uri } => ResolvedIcon::Image {
                uri: uri.clone(),
                size,
            },
        }
    }
}

/// Built-in vector icon fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IconFont {
    Entypo,
    EvilIcons,
    Feather,
    #[default]
    FontAwesome,
    Foundation,
    Ionicons,
    MaterialIcons,
    MaterialCommunityIcons,
    Octicons,
    Zocial,
    SimpleLineIcons,
}

impl IconFont {
    /// All built-in fonts.
    pub const ALL: [IconFont; 11] = [
        IconFont::Entypo,
        IconFont::EvilIcons,
        IconFont::Feather,
        IconFont::FontAwesome,
        IconFont::Foundation,
        IconFont::Ionicons,
        IconFont::MaterialIcons,
        IconFont::MaterialCommunityIcons,
        IconFont::Octicons,
        IconFont::Zocial,
        IconFont::SimpleLineIcons,
    ];

    /// Name used in configuration and as the font family.
    pub fn name(self) -> &'static str {
        match self {
            IconFont::Entypo => "Entypo",
            IconFont::EvilIcons => "EvilIcons",
            IconFont::Feather => "Feather",
            IconFont::FontAwesome => "FontAwesome",
            IconFont::Foundation => "Foundation",
            IconFont::Ionicons => "Ionicons",
            IconFont::MaterialIcons => "MaterialIcons",
            IconFont::MaterialCommunityIcons => "MaterialCommunityIcons",
            IconFont::Octicons => "Octicons",
            IconFont::Zocial => "Zocial",
            IconFont::SimpleLineIcons => "SimpleLineIcons",
        }
    }
}

impl fmt::Display for IconFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IconFont {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconFont::ALL
            .into_iter()
            .find(|font| font.name() == s)
            .ok_or_else(|| ConfigError::UnknownIconSet(s.to_string()))
    }
}

impl IconProvider for IconFont {
    fn font_family(&self) -> &str {
        self.name()
    }

    fn code_point(&self, _name: &str) -> Option<char> {
        None
    }
}

/// A custom icon font exported from IcoMoon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IcoMoonSelection", into = "IcoMoonSelection")]
pub struct IcoMoonSet {
    font_family: String,
    glyphs: BTreeMap<String, u32>,
}

impl IcoMoonSet {
    /// Create an empty set for `font_family`.
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            glyphs: BTreeMap::new(),
        }
    }

    /// Add a glyph mapping.
    pub fn with_glyph(mut self, name: impl Into<String>, code: u32) -> Self {
        self.glyphs.insert(name.into(), code);
        self
    }

    /// Parse an IcoMoon `selection.json` export.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let selection: IcoMoonSelection =
            serde_json::from_str(json).map_err(ConfigError::IcoMoon)?;
        Ok(selection.into())
    }

    /// Number of glyph names in the set.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check if the set maps no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl IconProvider for IcoMoonSet {
    fn font_family(&self) -> &str {
        &self.font_family
    }

    fn code_point(&self, name: &str) -> Option<char> {
        self.glyphs.get(name).copied().and_then(char::from_u32)
    }
}

// Mirrors the parts of IcoMoon's selection.json that matter for glyph lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IcoMoonSelection {
    icons: Vec<IcoMoonIcon>,
    preferences: IcoMoonPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IcoMoonIcon {
    properties: IcoMoonProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IcoMoonProperties {
    /// One or more comma-separated names.
    name: String,
    code: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IcoMoonPreferences {
    font_pref: IcoMoonFontPref,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IcoMoonFontPref {
    metadata: IcoMoonMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IcoMoonMetadata {
    font_family: String,
}

impl From<IcoMoonSelection> for IcoMoonSet {
    fn from(selection: IcoMoonSelection) -> Self {
        let mut glyphs = BTreeMap::new();
        for icon in selection.icons {
            for name in icon.properties.name.split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    glyphs.insert(name.to_string(), icon.properties.code);
                }
            }
        }
        Self {
            font_family: selection.preferences.font_pref.metadata.font_family,
            glyphs,
        }
    }
}

impl From<IcoMoonSet> for IcoMoonSelection {
    fn from(set: IcoMoonSet) -> Self {
        Self {
            icons: set
                .glyphs
                .into_iter()
                .map(|(name, code)| IcoMoonIcon {
                    properties: IcoMoonProperties { name, code },
                })
                .collect(),
            preferences: IcoMoonPreferences {
                font_pref: IcoMoonFontPref {
                    metadata: IcoMoonMetadata {
                        font_family: set.font_family,
                    },
                },
            },
        }
    }
}

/// Where star glyphs come from.
///
/// Configured either by font name (`"Feather"`) or with an inline IcoMoon
/// descriptor. Unknown font names are rejected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIconSource", into = "RawIconSource")]
pub enum IconSource {
    Font(IconFont),
    IcoMoon(IcoMoonSet),
}

impl Default for IconSource {
    fn default() -> Self {
        Self::Font(IconFont::default())
    }
}

impl IconSource {
    /// The provider that resolves glyphs for this source.
    pub fn provider(&self) -> &dyn IconProvider {
        match self {
            IconSource::Font(font) => font as &dyn IconProvider,
            IconSource::IcoMoon(set) => set,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawIconSource {
    Name(String),
    IcoMoon(IcoMoonSet),
}

impl TryFrom<RawIconSource> for IconSource {
    type Error = ConfigError;

    fn try_from(raw: RawIconSource) -> Result<Self, Self::Error> {
        match raw {
            RawIconSource::Name(name) => name.parse().map(IconSource::Font),
            RawIconSource::IcoMoon(set) => Ok(IconSource::IcoMoon(set)),
        }
    }
}

impl From<IconSource> for RawIconSource {
    fn from(source: IconSource) -> Self {
        match source {
            IconSource::Font(font) => RawIconSource::Name(font.name().to_string()),
            IconSource::IcoMoon(set) => RawIconSource::IcoMoon(set),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTION: &str = r#"{
        "icons": [
            { "icon": { "paths": [] }, "properties": { "name": "star, favorite", "code": 59648 } },
            { "properties": { "name": "star-empty", "code": 59649 } }
        ],
        "preferences": { "fontPref": { "metadata": { "fontFamily": "rating-icons" } } }
    }"#;

    #[test]
    fn test_parse_icomoon_selection() {
        let set = IcoMoonSet::from_json(SELECTION).unwrap();
        assert_eq!(set.font_family(), "rating-icons");
        assert_eq!(set.len(), 3);
        assert_eq!(set.code_point("star"), Some('\u{e900}'));
        assert_eq!(set.code_point("favorite"), Some('\u{e900}'));
        assert_eq!(set.code_point("star-empty"), Some('\u{e901}'));
        assert_eq!(set.code_point("missing"), None);
    }

    #[test]
    fn test_malformed_selection() {
        let err = IcoMoonSet::from_json(r#"{ "icons": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::IcoMoon(_)));
    }

    #[test]
    fn test_font_names() {
        for font in IconFont::ALL {
            assert_eq!(font.name().parse::<IconFont>().unwrap(), font);
        }
        assert!(matches!(
            "Wingdings".parse::<IconFont>(),
            Err(ConfigError::UnknownIconSet(name)) if name == "Wingdings"
        ));
    }

    #[test]
    fn test_icon_source_from_json() {
        let source: IconSource = serde_json::from_str(r#""Ionicons""#).unwrap();
        assert_eq!(source, IconSource::Font(IconFont::Ionicons));
        assert_eq!(source.provider().font_family(), "Ionicons");

        let source: IconSource = serde_json::from_str(SELECTION).unwrap();
        assert_eq!(source.provider().font_family(), "rating-icons");

        assert!(serde_json::from_str::<IconSource>(r#""Wingdings""#).is_err());
    }

    #[test]
    fn test_resolve_icons() {
        let font = IconFont::FontAwesome;
        assert_eq!(
            font.resolve(&StarIcon::name("star"), 40.0),
            ResolvedIcon::Glyph {
                family: "FontAwesome".into(),
                name: "star".into(),
                code_point: None,
                size: 40.0,
            }
        );
        assert_eq!(
            font.resolve(&StarIcon::image("asset://star.png"), 24.0),
            ResolvedIcon::Image {
                uri: "asset://star.png".into(),
                size: 24.0,
            }
        );

        let set = IcoMoonSet::new("custom").with_glyph("star", 0xe900);
        match set.resolve(&StarIcon::Code(0xe901), 40.0) {
            ResolvedIcon::Glyph { code_point, name, .. } => {
                assert_eq!(code_point, Some('\u{e901}'));
                assert_eq!(name, "59649");
            }
            other => panic!("expected glyph, got {other:?}"),
        }
    }

    #[test]
    fn test_star_icon_json_forms() {
        let icons: Vec<StarIcon> =
            serde_json::from_str(r#"["star", 61445, { "uri": "file:///star.png" }]"#).unwrap();
        assert_eq!(
            icons,
            vec![
                StarIcon::name("star"),
                StarIcon::Code(61445),
                StarIcon::image("file:///star.png"),
            ]
        );
    }
}
