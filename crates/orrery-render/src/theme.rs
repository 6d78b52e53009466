//! Theming and scale configuration read by the render adapter

use orrery_core::Color;
use orrery_sim::BodyId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Four-step shading palette, brightest first
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub [Color; 4]);

impl Palette {
    pub fn lit(&self) -> Color {
        self.0[0]
    }

    /// Shade used for the terminator band
    pub fn terminator(&self) -> Color {
        self.0[1]
    }

    pub fn unlit(&self) -> Color {
        self.0[3]
    }
}

/// Placement of the heliocentric frame inside the viewport
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Sun position in viewport-height units; x is scaled by the aspect ratio
    pub sun_position: [f64; 2],
    /// Viewport heights per AU
    pub au_scale: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            sun_position: [0.5, 0.52],
            au_scale: 0.3,
        }
    }
}

/// Rendering configuration, built once and shared by reference
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Multiplier on the true solar radius
    pub sun_scale: f64,
    /// Multiplier on true planet radii
    pub planet_scale: f64,
    /// Orbit stroke width (AU)
    pub orbit_line_width: f64,
    pub background: Color,
    pub orbit_line: Color,
    pub sun: Palette,
    /// Per-body palettes; entries given in JSON replace the matching defaults only
    #[serde(deserialize_with = "merge_default_palettes")]
    pub bodies: BTreeMap<BodyId, Palette>,
    pub view: ViewConfig,
}

fn merge_default_palettes<'de, D>(deserializer: D) -> Result<BTreeMap<BodyId, Palette>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<BodyId, Palette>::deserialize(deserializer)?;
    let mut bodies = Theme::default().bodies;
    bodies.extend(overrides);
    Ok(bodies)
}

fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::rgb8(r, g, b)
}

impl Default for Theme {
    fn default() -> Self {
        let night = Palette([
            hex(0x24, 0x24, 0x24),
            hex(0x1B, 0x1B, 0x1C),
            hex(0x12, 0x12, 0x14),
            hex(0x09, 0x09, 0x0B),
        ]);

        let bodies = BTreeMap::from([
            (
                BodyId::Mercury,
                Palette([hex(0x9B, 0x98, 0xA1), hex(0x8F, 0x8B, 0x96), hex(0x89, 0x84, 0x92), hex(0x83, 0x7C, 0x8E)]),
            ),
            (
                BodyId::Venus,
                Palette([hex(0xC4, 0x96, 0x56), hex(0xBF, 0x8E, 0x4A), hex(0xB4, 0x83, 0x49), hex(0xA8, 0x77, 0x48)]),
            ),
            (
                BodyId::Earth,
                Palette([hex(0x37, 0x93, 0xB2), hex(0x36, 0x89, 0xB3), hex(0x2F, 0x71, 0xA1), hex(0x23, 0x57, 0x7D)]),
            ),
            (
                BodyId::Mars,
                Palette([hex(0xAD, 0x62, 0x42), hex(0x96, 0x46, 0x32), hex(0x8A, 0x38, 0x2A), hex(0x7E, 0x2A, 0x22)]),
            ),
        ]);

        Self {
            sun_scale: 40.0,
            planet_scale: 1e3,
            orbit_line_width: 0.005,
            background: night.0[2],
            orbit_line: night.0[1],
            sun: Palette([hex(0xFF, 0xF4, 0xEA), hex(0xFF, 0xED, 0xDB), hex(0xFF, 0xE8, 0xD1), hex(0xFF, 0xE4, 0xC7)]),
            bodies,
            view: ViewConfig::default(),
        }
    }
}

impl Theme {
    /// Palette for `body`, if one is configured
    pub fn palette(&self, body: BodyId) -> Option<&Palette> {
        self.bodies.get(&body)
    }

    /// Reject scales and widths that would collapse or invert the drawing
    pub fn validate(&self) -> Result<(), ThemeError> {
        let fields = [
            ("sun_scale", self.sun_scale),
            ("planet_scale", self.planet_scale),
            ("orbit_line_width", self.orbit_line_width),
            ("view.au_scale", self.view.au_scale),
        ];
        for (field, value) in fields {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ThemeError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a theme from JSON text
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        let theme: Theme = serde_json::from_str(text)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load and validate a theme file; omitted fields keep their defaults
    pub fn load_json(path: &Path) -> Result<Self, ThemeError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize with every field spelled out
    pub fn to_json_pretty(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.validate().is_ok());
        assert_eq!(theme.sun_scale, 40.0);
        assert_eq!(theme.background, "#121214".parse().unwrap());
        assert_eq!(theme.palette(BodyId::Earth).map(Palette::lit), "#3793B2".parse().ok());
        assert_eq!(theme.bodies.len(), 4);
    }

    #[test]
    fn test_json_round_trip_keeps_palettes() {
        let theme = Theme::default();
        let json = theme.to_json_pretty().unwrap();
        assert!(json.contains("\"mars\""));
        assert!(json.contains("#AD6242FF"));
        assert_eq!(Theme::from_json(&json).unwrap(), theme);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let theme = Theme::from_json(r##"{ "planet_scale": 500.0, "background": "#000000" }"##).unwrap();
        assert_eq!(theme.planet_scale, 500.0);
        assert_eq!(theme.background, Color::BLACK);
        assert_eq!(theme.sun_scale, 40.0);
        assert_eq!(theme.view, ViewConfig::default());
    }

    #[test]
    fn test_partial_bodies_merge_onto_defaults() {
        let theme = Theme::from_json(
            r##"{ "bodies": { "earth": ["#FFFFFF", "#CCCCCC", "#999999", "#000000"] } }"##,
        )
        .unwrap();
        let defaults = Theme::default();
        assert_eq!(theme.bodies.len(), 4);
        assert_eq!(theme.palette(BodyId::Earth).map(Palette::lit), Some(Color::WHITE));
        assert_eq!(theme.palette(BodyId::Earth).map(Palette::unlit), Some(Color::BLACK));
        for id in [BodyId::Mercury, BodyId::Venus, BodyId::Mars] {
            assert_eq!(theme.palette(id), defaults.palette(id));
        }
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = Theme::from_json(r##"{ "orbit_line": "#12345" }"##).unwrap_err();
        assert!(matches!(err, ThemeError::Json(_)));
        assert!(err.to_string().contains("invalid length"));
    }

    #[test]
    fn test_non_positive_scale_is_rejected() {
        let err = Theme::from_json(r#"{ "sun_scale": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ThemeError::NonPositive { field: "sun_scale", .. }));
    }
}
