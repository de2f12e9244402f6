//! Named chart colors
//!
//! Loads color names from palettes.json (embedded at compile time) so chart
//! colors can be chosen by name in report properties. Names match the CSS/X11
//! color names the charts were originally styled with.

use once_cell::sync::Lazy;
use plotters::style::RGBColor;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Color used when a name is unknown
pub const FALLBACK_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Global color registry, initialized lazily on first access
pub static COLOR_REGISTRY: Lazy<ColorRegistry> = Lazy::new(|| {
    ColorRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        tracing::error!("failed to load palettes.json: {}", e);
        ColorRegistry::default()
    })
});

#[derive(Debug, Clone, Deserialize)]
struct NamedColor {
    name: String,
    color: String,
}

/// Registry of named colors (lowercase keys for case-insensitive lookup)
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    colors: HashMap<String, RGBColor>,
}

impl ColorRegistry {
    /// Load colors from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<NamedColor> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut colors = HashMap::new();
        for def in definitions {
            let [r, g, b] = parse_hex_color(&def.color)
                .ok_or_else(|| format!("Invalid color '{}' for '{}'", def.color, def.name))?;
            colors.insert(def.name.to_lowercase(), RGBColor(r, g, b));
        }

        tracing::debug!(count = colors.len(), "loaded named colors");
        Ok(Self { colors })
    }

    /// Get a color by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<RGBColor> {
        self.colors.get(&name.to_lowercase()).copied()
    }
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and both without `#`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}

/// Resolve a color by name or hex code
///
/// Unknown names fall back to gray with a warning.
pub fn resolve_color(name: &str) -> RGBColor {
    if let Some(color) = COLOR_REGISTRY.get(name) {
        return color;
    }
    if let Some([r, g, b]) = parse_hex_color(name) {
        return RGBColor(r, g, b);
    }
    tracing::warn!(color = name, "unknown color, using gray");
    FALLBACK_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("4682B4"), Some([70, 130, 180]));
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));

        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn test_registry_loads() {
        let registry = &*COLOR_REGISTRY;
        assert_eq!(registry.get("steelblue"), Some(RGBColor(70, 130, 180)));
        assert_eq!(registry.get("Crimson"), Some(RGBColor(220, 20, 60)));
        assert_eq!(registry.get("navy"), Some(RGBColor(0, 0, 128)));
    }

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("green"), RGBColor(0, 128, 0));
        assert_eq!(resolve_color("#102030"), RGBColor(16, 32, 48));
        assert_eq!(resolve_color("no-such-color"), FALLBACK_COLOR);
    }
}
