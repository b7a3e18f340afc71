//! Family color lookup for renderers
//!
//! Loads family_colors.json (embedded at compile time) and maps family labels
//! to RGB. Lookups are keyed by the label string so that a renderer holding
//! only the serialized output can color points; unknown labels get the
//! default color instead of failing.

use super::classifier::Family;
use super::error::{PrimeError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Embedded family_colors.json content
const FAMILY_COLORS_JSON: &str = include_str!("../../family_colors.json");

/// Fallback when a hex string in the table is malformed
const GRAY: [u8; 3] = [128, 128, 128];

#[derive(Debug, Deserialize)]
struct ColorTableJson {
    background: String,
    default: String,
    families: HashMap<String, String>,
}

/// Label → RGB mapping with a default for unknown labels
#[derive(Debug, Clone)]
pub struct FamilyColors {
    mappings: HashMap<String, [u8; 3]>,
    pub default_color: [u8; 3],
    pub background: [u8; 3],
}

impl FamilyColors {
    /// Parse a color table from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let table: ColorTableJson = serde_json::from_str(json)
            .map_err(|e| PrimeError::Config(format!("Failed to parse family colors: {}", e)))?;

        let mappings: HashMap<String, [u8; 3]> = table
            .families
            .iter()
            .map(|(label, hex)| {
                if Family::from_label(label).is_none() {
                    warn!("Color table entry '{}' is not a known family", label);
                }
                (label.clone(), parse_hex_color(hex).unwrap_or(GRAY))
            })
            .collect();

        debug!("Loaded {} family colors", mappings.len());

        Ok(Self {
            mappings,
            default_color: parse_hex_color(&table.default).unwrap_or(GRAY),
            background: parse_hex_color(&table.background).unwrap_or([255, 255, 255]),
        })
    }

    /// Color for a label, or the default color if the label is unknown
    pub fn color_for(&self, label: &str) -> [u8; 3] {
        self.mappings
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn color_for_family(&self, family: Family) -> [u8; 3] {
        self.color_for(family.as_str())
    }

    /// Legend entries in classification priority order
    pub fn legend(&self) -> Vec<(Family, [u8; 3])> {
        Family::ALL
            .iter()
            .map(|&f| (f, self.color_for_family(f)))
            .collect()
    }
}

/// Built-in color table, parsed once
pub fn default_colors() -> &'static FamilyColors {
    static COLORS: OnceLock<FamilyColors> = OnceLock::new();
    COLORS.get_or_init(|| {
        FamilyColors::from_json(FAMILY_COLORS_JSON).unwrap_or_else(|e| {
            warn!("Falling back to empty color table: {}", e);
            FamilyColors {
                mappings: HashMap::new(),
                default_color: [0, 0, 0],
                background: [255, 255, 255],
            }
        })
    })
}

/// Parse `#RRGGBB` / `RRGGBB` (an 8-digit form's alpha byte is ignored)
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        warn!("Invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("00FF00"), Some([0, 255, 0]));
        assert_eq!(parse_hex_color("#1F77B4FF"), Some([31, 119, 180]));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn test_default_table_covers_every_family() {
        let colors = default_colors();
        for family in Family::ALL {
            assert!(
                colors.mappings.contains_key(family.as_str()),
                "no color for {}",
                family
            );
        }
        assert_eq!(colors.color_for("twin_prime"), [255, 0, 0]);
        assert_eq!(colors.color_for_family(Family::Mersenne), [0, 255, 0]);
        assert_eq!(colors.background, [255, 255, 255]);
    }

    #[test]
    fn test_unknown_label_uses_default() {
        let colors = FamilyColors::from_json(
            r##"{"background": "#FFFFFF", "default": "#101010", "families": {"twin_prime": "#FF0000"}}"##,
        )
        .unwrap();
        assert_eq!(colors.color_for("not_a_family"), [16, 16, 16]);
        assert_eq!(colors.color_for_family(Family::Cuban), [16, 16, 16]);
    }

    #[test]
    fn test_legend_order() {
        let legend = default_colors().legend();
        assert_eq!(legend.len(), 15);
        assert_eq!(legend[0].0, Family::Mersenne);
        assert_eq!(legend[14].0, Family::Regular);
    }

    #[test]
    fn test_malformed_table() {
        assert!(matches!(
            FamilyColors::from_json("{not json"),
            Err(PrimeError::Config(_))
        ));
    }
}
