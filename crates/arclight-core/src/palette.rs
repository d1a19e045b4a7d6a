use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Color used for cell values the palette does not map.
pub const FALLBACK_COLOR: &str = "black";

/// Maps cell values to CSS color strings.
///
/// The conventional encoding reserves value 0 for the background color, but
/// nothing here enforces that; a palette is just a lookup table. Values with
/// no mapping resolve to [`FALLBACK_COLOR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: IndexMap<u8, String>,
}

impl Default for Palette {
    /// The ten conventional cell colors.
    fn default() -> Self {
        let colors = [
            (0, "black"),
            (1, "blue"),
            (2, "red"),
            (3, "green"),
            (4, "yellow"),
            (5, "gray"),
            (6, "magenta"),
            (7, "orange"),
            (8, "skyblue"),
            (9, "brown"),
        ];
        Self {
            colors: colors
                .into_iter()
                .map(|(value, color)| (value, color.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    pub fn new(colors: IndexMap<u8, String>) -> Self {
        Self { colors }
    }

    /// The default palette with `overrides` layered on top.
    ///
    /// Override entries win; values they do not name keep their defaults.
    pub fn with_overrides(overrides: &IndexMap<u8, String>) -> Self {
        let mut palette = Self::default();
        for (value, color) in overrides {
            palette.colors.insert(*value, color.clone());
        }
        palette
    }

    pub fn contains(&self, value: u8) -> bool {
        self.colors.contains_key(&value)
    }

    /// Resolves a cell value to its CSS color, falling back for unmapped values.
    pub fn color_for(&self, value: u8) -> &str {
        self.colors
            .get(&value)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maps_the_ten_conventional_values() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color_for(0), "black");
        assert_eq!(palette.color_for(8), "skyblue");
    }

    #[test]
    fn unmapped_values_fall_back() {
        let palette = Palette::default();
        assert!(!palette.contains(12));
        assert_eq!(palette.color_for(12), FALLBACK_COLOR);
    }

    #[test]
    fn overrides_win_without_clearing_defaults() {
        let mut overrides = IndexMap::new();
        overrides.insert(5u8, "silver".to_string());
        let palette = Palette::with_overrides(&overrides);
        assert_eq!(palette.color_for(5), "silver");
        assert_eq!(palette.color_for(1), "blue");
    }
}
