use serde::{Deserialize, Serialize};

use crate::api::tooltip::{TooltipFormatter, format_tooltip};
use crate::error::{TreemapError, TreemapResult};
use crate::render::Color;

/// Style applied to node labels drawn by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_size_px: f64,
    /// Whether leaf labels include the word count next to the name.
    pub show_counts: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            show_counts: true,
        }
    }
}

/// Display options handed to the chart backend at creation time.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format. The tooltip formatter is
/// a plain function and is excluded from serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default = "default_interaction_flag")]
    pub zoom_enabled: bool,
    #[serde(default = "default_interaction_flag")]
    pub breadcrumbs_enabled: bool,
    #[serde(default)]
    pub label_style: LabelStyle,
    /// Localization key resolved into the chrome title text.
    #[serde(default = "default_title_key")]
    pub title_key: String,
    #[serde(skip, default = "default_tooltip_formatter")]
    pub tooltip_formatter: TooltipFormatter,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            zoom_enabled: default_interaction_flag(),
            breadcrumbs_enabled: default_interaction_flag(),
            label_style: LabelStyle::default(),
            title_key: default_title_key(),
            tooltip_formatter: default_tooltip_formatter(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the categorical color palette cycled across country nodes.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Enables or disables drill-down zoom.
    #[must_use]
    pub fn with_zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    /// Enables or disables breadcrumb navigation.
    #[must_use]
    pub fn with_breadcrumbs_enabled(mut self, enabled: bool) -> Self {
        self.breadcrumbs_enabled = enabled;
        self
    }

    /// Sets the node label style.
    #[must_use]
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Sets the localization key used for the chrome title.
    #[must_use]
    pub fn with_title_key(mut self, key: impl Into<String>) -> Self {
        self.title_key = key.into();
        self
    }

    /// Replaces the tooltip content formatter.
    #[must_use]
    pub fn with_tooltip_formatter(mut self, formatter: TooltipFormatter) -> Self {
        self.tooltip_formatter = formatter;
        self
    }

    pub fn validate(&self) -> TreemapResult<()> {
        if self.palette.is_empty() {
            return Err(TreemapError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.palette {
            color.validate()?;
        }
        if !self.label_style.font_size_px.is_finite() || self.label_style.font_size_px <= 0.0 {
            return Err(TreemapError::InvalidData(
                "label font size must be finite and positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes options to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> TreemapResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TreemapError::InvalidData(format!("failed to serialize options: {e}")))
    }

    /// Deserializes options from JSON.
    pub fn from_json_str(input: &str) -> TreemapResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TreemapError::InvalidData(format!("failed to parse options: {e}")))
    }
}

/// Partial visual-option update merged into live options without a redraw.
///
/// Dimensional changes never travel through a patch; they go through the
/// chart service's `resize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionsPatch {
    #[serde(default)]
    pub palette: Option<Vec<Color>>,
    #[serde(default)]
    pub zoom_enabled: Option<bool>,
    #[serde(default)]
    pub breadcrumbs_enabled: Option<bool>,
    #[serde(default)]
    pub label_style: Option<LabelStyle>,
}

impl ChartOptionsPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_zoom_enabled(mut self, enabled: bool) -> Self {
        self.zoom_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_breadcrumbs_enabled(mut self, enabled: bool) -> Self {
        self.breadcrumbs_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = Some(style);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palette.is_none()
            && self.zoom_enabled.is_none()
            && self.breadcrumbs_enabled.is_none()
            && self.label_style.is_none()
    }

    pub fn validate(&self) -> TreemapResult<()> {
        if let Some(palette) = &self.palette {
            if palette.is_empty() {
                return Err(TreemapError::InvalidData(
                    "palette must contain at least one color".to_owned(),
                ));
            }
            for color in palette {
                color.validate()?;
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, options: &mut ChartOptions) {
        if let Some(palette) = &self.palette {
            options.palette = palette.clone();
        }
        if let Some(enabled) = self.zoom_enabled {
            options.zoom_enabled = enabled;
        }
        if let Some(enabled) = self.breadcrumbs_enabled {
            options.breadcrumbs_enabled = enabled;
        }
        if let Some(style) = self.label_style {
            options.label_style = style;
        }
    }
}

fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0.21, 0.49, 0.74),
        Color::rgb(0.89, 0.47, 0.16),
        Color::rgb(0.30, 0.63, 0.31),
        Color::rgb(0.78, 0.24, 0.23),
        Color::rgb(0.55, 0.41, 0.70),
        Color::rgb(0.52, 0.37, 0.33),
        Color::rgb(0.86, 0.55, 0.73),
        Color::rgb(0.47, 0.47, 0.47),
    ]
}

fn default_interaction_flag() -> bool {
    true
}

fn default_title_key() -> String {
    "chart.title".to_owned()
}

fn default_tooltip_formatter() -> TooltipFormatter {
    format_tooltip
}

#[cfg(test)]
mod tests {
    use super::{ChartOptions, ChartOptionsPatch, LabelStyle};
    use crate::render::Color;

    #[test]
    fn validate_rejects_empty_palette() {
        let options = ChartOptions::new().with_palette(Vec::new());
        assert!(options.validate().is_err());
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut options = ChartOptions::new().with_zoom_enabled(true);
        let patch = ChartOptionsPatch::new()
            .with_zoom_enabled(false)
            .with_label_style(LabelStyle {
                font_size_px: 14.0,
                show_counts: false,
            });

        patch.apply_to(&mut options);
        assert!(!options.zoom_enabled);
        assert!(options.breadcrumbs_enabled);
        assert_eq!(options.label_style.font_size_px, 14.0);
    }

    #[test]
    fn patch_validate_rejects_bad_palette() {
        let patch = ChartOptionsPatch::new().with_palette(vec![Color::rgb(2.0, 0.0, 0.0)]);
        assert!(patch.validate().is_err());
    }
}
