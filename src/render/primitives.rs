use serde::{Deserialize, Serialize};

use crate::error::{TreemapError, TreemapResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializable so palettes round-trip through persisted chart options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> TreemapResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TreemapError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn validate_rejects_out_of_range_channels() {
        assert!(Color::rgb(0.2, 0.4, 0.6).validate().is_ok());
        assert!(Color::rgb(1.2, 0.0, 0.0).validate().is_err());
        assert!(Color::rgba(0.0, 0.0, 0.0, f64::NAN).validate().is_err());
    }
}
