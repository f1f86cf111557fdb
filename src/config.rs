//! Page and background configuration.

use glam::{DVec2, dvec2};
use serde::Deserialize;

use crate::color::Color;
use crate::errors::DiagramError;
use crate::render::defaults;
use crate::types::check_positive;

/// Look of the background grid drawn behind every diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Page fill
    pub background_color: String,
    /// Distance between grid lines, in math units
    pub grid_step: f64,
    pub axis_color: String,
    pub grid_color: String,
    /// Tick label size in pixels
    pub font_size: f64,
    pub font_face: String,
    pub font_color: String,
    /// Gap in pixels between a grid line and its tick label
    pub text_margin: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: "#111".to_string(),
            grid_step: 0.2,
            axis_color: "#323232".to_string(),
            grid_color: "#222".to_string(),
            font_size: 12.0,
            font_face: "Sans".to_string(),
            font_color: "#444".to_string(),
            text_margin: 2.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON object. Missing keys take their defaults, unknown keys
    /// are an error.
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        let config: CanvasConfig = serde_json::from_str(json).map_err(DiagramError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, so a bad config fails before anything is drawn.
    pub fn validate(&self) -> Result<(), DiagramError> {
        for color in [
            &self.background_color,
            &self.axis_color,
            &self.grid_color,
            &self.font_color,
        ] {
            Color::parse(color)?;
        }
        check_positive(self.grid_step)
            .map_err(|e| DiagramError::invalid_config("grid_step", e.to_string()))?;
        check_positive(self.font_size)
            .map_err(|e| DiagramError::invalid_config("font_size", e.to_string()))?;
        if !(self.text_margin.is_finite() && self.text_margin >= 0.0) {
            return Err(DiagramError::invalid_config(
                "text_margin",
                "must be a finite, non-negative number of pixels",
            ));
        }
        Ok(())
    }
}

/// Page geometry of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Page width in pixels
    pub width: f64,
    /// Page height in pixels
    pub height: f64,
    /// Pixels per math unit
    pub scale: f64,
    /// Label font size in pixels
    pub font_size: f64,
    /// Horizontal position of the origin, percent of the width from the left
    pub center_x_pct: f64,
    /// Vertical position of the origin, percent of the height from the bottom
    pub center_y_pct: f64,
    pub canvas: CanvasConfig,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            scale: defaults::SCALE,
            font_size: defaults::FONT_SIZE,
            center_x_pct: 50.0,
            center_y_pct: 50.0,
            canvas: CanvasConfig::default(),
        }
    }
}

impl DiagramConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_center_pct(mut self, x: f64, y: f64) -> Self {
        self.center_x_pct = x;
        self.center_y_pct = y;
        self
    }

    pub fn shape(&self) -> DVec2 {
        dvec2(self.width, self.height)
    }

    /// Device position of the math origin.
    pub fn center(&self) -> DVec2 {
        dvec2(
            self.width * self.center_x_pct / 100.0,
            self.height * (100.0 - self.center_y_pct) / 100.0,
        )
    }

    pub fn validate(&self) -> Result<(), DiagramError> {
        check_positive(self.width)
            .map_err(|e| DiagramError::invalid_config("width", e.to_string()))?;
        check_positive(self.height)
            .map_err(|e| DiagramError::invalid_config("height", e.to_string()))?;
        check_positive(self.scale).map_err(|e| DiagramError::invalid_scale(self.scale, e))?;
        check_positive(self.font_size)
            .map_err(|e| DiagramError::invalid_config("font_size", e.to_string()))?;
        if !(self.center_x_pct.is_finite() && self.center_y_pct.is_finite()) {
            return Err(DiagramError::invalid_config(
                "center_pct",
                "center percentages must be finite",
            ));
        }
        self.canvas.validate()
    }
}
