//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use chrono::NaiveDate;
use spacegraph_common::{Result, SpaceGraphError};
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_nasa(config)?;
        Self::validate_queries(config)?;
        Self::validate_rover(config)?;
        Self::validate_output(config)?;
        Self::validate_styling(config)
    }

    fn validate_nasa(config: &Config) -> Result<()> {
        let nasa = &config.nasa;
        if nasa.api_key.trim().is_empty() {
            return Err(SpaceGraphError::validation_field(
                "NASA API key cannot be empty",
                "nasa.api_key",
            ));
        }

        let url = Url::parse(&nasa.base_url).map_err(|e| {
            SpaceGraphError::validation_field(format!("invalid base URL: {e}"), "nasa.base_url")
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SpaceGraphError::validation_field(
                "base URL must use http or https",
                "nasa.base_url",
            ));
        }

        if nasa.timeout_secs == 0 {
            return Err(SpaceGraphError::validation_field(
                "timeout must be at least one second",
                "nasa.timeout_secs",
            ));
        }

        if nasa.rover.trim().is_empty() || !nasa.rover.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SpaceGraphError::validation_field(
                format!("invalid rover name {:?}", nasa.rover),
                "nasa.rover",
            ));
        }

        Ok(())
    }

    fn validate_queries(config: &Config) -> Result<()> {
        // Intervals are ordered on deserialization; only the count is left to check.
        if config.queries.intervals.is_empty() {
            return Err(SpaceGraphError::validation_field(
                "at least one date interval is required",
                "queries.intervals",
            ));
        }
        Ok(())
    }

    fn validate_rover(config: &Config) -> Result<()> {
        let rover = &config.rover;
        // 2024 is a leap year, so Feb 29 passes here and is rejected per year at fetch time.
        if NaiveDate::from_ymd_opt(2024, rover.month, rover.day).is_none() {
            return Err(SpaceGraphError::validation_field(
                format!("{:02}-{:02} is not a calendar day", rover.month, rover.day),
                "rover",
            ));
        }
        if rover.years.is_empty() {
            return Err(SpaceGraphError::validation_field(
                "at least one rover year is required",
                "rover.years",
            ));
        }
        Ok(())
    }

    fn validate_output(config: &Config) -> Result<()> {
        let output = &config.output;
        if output.width == 0 || output.height == 0 {
            return Err(SpaceGraphError::validation_field(
                format!("chart size {}x{} must be non-zero", output.width, output.height),
                "output",
            ));
        }
        if output.directory.as_os_str().is_empty() {
            return Err(SpaceGraphError::validation_field(
                "output directory cannot be empty",
                "output.directory",
            ));
        }
        Ok(())
    }

    fn validate_styling(config: &Config) -> Result<()> {
        let styling = &config.styling;
        let named = [
            ("styling.background", &styling.background),
            ("styling.hazardous", &styling.hazardous),
            ("styling.non_hazardous", &styling.non_hazardous),
        ];
        for (field, color) in named {
            Self::validate_color(field, color)?;
        }

        if styling.palette.is_empty() {
            return Err(SpaceGraphError::validation_field(
                "palette needs at least one color",
                "styling.palette",
            ));
        }
        for color in &styling.palette {
            Self::validate_color("styling.palette", color)?;
        }

        if styling.title_font_size == 0 {
            return Err(SpaceGraphError::validation_field(
                "title font size must be positive",
                "styling.title_font_size",
            ));
        }
        Ok(())
    }

    fn validate_color(field: &str, color: &str) -> Result<()> {
        let valid = color
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if valid {
            Ok(())
        } else {
            Err(SpaceGraphError::validation_field(
                format!("{color:?} is not a #rrggbb color"),
                field,
            ))
        }
    }
}
