//! Heuristic thresholds for outline extraction.

use crate::error::{Error, Result};

/// Tunable policy constants of the heading heuristics.
///
/// Defaults reproduce the reference behavior; every field is independent so a
/// single threshold can be adjusted and tested on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineConfig {
    /// Blocks with more lines than this are never headings
    pub max_heading_lines: usize,

    /// Numbered headings that are not bold may span at most this many lines
    pub max_numbered_lines: usize,

    /// Longest heading or title part, in characters
    pub max_text_len: usize,

    /// Multi-line blocks whose lines are all this short are treated as noise
    pub short_line_len: usize,

    /// Font-size tolerance for title merging (strict `<` comparison)
    pub size_tolerance: f32,

    /// How many distinct font sizes are mapped to levels (1..=3)
    pub tier_count: usize,
}

impl OutlineConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading line count.
    pub fn with_max_heading_lines(mut self, lines: usize) -> Self {
        self.max_heading_lines = lines;
        self
    }

    /// Set the maximum line count for non-bold numbered headings.
    pub fn with_max_numbered_lines(mut self, lines: usize) -> Self {
        self.max_numbered_lines = lines;
        self
    }

    /// Set the maximum heading text length.
    pub fn with_max_text_len(mut self, len: usize) -> Self {
        self.max_text_len = len;
        self
    }

    /// Set the short-line noise length.
    pub fn with_short_line_len(mut self, len: usize) -> Self {
        self.short_line_len = len;
        self
    }

    /// Set the title-merge font-size tolerance.
    pub fn with_size_tolerance(mut self, tolerance: f32) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Set the number of font-size tiers.
    ///
    /// [`validate`](Self::validate) rejects values outside 1..=3.
    pub fn with_tier_count(mut self, tiers: usize) -> Self {
        self.tier_count = tiers;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.size_tolerance.is_finite() || self.size_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "size_tolerance must be a finite non-negative number, got {}",
                self.size_tolerance
            )));
        }
        if self.max_heading_lines == 0 {
            return Err(Error::InvalidConfig(
                "max_heading_lines must be at least 1".to_string(),
            ));
        }
        if self.max_numbered_lines == 0 {
            return Err(Error::InvalidConfig(
                "max_numbered_lines must be at least 1".to_string(),
            ));
        }
        if self.max_text_len == 0 {
            return Err(Error::InvalidConfig(
                "max_text_len must be at least 1".to_string(),
            ));
        }
        if !(1..=3).contains(&self.tier_count) {
            return Err(Error::InvalidConfig(format!(
                "tier_count must be between 1 and 3, got {}",
                self.tier_count
            )));
        }
        Ok(())
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_heading_lines: 3,
            max_numbered_lines: 2,
            max_text_len: 300,
            short_line_len: 15,
            size_tolerance: 0.5,
            tier_count: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutlineConfig::default();
        assert_eq!(config.max_heading_lines, 3);
        assert_eq!(config.max_numbered_lines, 2);
        assert_eq!(config.max_text_len, 300);
        assert_eq!(config.short_line_len, 15);
        assert_eq!(config.size_tolerance, 0.5);
        assert_eq!(config.tier_count, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = OutlineConfig::new()
            .with_max_heading_lines(4)
            .with_short_line_len(10)
            .with_size_tolerance(1.0)
            .with_tier_count(2);

        assert_eq!(config.max_heading_lines, 4);
        assert_eq!(config.short_line_len, 10);
        assert_eq!(config.size_tolerance, 1.0);
        assert_eq!(config.tier_count, 2);
    }

    #[test]
    fn test_validate_rejects_tier_count_out_of_range() {
        for tiers in [0, 4, 9] {
            let config = OutlineConfig::new().with_tier_count(tiers);
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
        assert!(OutlineConfig::new().with_tier_count(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        let config = OutlineConfig::new().with_size_tolerance(f32::NAN);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = OutlineConfig::new().with_size_tolerance(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        assert!(OutlineConfig::new()
            .with_max_heading_lines(0)
            .validate()
            .is_err());
        assert!(OutlineConfig::new()
            .with_max_numbered_lines(0)
            .validate()
            .is_err());
        assert!(OutlineConfig::new().with_max_text_len(0).validate().is_err());
    }
}
