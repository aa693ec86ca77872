use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ExtractError, Result};
use crate::core::model::SourceKind;

/// Minimum shape a table must have after empty rows are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeLimits {
    pub min_rows: usize,
    pub min_cols: usize,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_cols: 2,
        }
    }
}

/// Weights of the confidence score for one document format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    pub base: f64,
    pub column_consistency_bonus: f64,
    pub fill_rate_weight: f64,
}

impl SourceProfile {
    pub const PDF: Self = Self {
        base: 0.5,
        column_consistency_bonus: 0.3,
        fill_rate_weight: 0.2,
    };

    /// Native DOCX tables get a higher base than visually inferred PDF ones.
    pub const DOCX: Self = Self {
        base: 0.6,
        column_consistency_bonus: 0.3,
        fill_rate_weight: 0.1,
    };

    fn validate(&self, name: &str) -> Result<()> {
        let terms = [
            ("base", self.base),
            ("column_consistency_bonus", self.column_consistency_bonus),
            ("fill_rate_weight", self.fill_rate_weight),
        ];
        for (field, value) in terms {
            if !value.is_finite() || value < 0.0 {
                return Err(ExtractError::InvalidConfig(format!(
                    "profiles.{name}.{field} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceProfiles {
    pub pdf: SourceProfile,
    pub docx: SourceProfile,
}

impl Default for SourceProfiles {
    fn default() -> Self {
        Self {
            pdf: SourceProfile::PDF,
            docx: SourceProfile::DOCX,
        }
    }
}

/// Tunable thresholds of the header, confidence and location heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Share of non-numeric cells the first row needs to count as a header.
    pub header_ratio: f64,
    /// DOCX tables grouped into one estimated section once a document has
    /// more tables than this.
    pub section_bucket_size: usize,
    pub profiles: SourceProfiles,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            header_ratio: 0.6,
            section_bucket_size: 5,
            profiles: SourceProfiles::default(),
        }
    }
}

impl HeuristicConfig {
    /// Reads a JSON file; keys left out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data).map_err(|err| {
            ExtractError::InvalidConfig(format!("{}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.header_ratio) {
            return Err(ExtractError::InvalidConfig(format!(
                "header_ratio must lie in [0, 1], got {}",
                self.header_ratio
            )));
        }
        if self.section_bucket_size == 0 {
            return Err(ExtractError::InvalidConfig(
                "section_bucket_size must be at least 1".to_string(),
            ));
        }
        self.profiles.pdf.validate("pdf")?;
        self.profiles.docx.validate("docx")
    }

    pub fn profile(&self, kind: SourceKind) -> SourceProfile {
        match kind {
            SourceKind::Pdf => self.profiles.pdf,
            SourceKind::Docx => self.profiles.docx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: HeuristicConfig =
            serde_json::from_str(r#"{ "header_ratio": 0.5, "profiles": { "pdf": { "base": 0.4, "column_consistency_bonus": 0.3, "fill_rate_weight": 0.3 } } }"#)
                .unwrap();

        assert_eq!(config.header_ratio, 0.5);
        assert_eq!(config.section_bucket_size, 5);
        assert_eq!(config.profiles.pdf.base, 0.4);
        assert_eq!(config.profiles.docx, SourceProfile::DOCX);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = HeuristicConfig {
            header_ratio: 1.5,
            ..HeuristicConfig::default()
        };
        assert!(config.validate().is_err());

        let config = HeuristicConfig {
            section_bucket_size: 0,
            ..HeuristicConfig::default()
        };
        assert!(config.validate().is_err());

        let mut config = HeuristicConfig::default();
        config.profiles.docx.fill_rate_weight = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn selects_profile_by_source() {
        let config = HeuristicConfig::default();
        assert_eq!(config.profile(SourceKind::Pdf), SourceProfile::PDF);
        assert_eq!(config.profile(SourceKind::Docx), SourceProfile::DOCX);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heuristics.json");
        fs::write(&path, r#"{ "section_bucket_size": 3 }"#).unwrap();

        let config = HeuristicConfig::load(&path).unwrap();
        assert_eq!(config.section_bucket_size, 3);
        assert_eq!(config.header_ratio, 0.6);
    }
}
