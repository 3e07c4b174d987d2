//! Analysis settings.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Tunables for position queries and outlines.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Columns a node's start may be moved back when matching the cursor.
    pub position_leeway: u32,
    /// Show scalar values as the detail of outline symbols.
    pub scalar_symbol_detail: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            position_leeway: 1,
            scalar_symbol_detail: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = AnalysisConfig::from_json(r#"{ "positionLeeway": 3 }"#).unwrap();
        assert_eq!(config.position_leeway, 3);
        assert!(config.scalar_symbol_detail);

        assert_eq!(AnalysisConfig::from_json("{}").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AnalysisConfig::from_json("{ positionLeeway: }").is_err());
    }
}
