//! Fit-content configuration.

use serde::Deserialize;

/// Tunables for the fit-content pipeline.
///
/// Deserializes from partial JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Idle surfaces retained per host.
    pub pool_capacity: usize,
    /// Zero flex-grow on corrected nodes so the flex engine keeps their size.
    pub reset_flex_grow: bool,
    /// Marker used by `FitConfig::highlight_rule`.
    pub highlight_marker: String,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 4,
            reset_flex_grow: true,
            highlight_marker: "#".to_string(),
        }
    }
}

impl FitConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn highlight_rule(&self) -> crate::content::HighlightRule {
        crate::content::HighlightRule::with_marker(&self.highlight_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FitConfig::from_json(r#"{ "pool_capacity": 1 }"#).unwrap();
        assert_eq!(config.pool_capacity, 1);
        assert!(config.reset_flex_grow);
        assert_eq!(config.highlight_marker, "#");
    }

    #[test]
    fn test_highlight_rule_uses_marker() {
        let config = FitConfig {
            highlight_marker: "*".to_string(),
            ..FitConfig::default()
        };
        let styled = config.highlight_rule().apply("a *b*").unwrap();
        assert_eq!(styled.as_str(), "a b");
    }
}
