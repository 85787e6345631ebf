//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the regan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReganConfig {
    /// Report vocabulary used by the rule engine.
    pub vocabulary: ReportVocabulary,

    /// Generative backend configuration.
    pub genai: GenAiConfig,
}

/// Labels and phrases the rule engine matches against.
///
/// The defaults describe the "Arrivals Detailed" report family.
/// Deployments against a differently-worded report can swap the
/// vocabulary without touching the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportVocabulary {
    /// Header that opens every reservation block.
    pub anchor_label: String,

    /// Preferred guest-name label.
    pub primary_guest_label: String,

    /// Fallback guest-name label.
    pub guest_name_label: String,

    /// Previous-stay counter label.
    pub stays_label: String,

    /// Fixed-charge line variants that mark a returning guest.
    pub fixed_charge_variants: Vec<String>,

    /// Phrases that introduce the charge amount.
    pub charge_amount_prefixes: Vec<String>,

    /// Accompanying-guest label, matched with an optional "(s)" or "s"
    /// suffix.
    pub accompanying_label: String,

    /// Description reported when a charge line matched but captured no
    /// text.
    pub default_charge_description: String,
}

impl Default for ReportVocabulary {
    fn default() -> Self {
        Self {
            anchor_label: "Confirmation Number".to_string(),
            primary_guest_label: "Primary Guest".to_string(),
            guest_name_label: "Guest Name".to_string(),
            stays_label: "Number of stays".to_string(),
            fixed_charge_variants: vec![
                "Return Guest Credit".to_string(),
                "Returning Guest Credit".to_string(),
                "Return Guest Thank".to_string(),
            ],
            charge_amount_prefixes: vec![
                "Return Guest".to_string(),
                "Returning Guest".to_string(),
            ],
            accompanying_label: "Accompanying Guest".to_string(),
            default_charge_description: "Return Guest Credit".to_string(),
        }
    }
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// Model identifier.
    pub model: String,

    /// API endpoint base.
    pub endpoint: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl ReganConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocab = ReportVocabulary::default();
        assert_eq!(vocab.anchor_label, "Confirmation Number");
        assert_eq!(vocab.fixed_charge_variants.len(), 3);
        assert_eq!(vocab.default_charge_description, "Return Guest Credit");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ReganConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ReganConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.vocabulary.stays_label, config.vocabulary.stays_label);
        assert_eq!(parsed.genai.model, config.genai.model);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: ReganConfig =
            serde_json::from_str(r#"{"vocabulary": {"anchor_label": "Booking Ref"}}"#).unwrap();
        assert_eq!(parsed.vocabulary.anchor_label, "Booking Ref");
        // Unspecified fields fall back to the defaults.
        assert_eq!(parsed.vocabulary.primary_guest_label, "Primary Guest");
        assert_eq!(parsed.genai.model, "gemini-2.5-flash");
    }
}
