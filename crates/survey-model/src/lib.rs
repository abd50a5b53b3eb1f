pub mod construct;
pub mod error;
pub mod issue;
pub mod profile;

pub use construct::{ConditionSpec, Construct, ScaleBounds, ScoringConfig};
pub use error::{Result, ScoreError};
pub use issue::{IssueSeverity, ValidationIssue, ValidationReport};
pub use profile::{ColumnProfile, ConstructSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let report = ValidationReport {
            dataset: "survey".to_string(),
            issues: vec![
                ValidationIssue {
                    category: "Missing Column".to_string(),
                    message: "column item9 not found".to_string(),
                    severity: IssueSeverity::Error,
                    column: Some("item9".to_string()),
                    count: None,
                },
                ValidationIssue {
                    category: "Out Of Range".to_string(),
                    message: "item3 has 2 value(s) outside 1-6".to_string(),
                    severity: IssueSeverity::Warning,
                    column: Some("item3".to_string()),
                    count: Some(2),
                },
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn config_round_trips_through_json() {
        let json = r#"{
            "constructs": [
                {"name": "informational", "items": ["item2", "item3", "item4", "item5"]},
                {"name": "emotional", "items": ["item11"]}
            ],
            "impute": ["item2"],
            "condition": {"column": "vignette", "levels": ["control", "internal", "external"]},
            "scale_bounds": {"min": 1.0, "max": 6.0}
        }"#;
        let config: ScoringConfig = serde_json::from_str(json).expect("parse config");
        assert!(config.check().is_ok());
        assert_eq!(config.constructs.len(), 2);
        assert_eq!(config.constructs[1].items, vec!["item11"]);
        let round = serde_json::to_string(&config).expect("serialize config");
        let back: ScoringConfig = serde_json::from_str(&round).expect("reparse config");
        assert_eq!(back.constructs, config.constructs);
    }
}
