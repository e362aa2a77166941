//! Normal / Abnormal / Boundary classification.
//!
//! Rules are applied in a fixed order, later rules overriding earlier ones:
//! 1. boundary keyword → Boundary
//! 2. `null` literal or abnormal keyword → Abnormal
//! 3. exception keyword → exception triggered; Normal is upgraded to Abnormal

use super::patterns::NULL_TOKEN;
use crate::config::ExtractionConfig;
use crate::core::Classification;

/// Outcome of the keyword rules for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationSignals {
    pub classification: Classification,
    pub exception_triggered: bool,
}

pub fn classify_body(body: &str, config: &ExtractionConfig) -> ClassificationSignals {
    let lowered = body.to_lowercase();

    let mut classification = Classification::Normal;
    if contains_any(&lowered, &config.boundary_keywords) {
        classification = Classification::Boundary;
    }
    if NULL_TOKEN.is_match(body) || contains_any(&lowered, &config.abnormal_keywords) {
        classification = Classification::Abnormal;
    }

    let exception_triggered = contains_any(&lowered, &config.exception_keywords);
    if exception_triggered && classification == Classification::Normal {
        classification = Classification::Abnormal;
    }

    ClassificationSignals {
        classification,
        exception_triggered,
    }
}

fn contains_any(lowered: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| lowered.contains(&k.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(body: &str) -> ClassificationSignals {
        classify_body(body, &ExtractionConfig::default())
    }

    #[test]
    fn test_default_is_normal() {
        let signals = classify("request.setAmount(100); assertThat(result).isNotNull();");
        assert_eq!(signals.classification, Classification::Normal);
        assert!(!signals.exception_triggered);
    }

    #[test]
    fn test_boundary_keywords() {
        assert_eq!(
            classify("request.setItems(List.of()); assertThat(list).isEmpty();").classification,
            Classification::Boundary
        );
        assert_eq!(
            classify("request.setAmount(BigDecimal.ZERO);").classification,
            Classification::Boundary
        );
    }

    #[test]
    fn test_abnormal_overrides_boundary() {
        let signals = classify("request.setName(\"\"); request.setEmail(null); // empty name");
        assert_eq!(signals.classification, Classification::Abnormal);
    }

    #[test]
    fn test_invalid_keyword_is_abnormal() {
        assert_eq!(
            classify("request.setEmail(\"INVALID-email\");").classification,
            Classification::Abnormal
        );
    }

    #[test]
    fn test_not_found_message_is_abnormal() {
        let signals = classify(
            "assertThat(service.find(id)).hasMessage(\"User not found\");",
        );
        assert_eq!(signals.classification, Classification::Abnormal);
        assert!(!signals.exception_triggered);
    }

    #[test]
    fn test_exception_upgrades_normal() {
        let signals = classify("assertThatThrownBy(() -> service.run());");
        assert!(signals.exception_triggered);
        assert_eq!(signals.classification, Classification::Abnormal);
    }

    #[test]
    fn test_exception_keeps_boundary() {
        let signals = classify("request.setQty(0); // zero quantity\nassertThrows(X.class, run);");
        assert!(signals.exception_triggered);
        assert_eq!(signals.classification, Classification::Boundary);
    }

    #[test]
    fn test_custom_keywords() {
        let config = ExtractionConfig {
            boundary_keywords: vec!["MAX_VALUE".into()],
            ..ExtractionConfig::default()
        };
        let signals = classify_body("request.setCount(Integer.MAX_VALUE);", &config);
        assert_eq!(signals.classification, Classification::Boundary);
    }
}
