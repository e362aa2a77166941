//! Condition Extractor.
//!
//! Mines one test body for preconditions, input values, expected returns,
//! exception metadata, a log marker and a Normal/Abnormal/Boundary
//! classification. Extraction is a rule engine over substrings, not a
//! parser: unusual code styles may be under- or over-matched, and any rule
//! that does not match simply leaves its field empty.
//!
//! ## Rule order
//!
//! 1. Classification keywords (see [`classification`])
//! 2. Setter calls on request-like carriers (see [`inputs`])
//! 3. Literal arguments of `<x>Service` calls (see [`calls`])
//! 4. Assertions and stubbed producers (see [`returns`]), then exception
//!    message assertions
//! 5. Thrown type, only when the exception signal fired (see [`exceptions`])
//! 6. `Status <digits>` log marker

pub mod calls;
pub mod classification;
pub mod exceptions;
pub mod inputs;
pub mod literals;
pub mod patterns;
pub mod returns;

use crate::config::ExtractionConfig;
use crate::core::{ExceptionInfo, TestConditions, TestUnit};

pub use classification::{classify_body, ClassificationSignals};
pub use literals::classify_literal;

/// Extracts [`TestConditions`] from test bodies.
#[derive(Debug, Clone, Default)]
pub struct ConditionExtractor {
    config: ExtractionConfig,
}

impl ConditionExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract(&self, unit: &TestUnit) -> TestConditions {
        self.extract_body(&unit.body)
    }

    /// Extract conditions from raw body text. Never fails.
    pub fn extract_body(&self, body: &str) -> TestConditions {
        let signals = classify_body(body, &self.config);

        let mut conditions = TestConditions::fallback(&self.config.preconditions);
        conditions.classification = signals.classification;
        conditions.inputs = inputs::mine_inputs(body, &self.config);
        calls::mine_service_arguments(body, &self.config, &mut conditions.inputs);
        for value in returns::mine_expected_returns(body)
            .into_iter()
            .chain(calls::mine_expected_messages(body))
        {
            conditions.push_expected(value);
        }
        if signals.exception_triggered {
            conditions.exception = Some(ExceptionInfo {
                exception_type: exceptions::find_exception_type(body),
                triggered: true,
            });
        }
        conditions.log_marker = find_log_marker(body);

        conditions
    }
}

/// Explicit status-code mention, verbatim.
pub fn find_log_marker(body: &str) -> Option<String> {
    patterns::STATUS_CODE
        .find(body)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classification, ConditionValue};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn labels(values: &[ConditionValue]) -> Vec<String> {
        values.iter().map(ConditionValue::label).collect()
    }

    #[test]
    fn test_valid_request_scenario() {
        let extractor = ConditionExtractor::default();
        let conditions =
            extractor.extract_body("request.setAmount(100); assertThat(result).isNotNull();");

        assert_eq!(conditions.classification, Classification::Normal);
        assert_eq!(labels(conditions.inputs.get("amount").unwrap()), vec!["100"]);
        assert_eq!(conditions.inputs.len(), 1);
        assert!(conditions
            .expected_returns
            .contains(&ConditionValue::Marker("not null".into())));
        assert_eq!(conditions.exception, None);
        assert_eq!(
            conditions.preconditions,
            vec!["Login into the system", "Can connect to database"]
        );
    }

    #[test]
    fn test_null_email_scenario() {
        let extractor = ConditionExtractor::default();
        let conditions = extractor.extract_body(indoc! {r#"
            request.setEmail(null);
            assertThatThrownBy(() -> service.register(request))
                .isInstanceOf(ValidationException.class);
        "#});

        assert_eq!(conditions.classification, Classification::Abnormal);
        assert_eq!(labels(conditions.inputs.get("email").unwrap()), vec!["null"]);
        assert_eq!(
            conditions.exception,
            Some(ExceptionInfo {
                exception_type: Some("ValidationException".into()),
                triggered: true,
            })
        );
    }

    #[test]
    fn test_triggered_without_type() {
        let conditions =
            ConditionExtractor::default().extract_body("assertThatThrownBy(() -> run());");
        assert_eq!(
            conditions.exception,
            Some(ExceptionInfo {
                exception_type: None,
                triggered: true,
            })
        );
    }

    #[test]
    fn test_log_marker_verbatim() {
        let conditions = ConditionExtractor::default()
            .extract_body("// expect status 404\nmockMvc.perform(get(\"/x\"));");
        assert_eq!(conditions.log_marker.as_deref(), Some("status 404"));
    }

    #[test]
    fn test_empty_body_yields_defaults() {
        let config = ExtractionConfig {
            preconditions: vec!["Only one".into()],
            ..ExtractionConfig::default()
        };
        let conditions = ConditionExtractor::new(config).extract_body("");
        assert_eq!(conditions, TestConditions::fallback(&["Only one".to_string()]));
    }

    #[test]
    fn test_service_arguments_and_message() {
        let conditions = ConditionExtractor::default().extract_body(indoc! {r#"
            assertThatThrownBy(() -> userService.findById(99L))
                .isInstanceOf(NotFoundException.class)
                .hasMessageContaining("User not found");
        "#});

        assert_eq!(conditions.classification, Classification::Abnormal);
        assert_eq!(labels(conditions.inputs.get("id").unwrap()), vec!["99"]);
        assert_eq!(
            labels(&conditions.expected_returns),
            vec!["message: User not found"]
        );
        assert_eq!(
            conditions
                .exception
                .and_then(|exception| exception.exception_type)
                .as_deref(),
            Some("NotFoundException")
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = ConditionExtractor::default();
        let body = "request.setEmail(\"\"); assertThat(list).hasSize(0); // Status 400";
        assert_eq!(extractor.extract_body(body), extractor.extract_body(body));
    }
}
