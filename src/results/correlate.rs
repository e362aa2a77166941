//! Merging extracted conditions with reported outcomes.

use crate::core::{CaseRecord, TestConditions, TestResult, TestStatus, TestUnit};
use crate::errors::{Diagnostic, DiagnosticKind};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Merged cases for one suite plus the gaps found while merging.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub cases: Vec<CaseRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Enrich each unit with the result entry whose name matches exactly.
///
/// Units without an entry default to [`TestStatus::Pass`] with no message
/// and `reported = false`. When `results` is `None` the suite had no result
/// document at all and a single gap is recorded for the suite. Entries with
/// no matching unit are reported and dropped.
pub fn correlate(
    suite: &str,
    extracted: Vec<(TestUnit, TestConditions)>,
    results: Option<&[TestResult]>,
) -> Correlation {
    let mut by_name: IndexMap<&str, &TestResult> = IndexMap::new();
    for result in results.unwrap_or_default() {
        // First entry for a repeated name wins.
        if by_name.contains_key(result.name.as_str()) {
            tracing::debug!("Duplicate result entry {} in suite {suite}", result.name);
            continue;
        }
        by_name.insert(result.name.as_str(), result);
    }

    let mut correlation = Correlation::default();
    if results.is_none() && !extracted.is_empty() {
        correlation.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::CorrelationGap,
                "no result document; every case defaults to Pass",
            )
            .with_subject(suite),
        );
    }

    let mut matched: HashSet<&str> = HashSet::new();
    for (unit, conditions) in extracted {
        let case = match by_name.get(unit.name.as_str()) {
            Some(result) => {
                matched.insert(result.name.as_str());
                CaseRecord {
                    status: result.status,
                    duration_seconds: result.duration_seconds,
                    error_message: result.error_message.clone(),
                    error_type: result.error_type.clone(),
                    reported: true,
                    unit,
                    conditions,
                }
            }
            None => {
                if results.is_some() {
                    tracing::debug!("No result entry for {} in suite {suite}", unit.name);
                    correlation.diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::CorrelationGap,
                            format!("no result entry in suite {suite}; defaulted to Pass"),
                        )
                        .with_subject(unit.name.clone()),
                    );
                }
                CaseRecord {
                    status: TestStatus::Pass,
                    duration_seconds: 0.0,
                    error_message: None,
                    error_type: None,
                    reported: false,
                    unit,
                    conditions,
                }
            }
        };
        correlation.cases.push(case);
    }

    for name in by_name.keys().filter(|name| !matched.contains(*name)) {
        tracing::debug!("Result entry {name} in suite {suite} has no test declaration");
        correlation.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::CorrelationGap,
                format!("result entry in suite {suite} has no matching test declaration"),
            )
            .with_subject(*name),
        );
    }

    correlation
}
