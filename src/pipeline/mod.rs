//! One batch run: locate, extract, correlate, group, synthesize.
//!
//! The run is single-threaded and holds every entity in memory until the
//! [`RunReport`] is assembled. Problems with a single unit or suite become
//! [`Diagnostic`]s and never abort the run.
//!
//! Case order inside a method follows suite order, then source order
//! within each suite.

pub mod report;
pub mod sources;

use crate::config::TestdocConfig;
use crate::core::{CaseRecord, TestConditions, TestResult, TestUnit};
use crate::errors::{Diagnostic, DiagnosticKind};
use crate::extraction::ConditionExtractor;
use crate::grouping::MethodGrouper;
use crate::locator::locate_units;
use crate::results::correlate;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

pub use report::RunReport;
pub use sources::{discover_report_files, load_suite_inputs, run_directories, SourceIndex};

/// One test suite: its source text and, when available, its parsed results.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteInput {
    pub suite_name: String,
    pub source_path: Option<PathBuf>,
    pub source_text: String,
    /// `None` when no result document exists for the suite.
    pub results: Option<Vec<TestResult>>,
}

impl SuiteInput {
    pub fn new(suite_name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            source_path: None,
            source_text: source_text.into(),
            results: None,
        }
    }

    pub fn with_results(mut self, results: Vec<TestResult>) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: TestdocConfig,
    extractor: ConditionExtractor,
}

impl Pipeline {
    pub fn new(config: TestdocConfig) -> Self {
        let extractor = ConditionExtractor::new(config.extraction.clone());
        Self { config, extractor }
    }

    pub fn config(&self) -> &TestdocConfig {
        &self.config
    }

    /// Run over `inputs` in the order given.
    pub fn run(&self, inputs: impl IntoIterator<Item = SuiteInput>) -> RunReport {
        self.run_with_diagnostics(inputs, Vec::new())
    }

    /// Like [`Pipeline::run`], starting from diagnostics gathered earlier
    /// (for example while reading files).
    pub fn run_with_diagnostics(
        &self,
        inputs: impl IntoIterator<Item = SuiteInput>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> RunReport {
        let mut grouper = MethodGrouper::new(self.config.grouping.clone());

        for input in inputs {
            let span = tracing::info_span!("suite", name = %input.suite_name);
            let _entered = span.enter();
            let cases = self.process_suite(input, &mut diagnostics);
            tracing::debug!("Correlated {} cases", cases.len());
            grouper.extend(cases);
        }

        let records = grouper.finish();
        tracing::info!(
            "Grouped {} methods into {} modules ({} diagnostics)",
            records.methods.len(),
            records.modules.len(),
            diagnostics.len()
        );
        RunReport::from_records(&records, &self.config.synthesis, diagnostics)
    }

    /// Locate, extract and correlate the units of one suite.
    pub fn process_suite(
        &self,
        input: SuiteInput,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<CaseRecord> {
        let SuiteInput {
            suite_name,
            source_path,
            source_text,
            results,
        } = input;
        let attach_path = |diagnostic: Diagnostic| match &source_path {
            Some(path) => diagnostic.with_path(path),
            None => diagnostic,
        };

        let located = locate_units(&source_text);
        for error in &located.skipped {
            diagnostics.push(attach_path(
                Diagnostic::from_error(error).with_subject(suite_name.clone()),
            ));
        }
        if located.units.is_empty() {
            tracing::debug!("No test declarations found");
        }

        let extracted: Vec<(TestUnit, TestConditions)> = located
            .units
            .into_iter()
            .map(|unit| {
                let conditions = self.extract_guarded(&unit, diagnostics);
                (unit, conditions)
            })
            .collect();

        let correlation = correlate(&suite_name, extracted, results.as_deref());
        diagnostics.extend(correlation.diagnostics.into_iter().map(attach_path));
        correlation.cases
    }

    /// Extraction that survives a panic: the unit keeps only its fixed
    /// preconditions and an `Extraction` diagnostic is recorded.
    fn extract_guarded(
        &self,
        unit: &TestUnit,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TestConditions {
        match panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract(unit))) {
            Ok(conditions) => conditions,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!("Condition extraction failed for {}: {message}", unit.name);
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::Extraction,
                        format!("condition extraction failed: {message}"),
                    )
                    .with_subject(unit.name.clone()),
                );
                TestConditions::fallback(&self.config.extraction.preconditions)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
