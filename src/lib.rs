// Export modules for library usage
pub mod cli;
pub mod common;
pub mod config;
pub mod core;
pub mod errors;
pub mod extraction;
pub mod grouping;
pub mod locator;
pub mod observability;
pub mod pipeline;
pub mod results;
pub mod synthesis;

// Re-export commonly used types
pub use crate::core::{
    CaseRecord, Classification, ConditionValue, DecisionRow, ExceptionInfo, InputMap,
    MethodRecord, ModuleRecord, NameParts, NamingConvention, OverallStatus, RowSection,
    StatusCounts, TestConditions, TestResult, TestStatus, TestUnit,
};

pub use crate::config::{load_config, TestdocConfig};
pub use crate::errors::{Diagnostic, DiagnosticKind, Error, Result};
pub use crate::extraction::ConditionExtractor;
pub use crate::grouping::{
    GroupedRecords, MethodGrouper, MethodStatistics, ModuleStatistics, RunSummary,
};
pub use crate::locator::{locate_units, Located};
pub use crate::pipeline::{run_directories, Pipeline, RunReport, SuiteInput};
pub use crate::results::{correlate, parse_result_document, ResultDocumentParser, SuiteReport};
pub use crate::synthesis::{synthesize, DecisionTable};
