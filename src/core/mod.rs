//! Core data model for test-unit extraction and decision-table synthesis.

pub mod types;

pub use types::{
    CaseRecord, Classification, ConditionValue, DecisionRow, ExceptionInfo, InputMap,
    MethodRecord, ModuleRecord, NameParts, NamingConvention, OverallStatus, RowSection,
    StatusCounts, TestConditions, TestResult, TestStatus, TestUnit,
};
