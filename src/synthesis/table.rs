use crate::core::{Classification, DecisionRow, MethodRecord, RowSection, TestStatus};
use serde::Serialize;

/// One test-case column of a decision table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseColumn {
    /// Stable column id, `UTCID01` for the first case.
    pub id: String,
    pub test_name: String,
    pub classification: Classification,
    pub status: TestStatus,
    pub reported: bool,
    pub duration_seconds: f64,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationCounts {
    pub normal: usize,
    pub abnormal: usize,
    pub boundary: usize,
}

impl ClassificationCounts {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Normal => self.normal += 1,
            Classification::Abnormal => self.abnormal += 1,
            Classification::Boundary => self.boundary += 1,
        }
    }
}

/// Condition-by-case matrix for one method-under-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTable {
    pub method: String,
    pub module: String,
    pub cases: Vec<CaseColumn>,
    pub rows: Vec<DecisionRow>,
    pub case_count: usize,
    pub pass_count: usize,
    /// Failed plus errored cases.
    pub fail_count: usize,
    /// Cases that neither passed nor failed.
    pub untested_count: usize,
    pub classification_counts: ClassificationCounts,
}

impl DecisionTable {
    pub(super) fn new(record: &MethodRecord, rows: Vec<DecisionRow>) -> Self {
        let counts = record.counts();
        let mut classification_counts = ClassificationCounts::default();
        let cases = record
            .cases
            .iter()
            .enumerate()
            .map(|(index, case)| {
                classification_counts.record(case.conditions.classification);
                CaseColumn {
                    id: case_id(index),
                    test_name: case.unit.name.clone(),
                    classification: case.conditions.classification,
                    status: case.status,
                    reported: case.reported,
                    duration_seconds: case.duration_seconds,
                    error_message: case.error_message.clone(),
                }
            })
            .collect();

        Self {
            method: record.name.clone(),
            module: record.module.clone(),
            cases,
            rows,
            case_count: counts.total,
            pass_count: counts.passed,
            fail_count: counts.failing(),
            untested_count: counts.total - counts.passed - counts.failing(),
            classification_counts,
        }
    }

    pub fn section(&self, section: RowSection) -> impl Iterator<Item = &DecisionRow> {
        self.rows.iter().filter(move |row| row.section == section)
    }
}

/// Column id for the zero-based case `index`.
pub fn case_id(index: usize) -> String {
    format!("UTCID{:02}", index + 1)
}
