//! Summary statistics per method, per module and per run.

use crate::core::{MethodRecord, ModuleRecord, OverallStatus, StatusCounts};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodStatistics {
    pub method: String,
    pub module: String,
    pub test_count: usize,
    pub counts: StatusCounts,
    pub status: OverallStatus,
    pub pass_rate: f64,
}

impl MethodStatistics {
    pub fn from_record(record: &MethodRecord) -> Self {
        let counts = record.counts();
        Self {
            method: record.name.clone(),
            module: record.module.clone(),
            test_count: record.test_count,
            counts,
            status: record.status(),
            pass_rate: pass_rate(&counts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleStatistics {
    pub module: String,
    pub methods: Vec<String>,
    pub counts: StatusCounts,
    pub status: OverallStatus,
    pub pass_rate: f64,
}

impl ModuleStatistics {
    pub fn from_record(record: &ModuleRecord) -> Self {
        Self {
            module: record.name.clone(),
            methods: record.methods.clone(),
            counts: record.counts,
            status: record.status(),
            pass_rate: pass_rate(&record.counts),
        }
    }
}

/// Whole-run totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub modules: usize,
    pub methods: usize,
    pub counts: StatusCounts,
    pub pass_rate: f64,
}

impl RunSummary {
    pub fn from_methods(methods: &[MethodStatistics], modules: usize) -> Self {
        let mut counts = StatusCounts::default();
        for method in methods {
            counts.merge(&method.counts);
        }
        Self {
            modules,
            methods: methods.len(),
            counts,
            pass_rate: pass_rate(&counts),
        }
    }
}

/// Passed share of all cases in percent, rounded to one decimal.
pub fn pass_rate(counts: &StatusCounts) -> f64 {
    if counts.total == 0 {
        return 0.0;
    }
    let percent = counts.passed as f64 * 100.0 / counts.total as f64;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CaseRecord, NamingConvention, TestConditions, TestStatus, TestUnit};

    fn counts(statuses: &[TestStatus]) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for status in statuses {
            counts.record(*status);
        }
        counts
    }

    #[test]
    fn test_pass_rate_rounding() {
        assert_eq!(pass_rate(&StatusCounts::default()), 0.0);
        assert_eq!(
            pass_rate(&counts(&[TestStatus::Pass, TestStatus::Fail, TestStatus::Pass])),
            66.7
        );
        assert_eq!(pass_rate(&counts(&[TestStatus::Pass])), 100.0);
    }

    fn push_case(record: &mut MethodRecord, status: TestStatus) {
        record.push(CaseRecord {
            unit: TestUnit {
                name: format!("{}_case{}", record.name, record.test_count),
                body: String::new(),
                declaring_class: "InvoiceServiceTest".into(),
                offset: 0,
                naming: NamingConvention::Bare,
            },
            conditions: TestConditions::fallback(&[]),
            status,
            duration_seconds: 0.0,
            error_message: None,
            error_type: None,
            reported: true,
        });
    }

    #[test]
    fn test_run_summary_totals() {
        let mut first = MethodRecord::new("createInvoice", "InvoiceService");
        push_case(&mut first, TestStatus::Pass);
        push_case(&mut first, TestStatus::Fail);
        let mut second = MethodRecord::new("getInvoice", "InvoiceService");
        push_case(&mut second, TestStatus::Pass);

        let stats = vec![
            MethodStatistics::from_record(&first),
            MethodStatistics::from_record(&second),
        ];
        assert_eq!(stats[0].status, OverallStatus::Fail);

        let summary = RunSummary::from_methods(&stats, 1);
        assert_eq!(summary.methods, 2);
        assert_eq!(summary.counts.total, 3);
        assert_eq!(summary.counts.failed, 1);
        assert_eq!(summary.pass_rate, 66.7);
    }

    #[test]
    fn test_module_statistics_copy_status() {
        let mut module = ModuleRecord::new("InvoiceService");
        module.methods.push("createInvoice".into());
        module.counts = counts(&[TestStatus::Pass, TestStatus::Error]);

        let stats = ModuleStatistics::from_record(&module);
        assert_eq!(stats.status, OverallStatus::Partial);
        assert_eq!(stats.pass_rate, 50.0);
        assert_eq!(stats.methods, vec!["createInvoice"]);
    }
}
