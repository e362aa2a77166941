use crate::config::SynthesisConfig;
use crate::core::ModuleRecord;
use crate::errors::{Diagnostic, Result};
use crate::grouping::{GroupedRecords, MethodStatistics, ModuleStatistics, RunSummary};
use crate::synthesis::{synthesize, DecisionTable};
use serde::Serialize;

/// Everything one run produces, ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub tables: Vec<DecisionTable>,
    pub methods: Vec<MethodStatistics>,
    pub modules: Vec<ModuleStatistics>,
    pub summary: RunSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    pub fn from_records(
        records: &GroupedRecords,
        config: &SynthesisConfig,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let tables = records
            .methods
            .iter()
            .map(|method| synthesize(method, config))
            .collect();
        let methods: Vec<MethodStatistics> = records
            .methods
            .iter()
            .map(MethodStatistics::from_record)
            .collect();
        let modules: Vec<ModuleStatistics> = records
            .modules
            .iter()
            .map(ModuleStatistics::from_record)
            .collect();
        let summary = RunSummary::from_methods(&methods, modules.len());

        Self {
            tables,
            methods,
            modules,
            summary,
            diagnostics,
        }
    }

    pub fn table(&self, method: &str) -> Option<&DecisionTable> {
        self.tables.iter().find(|t| t.method == method)
    }

    /// Keep only `method` and its module. Diagnostics are kept.
    ///
    /// The module's figures are recomputed from the retained method so that
    /// they agree with the summary.
    pub fn retain_method(&mut self, method: &str) {
        self.tables.retain(|t| t.method == method);
        self.methods.retain(|m| m.method == method);
        self.modules = self
            .methods
            .iter()
            .map(|kept| {
                let mut record = ModuleRecord::new(kept.module.clone());
                record.methods.push(kept.method.clone());
                record.counts = kept.counts;
                ModuleStatistics::from_record(&record)
            })
            .collect();
        self.summary = RunSummary::from_methods(&self.methods, self.modules.len());
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{TestResult, TestStatus};
    use crate::pipeline::{Pipeline, SuiteInput};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = r#"
class InvoiceServiceTest {
    @Test
    void createInvoice_whenValid_shouldCreate() { assertThat(result).isNotNull(); }

    @Test
    void cancelInvoice_whenPaid_shouldReject() { assertFalse(service.cancel(invoice)); }
}
"#;

    fn result(name: &str, status: TestStatus) -> TestResult {
        TestResult {
            name: name.to_string(),
            class_name: None,
            status,
            duration_seconds: 0.0,
            error_message: None,
            error_type: None,
        }
    }

    #[test]
    fn test_retain_method_recomputes_module_figures() {
        let input = SuiteInput::new("InvoiceServiceTest", SOURCE).with_results(vec![
            result("createInvoice_whenValid_shouldCreate", TestStatus::Pass),
            result("cancelInvoice_whenPaid_shouldReject", TestStatus::Fail),
        ]);
        let mut report = Pipeline::default().run([input]);
        assert_eq!(report.modules[0].counts.total, 2);

        report.retain_method("createInvoice");

        assert_eq!(report.modules.len(), 1);
        let module = &report.modules[0];
        assert_eq!(module.module, "InvoiceService");
        assert_eq!(module.methods, vec!["createInvoice"]);
        assert_eq!(module.counts, report.summary.counts);
        assert_eq!(module.counts.total, 1);
        assert_eq!(module.pass_rate, report.summary.pass_rate);
    }

    #[test]
    fn test_retain_unknown_method_empties_report() {
        let mut report = Pipeline::default().run([SuiteInput::new("InvoiceServiceTest", SOURCE)]);
        report.retain_method("absent");
        assert!(report.tables.is_empty());
        assert!(report.modules.is_empty());
        assert_eq!(report.summary.counts.total, 0);
    }
}
