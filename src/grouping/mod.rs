//! Method Grouper.
//!
//! Folds correlated cases into [`MethodRecord`]s keyed by method-under-test
//! and derives [`ModuleRecord`]s from them in a single explicit pass. The
//! grouper is owned by one run; [`MethodGrouper::finish`] consumes it and
//! hands back immutable records.

pub mod module_name;
pub mod statistics;

use crate::config::GroupingConfig;
use crate::core::{CaseRecord, MethodRecord, ModuleRecord};
use indexmap::IndexMap;

pub use module_name::derive_module;
pub use statistics::{pass_rate, MethodStatistics, ModuleStatistics, RunSummary};

/// Records produced by one grouping pass, in first-attribution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRecords {
    pub methods: Vec<MethodRecord>,
    pub modules: Vec<ModuleRecord>,
}

impl GroupedRecords {
    pub fn method(&self, name: &str) -> Option<&MethodRecord> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Default)]
pub struct MethodGrouper {
    config: GroupingConfig,
    methods: IndexMap<String, MethodRecord>,
}

impl MethodGrouper {
    pub fn new(config: GroupingConfig) -> Self {
        Self {
            config,
            methods: IndexMap::new(),
        }
    }

    /// Attribute one case to its method-under-test.
    ///
    /// The first case attributed to a method fixes the method's module.
    pub fn add(&mut self, case: CaseRecord) {
        let method = case.unit.method_under_test();
        let config = &self.config;
        let record = self.methods.entry(method).or_insert_with_key(|name| {
            let module = derive_module(&case.unit.declaring_class, config);
            tracing::trace!("New method record {name} in module {module}");
            MethodRecord::new(name.clone(), module)
        });
        record.push(case);
    }

    pub fn extend(&mut self, cases: impl IntoIterator<Item = CaseRecord>) {
        for case in cases {
            self.add(case);
        }
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Close the pass and build module aggregates.
    pub fn finish(self) -> GroupedRecords {
        let methods: Vec<MethodRecord> = self.methods.into_values().collect();

        let mut modules: IndexMap<String, ModuleRecord> = IndexMap::new();
        for method in &methods {
            let module = modules
                .entry(method.module.clone())
                .or_insert_with_key(|name| ModuleRecord::new(name.clone()));
            module.methods.push(method.name.clone());
            module.counts.merge(&method.counts());
        }

        GroupedRecords {
            methods,
            modules: modules.into_values().collect(),
        }
    }
}
