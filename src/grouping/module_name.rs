use crate::config::GroupingConfig;

/// Derive the production module a test class exercises.
///
/// The longest prefix of `class_name` ending in a module suffix wins, trying
/// suffixes in configured order (`InvoiceServiceTest` → `InvoiceService`).
/// Otherwise a trailing test suffix is stripped (`LoginFlowTest` →
/// `LoginFlow`), and failing that the class name is used as is.
pub fn derive_module(class_name: &str, config: &GroupingConfig) -> String {
    let suffixed = config
        .module_suffixes
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .find_map(|suffix| {
            class_name
                .rfind(suffix.as_str())
                .filter(|&start| start > 0)
                .map(|start| &class_name[..start + suffix.len()])
        });
    if let Some(module) = suffixed {
        return module.to_string();
    }

    config
        .test_suffixes
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .find_map(|suffix| class_name.strip_suffix(suffix.as_str()))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(class_name)
        .to_string()
}
