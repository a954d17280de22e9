use imbind_core::BindingConfig;
use indexmap::IndexMap;

/// Splits off the longest prefix from `prefixes` that `name` starts with.
///
/// Returns `("", name)` when nothing matches.
pub fn strip_longest<'n>(name: &'n str, prefixes: &[String]) -> (&'n str, &'n str) {
    prefixes
        .iter()
        .filter(|prefix| name.starts_with(prefix.as_str()))
        .max_by_key(|prefix| prefix.len())
        .map(|prefix| name.split_at(prefix.len()))
        .unwrap_or(("", name))
}

pub fn apply_override<'n>(name: &'n str, overrides: &'n IndexMap<String, String>) -> &'n str {
    overrides.get(name).map(String::as_str).unwrap_or(name)
}

/// Library prefix removal and identifier hygiene.
#[derive(Debug, Clone, Copy)]
pub struct NameTransformer<'a> {
    config: &'a BindingConfig,
}

impl<'a> NameTransformer<'a> {
    pub fn new(config: &'a BindingConfig) -> Self {
        Self { config }
    }

    /// `ImGuiWindow` -> `Window`, `ImVector_ImWchar` -> `Vector_Wchar`.
    pub fn strip_branding(&self, name: &str) -> String {
        if let Some(namespaced) = self.strip_namespaced(name) {
            return namespaced;
        }

        let (_, remainder) = strip_longest(name, &self.config.branding_prefixes);
        remainder.to_string()
    }

    /// Rewrites container prefixes such as `ImVector_` into `<Namespace>_<remainder>`.
    pub fn strip_namespaced(&self, name: &str) -> Option<String> {
        self.config
            .namespaced_prefixes
            .iter()
            .filter(|(prefix, _)| name.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, namespace)| {
                let remainder = &name[prefix.len()..];
                format!("{}_{}", namespace, self.strip_branding(remainder))
            })
    }

    pub fn strip_define_prefix<'n>(&self, name: &'n str) -> &'n str {
        strip_longest(name, &self.config.define_prefixes).1
    }

    pub fn strip_function_prefix<'n>(&self, name: &'n str) -> &'n str {
        strip_longest(name, &self.config.function_prefixes).1
    }

    pub fn make_identifier_valid(&self, ident: &str) -> String {
        let starts_with_digit = ident.chars().next().is_some_and(|c| c.is_ascii_digit());
        let reserved = self
            .config
            .reserved_identifiers
            .iter()
            .any(|word| word == ident);

        if starts_with_digit || reserved {
            format!("_{}", ident)
        } else {
            ident.to_string()
        }
    }

    /// Identifier override followed by validity fix-up.
    pub fn identifier(&self, name: &str) -> String {
        let renamed = apply_override(name, &self.config.identifier_overrides);
        self.make_identifier_valid(renamed)
    }
}
