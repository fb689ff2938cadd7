//! Renderer registry
//!
//! Maps runtime type keys to renderer variants. A registry is built once at
//! start-up, then shared read-only.

use mbeanfmt_types::{class_names, TypeKey, REFERENCE_ARRAY_PREFIX};
use std::collections::HashMap;

use crate::renderer::Renderer;

/// Registry of renderers keyed by runtime type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    renderers: HashMap<TypeKey, Renderer>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard open data, date and void renderers
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(class_names::COMPOSITE_DATA_SUPPORT, Renderer::Composite);
        registry.register(class_names::COMPOSITE_DATA, Renderer::Composite);
        registry.register(class_names::TABULAR_DATA_SUPPORT, Renderer::Tabular);
        registry.register(class_names::TABULAR_DATA, Renderer::Tabular);
        registry.register(class_names::VOID, Renderer::Void);
        registry.register(class_names::DATE, Renderer::Date);
        log::debug!("standard registry holds {} renderers", registry.len());
        registry
    }

    /// Register a renderer, returning the one it replaces
    pub fn register(&mut self, type_key: impl Into<TypeKey>, renderer: Renderer) -> Option<Renderer> {
        self.renderers.insert(type_key.into(), renderer)
    }

    /// Get the renderer registered for exactly this key
    pub fn get(&self, type_key: &str) -> Option<Renderer> {
        self.renderers.get(type_key).copied()
    }

    /// Pick the renderer for a type key
    ///
    /// Reference array keys always get the array renderer, even when an
    /// exact entry exists. Unregistered keys get the default renderer.
    pub fn resolve(&self, type_key: &str) -> Renderer {
        let renderer = if type_key.starts_with(REFERENCE_ARRAY_PREFIX) {
            Renderer::Array
        } else {
            self.get(type_key).unwrap_or_default()
        };
        log::trace!("resolved {} to {:?} renderer", type_key, renderer);
        renderer
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Registered keys and renderers, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, Renderer)> {
        self.renderers.iter().map(|(key, renderer)| (key, *renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registrations() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.get(class_names::VOID), Some(Renderer::Void));
        assert_eq!(registry.get(class_names::DATE), Some(Renderer::Date));
        assert_eq!(
            registry.get(class_names::TABULAR_DATA),
            Some(Renderer::Tabular)
        );
        assert_eq!(registry.get("java.lang.String"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = Registry::standard();
        assert_eq!(registry.resolve("java.lang.Integer"), Renderer::Default);
        assert_eq!(registry.resolve(""), Renderer::Default);
    }

    #[test]
    fn test_array_prefix_overrides_exact_match() {
        let mut registry = Registry::standard();
        registry.register("[Ljava.util.Date;", Renderer::Date);
        assert_eq!(registry.resolve("[Ljava.util.Date;"), Renderer::Array);
        assert_eq!(Registry::new().resolve("[Lfoo;"), Renderer::Array);
    }

    #[test]
    fn test_non_reference_arrays_use_exact_lookup() {
        let registry = Registry::standard();
        assert_eq!(registry.resolve("[I"), Renderer::Default);
        assert_eq!(registry.resolve("[[Ljava.lang.String;"), Renderer::Default);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::new();
        assert_eq!(registry.register("x", Renderer::Void), None);
        assert_eq!(registry.register("x", Renderer::Date), Some(Renderer::Void));
        assert_eq!(registry.resolve("x"), Renderer::Date);
    }
}
