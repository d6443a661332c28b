//! Shader registry keyed by category

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use crate::render::{RenderBackend, RenderError};

new_key_type! {
    /// Handle to a registered shader program
    pub struct ShaderHandle;
}

/// A registered shader program
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    /// Category the program serves ("mesh", "gui", ...)
    pub category: String,
}

/// Maps shader categories to backend programs
#[derive(Debug, Default)]
pub struct ShaderRegistry {
    programs: SlotMap<ShaderHandle, ShaderProgram>,
    by_category: HashMap<String, ShaderHandle>,
}

impl ShaderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `category` with the backend, returning its handle
    ///
    /// Registering a category twice returns the existing handle.
    pub fn register(&mut self, backend: &mut dyn RenderBackend, category: &str) -> Result<ShaderHandle, RenderError> {
        if let Some(&handle) = self.by_category.get(category) {
            return Ok(handle);
        }

        let handle = self.programs.insert(ShaderProgram {
            category: category.to_string(),
        });
        if let Err(err) = backend.load_shader(handle, category) {
            self.programs.remove(handle);
            return Err(err);
        }

        self.by_category.insert(category.to_string(), handle);
        log::info!("Registered shader category '{}' with {}", category, backend.name());
        Ok(handle)
    }

    /// Handle for a category, if registered
    pub fn get(&self, category: &str) -> Option<ShaderHandle> {
        self.by_category.get(category).copied()
    }

    /// Program behind a handle
    pub fn program(&self, handle: ShaderHandle) -> Option<&ShaderProgram> {
        self.programs.get(handle)
    }

    /// Number of registered categories
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessBackend;

    #[test]
    fn test_register_is_idempotent() {
        let mut backend = HeadlessBackend::new();
        let mut registry = ShaderRegistry::new();

        let mesh = registry.register(&mut backend, "mesh").unwrap();
        let again = registry.register(&mut backend, "mesh").unwrap();
        let gui = registry.register(&mut backend, "gui").unwrap();

        assert_eq!(mesh, again);
        assert_ne!(mesh, gui);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("gui"), Some(gui));
        assert_eq!(registry.program(mesh).unwrap().category, "mesh");
        assert!(registry.get("wireframe").is_none());
    }

    #[test]
    fn test_failed_load_is_not_registered() {
        let mut backend = HeadlessBackend::new().with_supported_categories(&["mesh"]);
        let mut registry = ShaderRegistry::new();

        assert!(registry.register(&mut backend, "gui").is_err());
        assert!(registry.is_empty());
    }
}
