use std::collections::HashMap;

use log::debug;

/// Stable id handed out for a loaded texture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Deduplicating registry of texture names.
///
/// The testbed never decodes image data; it only tracks which names the
/// scene references so draw calls can carry a stable handle per slot.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    handles: HashMap<String, TextureHandle>,
    names: Vec<String>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, registering it on first use.
    pub fn load(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.handles.get(name) {
            return *handle;
        }
        let handle = TextureHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.handles.insert(name.to_string(), handle);
        debug!("loaded texture: {name}");
        handle
    }

    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.handles.get(name).copied()
    }

    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_deduplicates_by_name() {
        let mut registry = TextureRegistry::new();
        let grass = registry.load("grass");
        let steel = registry.load("steel");
        assert_ne!(grass, steel);
        assert_eq!(registry.load("grass"), grass);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn handles_resolve_back_to_names() {
        let mut registry = TextureRegistry::new();
        let handle = registry.load("barn-color");
        assert_eq!(registry.name(handle), Some("barn-color"));
        assert_eq!(registry.get("barn-color"), Some(handle));
        assert_eq!(registry.get("missing"), None);
    }
}
