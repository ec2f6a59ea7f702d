//! Render-state material matrix
//!
//! Owns the twelve overlay materials: one colored and one shaded material for
//! each of the six render states. Materials are created lazily the first time
//! a draw needs them and live until [`MaterialMatrix::release_all`].
//!
//! Shader resolution happens once per material family. When the configured
//! shader cannot be found the fallback list is tried in order; if nothing
//! resolves, every slot of that family becomes [`MaterialSlot::Unusable`] and
//! draws bound to it are skipped.

use crate::core::config::OverlayConfig;
use crate::foundation::color::Color;
use crate::render::api::{MaterialDesc, MaterialHandle, OverlayBackend, ShaderHandle};
use crate::render::state::{MaterialKey, MATERIAL_SLOT_COUNT};

/// State of one material slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialSlot {
    /// Not created yet
    #[default]
    Empty,
    /// Created and usable
    Ready(MaterialHandle),
    /// Creation failed; never retried
    Unusable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShaderResolution {
    Pending,
    Found(ShaderHandle),
    Missing,
}

/// Family index: 0 = colored, 1 = shaded
const fn family(shaded: bool) -> usize {
    shaded as usize
}

/// Lazily populated `(render state, shaded)` → material table
pub struct MaterialMatrix {
    slots: [MaterialSlot; MATERIAL_SLOT_COUNT],
    shader_names: [String; 2],
    shaders: [ShaderResolution; 2],
    fallback_shaders: Vec<String>,
}

impl MaterialMatrix {
    /// Create an empty matrix using the shader names from `config`
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            slots: [MaterialSlot::Empty; MATERIAL_SLOT_COUNT],
            shader_names: [config.colored_shader.clone(), config.shaded_shader.clone()],
            shaders: [ShaderResolution::Pending; 2],
            fallback_shaders: config.fallback_shaders.clone(),
        }
    }

    /// Current state of a slot
    pub fn slot(&self, key: MaterialKey) -> MaterialSlot {
        self.slots[key.index()]
    }

    /// Material for `key`, creating it on first access.
    ///
    /// Returns `None` when the slot is unusable.
    pub fn get_or_create(
        &mut self,
        key: MaterialKey,
        backend: &mut dyn OverlayBackend,
    ) -> Option<MaterialHandle> {
        match self.slots[key.index()] {
            MaterialSlot::Ready(handle) => return Some(handle),
            MaterialSlot::Unusable => return None,
            MaterialSlot::Empty => {}
        }

        let slot = match self.resolve_shader(key.shaded, backend) {
            Some(shader) => {
                let desc = MaterialDesc::overlay(shader, key.state.cull_mode, key.state.depth_test);
                match backend.create_material(&desc) {
                    Ok(handle) => {
                        log::debug!(
                            "Created overlay material {:?} for {:?} (shaded: {})",
                            handle,
                            key.state,
                            key.shaded
                        );
                        MaterialSlot::Ready(handle)
                    }
                    Err(e) => {
                        log::error!(
                            "Failed to create overlay material for {:?} (shaded: {}): {}",
                            key.state,
                            key.shaded,
                            e
                        );
                        MaterialSlot::Unusable
                    }
                }
            }
            None => MaterialSlot::Unusable,
        };

        self.slots[key.index()] = slot;
        match slot {
            MaterialSlot::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    fn resolve_shader(&mut self, shaded: bool, backend: &mut dyn OverlayBackend) -> Option<ShaderHandle> {
        let family = family(shaded);
        match self.shaders[family] {
            ShaderResolution::Found(handle) => return Some(handle),
            ShaderResolution::Missing => return None,
            ShaderResolution::Pending => {}
        }

        let name = &self.shader_names[family];
        let mut resolved = backend.find_shader(name);
        if resolved.is_none() {
            log::error!("Cannot find shader '{}'. Debug overlay will not work correctly.", name);
            resolved = self
                .fallback_shaders
                .iter()
                .find_map(|fallback| backend.find_shader(fallback).map(|handle| (fallback, handle)))
                .map(|(fallback, handle)| {
                    log::warn!("Using fallback shader '{}' instead of '{}'", fallback, name);
                    handle
                });
        }

        self.shaders[family] = match resolved {
            Some(handle) => ShaderResolution::Found(handle),
            None => {
                log::error!("No fallback shader found for '{}'; affected overlay draws are skipped", name);
                ShaderResolution::Missing
            }
        };
        resolved
    }

    /// Number of materials currently alive
    pub fn created_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, MaterialSlot::Ready(_)))
            .count()
    }

    /// Reset the tint of every created material to white
    pub fn reset_colors(&self, backend: &mut dyn OverlayBackend) {
        for slot in &self.slots {
            if let MaterialSlot::Ready(handle) = slot {
                backend.set_material_color(*handle, Color::WHITE);
            }
        }
    }

    /// Release every created material and return the matrix to its empty state.
    ///
    /// Returns the number of materials released.
    pub fn release_all(&mut self, backend: &mut dyn OverlayBackend) -> usize {
        let mut released = 0;
        for slot in &mut self.slots {
            if let MaterialSlot::Ready(handle) = std::mem::take(slot) {
                backend.release_material(handle);
                released += 1;
            }
        }
        self.shaders = [ShaderResolution::Pending; 2];
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingBackend;
    use crate::render::state::{CullMode, RenderState};

    fn key(depth_test: bool, cull: CullMode, shaded: bool) -> MaterialKey {
        MaterialKey::new(RenderState::new(depth_test, cull), shaded)
    }

    #[test]
    fn test_material_created_once_per_key() {
        let mut backend = RecordingBackend::new();
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        let first = matrix.get_or_create(key(true, CullMode::Off, false), &mut backend);
        let second = matrix.get_or_create(key(true, CullMode::Off, false), &mut backend);

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(backend.materials_created(), 1);
        assert_eq!(matrix.created_count(), 1);
    }

    #[test]
    fn test_material_count_bounded_by_slot_count() {
        let mut backend = RecordingBackend::new();
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        for _ in 0..3 {
            for state in RenderState::all() {
                for shaded in [false, true] {
                    matrix.get_or_create(MaterialKey::new(state, shaded), &mut backend);
                }
            }
        }

        assert_eq!(matrix.created_count(), MATERIAL_SLOT_COUNT);
        assert_eq!(backend.materials_created(), MATERIAL_SLOT_COUNT);
    }

    #[test]
    fn test_material_desc_follows_state() {
        let mut backend = RecordingBackend::new();
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        let handle = matrix
            .get_or_create(key(false, CullMode::Back, true), &mut backend)
            .unwrap();
        let desc = backend.material_desc(handle).unwrap();

        assert_eq!(desc.cull_mode, CullMode::Back);
        assert!(!desc.depth_write);
        assert_eq!(desc.depth_compare, crate::render::api::DepthCompare::Always);
        assert_eq!(desc.src_blend, crate::render::api::BlendFactor::SrcAlpha);
        assert_eq!(desc.dst_blend, crate::render::api::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn test_fallback_shader_used_when_primary_missing() {
        let mut backend = RecordingBackend::with_shaders(["Unlit/Color"]);
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        let handle = matrix.get_or_create(key(true, CullMode::Off, true), &mut backend);
        assert!(handle.is_some());
        assert_eq!(backend.shader_lookups("Hidden/DbgDraw-Shaded"), 1);
        assert_eq!(backend.shader_lookups("Hidden/Internal-Colored"), 1);
        assert_eq!(backend.shader_lookups("Unlit/Color"), 1);
    }

    #[test]
    fn test_unresolvable_shader_marks_slots_unusable_without_retry() {
        let mut backend = RecordingBackend::with_shaders(Vec::<String>::new());
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        assert!(matrix.get_or_create(key(true, CullMode::Off, false), &mut backend).is_none());
        assert!(matrix.get_or_create(key(true, CullMode::Off, false), &mut backend).is_none());
        assert!(matrix.get_or_create(key(false, CullMode::Front, false), &mut backend).is_none());

        assert_eq!(matrix.slot(key(true, CullMode::Off, false)), MaterialSlot::Unusable);
        assert_eq!(backend.shader_lookups("Hidden/Internal-Colored"), 2);
        assert_eq!(backend.materials_created(), 0);
    }

    #[test]
    fn test_failed_material_creation_is_not_retried() {
        let mut backend = RecordingBackend::new();
        backend.fail_material_creation(true);
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());

        assert!(matrix.get_or_create(key(true, CullMode::Off, false), &mut backend).is_none());
        backend.fail_material_creation(false);
        assert!(matrix.get_or_create(key(true, CullMode::Off, false), &mut backend).is_none());
        assert!(matrix.get_or_create(key(true, CullMode::Back, false), &mut backend).is_some());
    }

    #[test]
    fn test_release_all_releases_each_material_once() {
        let mut backend = RecordingBackend::new();
        let mut matrix = MaterialMatrix::new(&OverlayConfig::default());
        matrix.get_or_create(key(true, CullMode::Off, false), &mut backend);
        matrix.get_or_create(key(true, CullMode::Off, true), &mut backend);

        assert_eq!(matrix.release_all(&mut backend), 2);
        assert_eq!(matrix.release_all(&mut backend), 0);
        assert_eq!(backend.materials_released(), 2);
        assert_eq!(matrix.created_count(), 0);
    }
}
