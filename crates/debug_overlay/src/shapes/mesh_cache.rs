//! Shape mesh cache
//!
//! Owns every mesh the overlay draws through mesh jobs. Built-in shapes are
//! generated on first request and kept for the lifetime of the cache; custom
//! meshes can be inserted and removed by the host. GPU upload is deferred to
//! the first render pass that needs the mesh.
//!
//! Mesh jobs only hold a [`MeshId`]. Removing a mesh invalidates the id and
//! jobs that still reference it are skipped by the render pass.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::render::api::{MeshHandle, OverlayBackend};
use crate::render::primitives::MeshData;
use crate::shapes::ShapeKind;

slotmap::new_key_type! {
    /// Weak reference to a mesh in the [`MeshCache`]
    pub struct MeshId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GpuMesh {
    Pending,
    Uploaded(MeshHandle),
    Failed,
}

#[derive(Debug)]
struct CachedMesh {
    data: MeshData,
    gpu: GpuMesh,
}

/// CPU mesh data plus lazily uploaded GPU meshes
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: SlotMap<MeshId, CachedMesh>,
    shapes: HashMap<ShapeKind, MeshId>,
}

impl MeshCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of a built-in shape, generating its mesh data on first use
    pub fn shape(&mut self, kind: ShapeKind) -> MeshId {
        if let Some(id) = self.shapes.get(&kind) {
            if self.meshes.contains_key(*id) {
                return *id;
            }
        }

        let id = self.insert(kind.generate());
        self.shapes.insert(kind, id);
        log::debug!("Generated {:?} mesh", kind);
        id
    }

    /// Add a custom mesh
    pub fn insert(&mut self, data: MeshData) -> MeshId {
        self.meshes.insert(CachedMesh {
            data,
            gpu: GpuMesh::Pending,
        })
    }

    /// Remove a mesh, releasing its GPU copy.
    ///
    /// Returns `false` when the id was already stale.
    pub fn remove(&mut self, id: MeshId, backend: &mut dyn OverlayBackend) -> bool {
        match self.meshes.remove(id) {
            Some(mesh) => {
                if let GpuMesh::Uploaded(handle) = mesh.gpu {
                    backend.release_mesh(handle);
                }
                self.shapes.retain(|_, shape_id| *shape_id != id);
                true
            }
            None => false,
        }
    }

    /// Whether `id` still refers to a mesh
    pub fn contains(&self, id: MeshId) -> bool {
        self.meshes.contains_key(id)
    }

    /// CPU mesh data
    pub fn data(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id).map(|mesh| &mesh.data)
    }

    /// GPU handle for `id`, uploading on first use.
    ///
    /// An upload failure is logged once; the mesh then stays unavailable.
    pub fn gpu_handle(&mut self, id: MeshId, backend: &mut dyn OverlayBackend) -> Option<MeshHandle> {
        let mesh = self.meshes.get_mut(id)?;
        match mesh.gpu {
            GpuMesh::Uploaded(handle) => Some(handle),
            GpuMesh::Failed => None,
            GpuMesh::Pending => match backend.create_mesh(&mesh.data) {
                Ok(handle) => {
                    log::debug!("Uploaded mesh '{}' as {:?}", mesh.data.name, handle);
                    mesh.gpu = GpuMesh::Uploaded(handle);
                    Some(handle)
                }
                Err(e) => {
                    log::error!("Failed to upload mesh '{}': {}", mesh.data.name, e);
                    mesh.gpu = GpuMesh::Failed;
                    None
                }
            },
        }
    }

    /// Meshes in the cache
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the cache holds no meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Meshes currently uploaded
    pub fn uploaded_count(&self) -> usize {
        self.meshes
            .values()
            .filter(|mesh| matches!(mesh.gpu, GpuMesh::Uploaded(_)))
            .count()
    }

    /// Release every uploaded mesh and drop all mesh data.
    ///
    /// Returns the number of GPU meshes released.
    pub fn release_all(&mut self, backend: &mut dyn OverlayBackend) -> usize {
        let mut released = 0;
        for (_, mesh) in self.meshes.drain() {
            if let GpuMesh::Uploaded(handle) = mesh.gpu {
                backend.release_mesh(handle);
                released += 1;
            }
        }
        self.shapes.clear();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::primitives::Topology;
    use crate::render::recording::RecordingBackend;

    #[test]
    fn test_shape_generated_once() {
        let mut cache = MeshCache::new();
        let a = cache.shape(ShapeKind::WireCube);
        let b = cache.shape(ShapeKind::WireCube);
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.data(a).map(MeshData::vertex_count), Some(24));
    }

    #[test]
    fn test_upload_is_lazy_and_cached() {
        let mut cache = MeshCache::new();
        let mut backend = RecordingBackend::new();
        let id = cache.shape(ShapeKind::Disc);
        assert_eq!(backend.meshes_created(), 0);

        let first = cache.gpu_handle(id, &mut backend);
        let second = cache.gpu_handle(id, &mut backend);
        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(backend.meshes_created(), 1);
        assert_eq!(cache.uploaded_count(), 1);
    }

    #[test]
    fn test_failed_upload_not_retried() {
        let mut cache = MeshCache::new();
        let mut backend = RecordingBackend::new();
        backend.fail_mesh_creation(true);
        let id = cache.shape(ShapeKind::Tube);

        assert!(cache.gpu_handle(id, &mut backend).is_none());
        backend.fail_mesh_creation(false);
        assert!(cache.gpu_handle(id, &mut backend).is_none());
        assert_eq!(backend.meshes_created(), 0);
    }

    #[test]
    fn test_removed_id_is_stale() {
        let mut cache = MeshCache::new();
        let mut backend = RecordingBackend::new();
        let id = cache.insert(MeshData::sequential(
            "segment",
            Topology::Lines,
            vec![Vec3::zeros(), Vec3::x()],
        ));
        cache.gpu_handle(id, &mut backend);

        assert!(cache.remove(id, &mut backend));
        assert!(!cache.remove(id, &mut backend));
        assert!(!cache.contains(id));
        assert!(cache.gpu_handle(id, &mut backend).is_none());
        assert_eq!(backend.meshes_released(), 1);
    }

    #[test]
    fn test_removed_shape_is_regenerated() {
        let mut cache = MeshCache::new();
        let mut backend = RecordingBackend::new();
        let old = cache.shape(ShapeKind::Plane);
        cache.remove(old, &mut backend);

        let new = cache.shape(ShapeKind::Plane);
        assert_ne!(old, new);
        assert!(cache.contains(new));
    }

    #[test]
    fn test_release_all_releases_uploaded_meshes() {
        let mut cache = MeshCache::new();
        let mut backend = RecordingBackend::new();
        let cube = cache.shape(ShapeKind::Cube);
        cache.shape(ShapeKind::Sphere);
        cache.gpu_handle(cube, &mut backend);

        assert_eq!(cache.release_all(&mut backend), 1);
        assert!(cache.is_empty());
        assert_eq!(backend.live_meshes(), 0);
    }
}
