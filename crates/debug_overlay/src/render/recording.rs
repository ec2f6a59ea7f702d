//! Recording backend
//!
//! An [`OverlayBackend`] that performs no GPU work and records every call as a
//! [`BackendCommand`]. Used for headless runs, tests and for inspecting the
//! exact command stream the render pass produces.

use std::collections::HashMap;

use crate::core::config::{COLORED_SHADER_NAME, SHADED_SHADER_NAME};
use crate::foundation::color::Color;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{
    BackendResult, MaterialDesc, MaterialHandle, MeshHandle, OverlayBackend, ShaderHandle,
};
use crate::render::primitives::{MeshData, Topology};
use crate::render::RenderError;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Material tint change
    SetMaterialColor {
        /// Target material
        material: MaterialHandle,
        /// New tint
        color: Color,
    },
    /// Material bind
    SetPass(MaterialHandle),
    /// Matrix push
    PushMatrix,
    /// Matrix multiply
    MultMatrix(Mat4),
    /// Matrix pop
    PopMatrix,
    /// Primitive begin
    Begin(Topology),
    /// Vertex color
    Color(Color),
    /// Vertex position
    Vertex(Vec3),
    /// Primitive end (one draw call)
    End,
    /// Mesh draw (one draw call)
    DrawMesh {
        /// Mesh drawn
        mesh: MeshHandle,
        /// Model matrix
        matrix: Mat4,
    },
}

/// Backend that records calls instead of rendering
#[derive(Debug, Default)]
pub struct RecordingBackend {
    shaders: HashMap<String, ShaderHandle>,
    shader_lookups: HashMap<String, usize>,
    materials: HashMap<MaterialHandle, MaterialDesc>,
    material_colors: HashMap<MaterialHandle, Color>,
    meshes: HashMap<MeshHandle, String>,
    commands: Vec<BackendCommand>,
    next_handle: u64,
    materials_created: usize,
    materials_released: usize,
    meshes_created: usize,
    meshes_released: usize,
    matrix_depth: usize,
    open_primitive: bool,
    fail_materials: bool,
    fail_meshes: bool,
}

impl RecordingBackend {
    /// Backend that knows the two overlay shaders
    pub fn new() -> Self {
        Self::with_shaders([COLORED_SHADER_NAME, SHADED_SHADER_NAME])
    }

    /// Backend that knows exactly the given shader names
    pub fn with_shaders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut backend = Self::default();
        for name in names {
            let handle = ShaderHandle(backend.allocate_handle());
            backend.shaders.insert(name.into(), handle);
        }
        backend
    }

    fn allocate_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Make subsequent material creation fail
    pub fn fail_material_creation(&mut self, fail: bool) {
        self.fail_materials = fail;
    }

    /// Make subsequent mesh creation fail
    pub fn fail_mesh_creation(&mut self, fail: bool) {
        self.fail_meshes = fail;
    }

    /// Recorded commands, in call order
    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping resources
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of draw calls recorded (primitive ends and mesh draws)
    pub fn draw_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BackendCommand::End | BackendCommand::DrawMesh { .. }))
            .count()
    }

    /// Number of material binds recorded
    pub fn set_pass_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BackendCommand::SetPass(_)))
            .count()
    }

    /// Number of vertices recorded
    pub fn vertex_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BackendCommand::Vertex(_)))
            .count()
    }

    /// How many times `name` was looked up
    pub fn shader_lookups(&self, name: &str) -> usize {
        self.shader_lookups.get(name).copied().unwrap_or(0)
    }

    /// Description a live material was created with
    pub fn material_desc(&self, material: MaterialHandle) -> Option<&MaterialDesc> {
        self.materials.get(&material)
    }

    /// Current tint of a live material
    pub fn material_color(&self, material: MaterialHandle) -> Option<Color> {
        self.material_colors.get(&material).copied()
    }

    /// Total materials ever created
    pub fn materials_created(&self) -> usize {
        self.materials_created
    }

    /// Total materials released
    pub fn materials_released(&self) -> usize {
        self.materials_released
    }

    /// Materials currently alive
    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Total meshes ever uploaded
    pub fn meshes_created(&self) -> usize {
        self.meshes_created
    }

    /// Total meshes released
    pub fn meshes_released(&self) -> usize {
        self.meshes_released
    }

    /// Meshes currently alive
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Name of a live mesh
    pub fn mesh_name(&self, mesh: MeshHandle) -> Option<&str> {
        self.meshes.get(&mesh).map(String::as_str)
    }

    /// Current matrix stack depth; zero when every push was popped
    pub fn matrix_depth(&self) -> usize {
        self.matrix_depth
    }
}

impl OverlayBackend for RecordingBackend {
    fn find_shader(&mut self, name: &str) -> Option<ShaderHandle> {
        *self.shader_lookups.entry(name.to_string()).or_default() += 1;
        self.shaders.get(name).copied()
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> BackendResult<MaterialHandle> {
        if self.fail_materials {
            return Err(RenderError::ResourceCreationFailed("material creation disabled".to_string()));
        }

        let handle = MaterialHandle(self.allocate_handle());
        self.materials.insert(handle, *desc);
        self.material_colors.insert(handle, desc.color);
        self.materials_created += 1;
        Ok(handle)
    }

    fn release_material(&mut self, material: MaterialHandle) {
        if self.materials.remove(&material).is_some() {
            self.material_colors.remove(&material);
            self.materials_released += 1;
        } else {
            log::warn!("Release of unknown material {:?}", material);
        }
    }

    fn set_material_color(&mut self, material: MaterialHandle, color: Color) {
        if let Some(current) = self.material_colors.get_mut(&material) {
            *current = color;
        }
        self.commands.push(BackendCommand::SetMaterialColor { material, color });
    }

    fn set_pass(&mut self, material: MaterialHandle) -> BackendResult<()> {
        if !self.materials.contains_key(&material) {
            return Err(RenderError::RenderingFailed(format!("unknown material {material:?}")));
        }
        self.commands.push(BackendCommand::SetPass(material));
        Ok(())
    }

    fn push_matrix(&mut self) {
        self.matrix_depth += 1;
        self.commands.push(BackendCommand::PushMatrix);
    }

    fn mult_matrix(&mut self, matrix: &Mat4) {
        self.commands.push(BackendCommand::MultMatrix(*matrix));
    }

    fn pop_matrix(&mut self) {
        self.matrix_depth = self.matrix_depth.saturating_sub(1);
        self.commands.push(BackendCommand::PopMatrix);
    }

    fn begin(&mut self, topology: Topology) {
        self.open_primitive = true;
        self.commands.push(BackendCommand::Begin(topology));
    }

    fn color(&mut self, color: Color) {
        self.commands.push(BackendCommand::Color(color));
    }

    fn vertex(&mut self, position: &Vec3) {
        self.commands.push(BackendCommand::Vertex(*position));
    }

    fn end(&mut self) -> BackendResult<()> {
        if !std::mem::take(&mut self.open_primitive) {
            return Err(RenderError::RenderingFailed("end() without begin()".to_string()));
        }
        self.commands.push(BackendCommand::End);
        Ok(())
    }

    fn create_mesh(&mut self, mesh: &MeshData) -> BackendResult<MeshHandle> {
        if self.fail_meshes {
            return Err(RenderError::ResourceCreationFailed(format!(
                "mesh upload disabled ({})",
                mesh.name
            )));
        }

        let handle = MeshHandle(self.allocate_handle());
        log::trace!(
            "Uploading mesh '{}' ({} position bytes, {} index bytes)",
            mesh.name,
            mesh.position_bytes().len(),
            mesh.index_bytes().len()
        );
        self.meshes.insert(handle, mesh.name.clone());
        self.meshes_created += 1;
        Ok(handle)
    }

    fn release_mesh(&mut self, mesh: MeshHandle) {
        if self.meshes.remove(&mesh).is_some() {
            self.meshes_released += 1;
        }
    }

    fn draw_mesh_now(&mut self, mesh: MeshHandle, matrix: &Mat4) -> BackendResult<()> {
        if !self.meshes.contains_key(&mesh) {
            return Err(RenderError::RenderingFailed(format!("unknown mesh {mesh:?}")));
        }
        self.commands.push(BackendCommand::DrawMesh { mesh, matrix: *matrix });
        Ok(())
    }
}
