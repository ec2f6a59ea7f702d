//! Render-state keys
//!
//! Every piece of overlay geometry is drawn with one of a small, fixed set of
//! fixed-function states. The key space is closed: two depth-test settings
//! times three cull modes, and a colored or shaded material for each.

use serde::{Deserialize, Serialize};

/// Number of distinct render states (depth test × cull mode)
pub const RENDER_STATE_COUNT: usize = 6;

/// Number of material slots (render states × {colored, shaded})
pub const MATERIAL_SLOT_COUNT: usize = RENDER_STATE_COUNT * 2;

/// Face culling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CullMode {
    /// No culling
    #[default]
    Off,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

impl CullMode {
    /// All cull modes in index order
    pub const ALL: [Self; 3] = [Self::Off, Self::Front, Self::Back];

    /// Dense index of this mode
    pub const fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Front => 1,
            Self::Back => 2,
        }
    }
}

/// Fixed-function state a job is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderState {
    /// Whether geometry is occluded by closer scene geometry
    pub depth_test: bool,
    /// Face culling mode
    pub cull_mode: CullMode,
}

impl RenderState {
    /// Create a render state
    pub const fn new(depth_test: bool, cull_mode: CullMode) -> Self {
        Self { depth_test, cull_mode }
    }

    /// Dense index in `0..RENDER_STATE_COUNT`
    pub const fn index(self) -> usize {
        (self.depth_test as usize) * CullMode::ALL.len() + self.cull_mode.index()
    }

    /// Every render state, in index order
    pub fn all() -> impl Iterator<Item = Self> {
        [false, true]
            .into_iter()
            .flat_map(|depth_test| CullMode::ALL.into_iter().map(move |cull| Self::new(depth_test, cull)))
    }
}

/// Identifies one material slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    /// Render state of the material
    pub state: RenderState,
    /// Shaded (lit) material instead of the flat colored one
    pub shaded: bool,
}

impl MaterialKey {
    /// Create a material key
    pub const fn new(state: RenderState, shaded: bool) -> Self {
        Self { state, shaded }
    }

    /// Colored material for a state
    pub const fn colored(state: RenderState) -> Self {
        Self::new(state, false)
    }

    /// Dense index in `0..MATERIAL_SLOT_COUNT`
    pub const fn index(self) -> usize {
        (self.shaded as usize) * RENDER_STATE_COUNT + self.state.index()
    }
}
