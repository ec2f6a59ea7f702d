//! Cameras as seen by the overlay
//!
//! The overlay does not own cameras; the host describes each camera render
//! event with a [`CameraView`] so the render pass can decide whether debug
//! geometry belongs in that view.

/// Kind of render target a camera draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    /// In-game camera
    Game,
    /// Editor scene view
    SceneView,
    /// Asset or mesh preview window
    Preview,
    /// Reflection capture or other offscreen render
    Reflection,
}

/// Camera render event description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraView {
    /// Render target kind
    pub kind: CameraKind,
    /// Whether this is the host's primary game camera
    pub is_main: bool,
}

impl CameraView {
    /// The primary game camera
    pub const fn main_game() -> Self {
        Self {
            kind: CameraKind::Game,
            is_main: true,
        }
    }

    /// A secondary game camera
    pub const fn secondary_game() -> Self {
        Self {
            kind: CameraKind::Game,
            is_main: false,
        }
    }

    /// An editor scene view
    pub const fn scene_view() -> Self {
        Self {
            kind: CameraKind::SceneView,
            is_main: false,
        }
    }

    /// A camera of any other kind
    pub const fn of_kind(kind: CameraKind) -> Self {
        Self { kind, is_main: false }
    }

    /// Whether debug geometry is drawn into this view.
    ///
    /// Only the main game camera and scene views qualify; previews and
    /// offscreen captures never show overlay geometry.
    pub const fn shows_overlay(&self) -> bool {
        match self.kind {
            CameraKind::Game => self.is_main,
            CameraKind::SceneView => true,
            CameraKind::Preview | CameraKind::Reflection => false,
        }
    }
}
