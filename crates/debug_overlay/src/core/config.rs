//! # Overlay Configuration
//!
//! Runtime settings for the debug overlay: the master enable switch, the
//! shader names each material family resolves, and the initial sizing of the
//! job pools.
//!
//! ```toml
//! enabled = true
//! colored_shader = "Hidden/Internal-Colored"
//! shaded_shader = "Hidden/DbgDraw-Shaded"
//! fallback_shaders = ["Hidden/Internal-Colored", "Unlit/Color"]
//! vertex_buffer_capacity = 32
//! primitive_job_capacity = 64
//! mesh_job_capacity = 64
//! log_level = "info"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// Shader used by every colored (unlit, vertex-colored) material
pub const COLORED_SHADER_NAME: &str = "Hidden/Internal-Colored";

/// Shader used by every shaded material.
///
/// Hosts that strip unreferenced shaders from builds must keep this one; see
/// [`crate::build_support`].
pub const SHADED_SHADER_NAME: &str = "Hidden/DbgDraw-Shaded";

/// Fallback shader names tried, in order, when a configured shader is missing
pub const DEFAULT_FALLBACK_SHADERS: [&str; 2] = ["Hidden/Internal-Colored", "Unlit/Color"];

/// Configuration for a [`crate::DebugDraw`] context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Initial state of the master enable switch
    pub enabled: bool,
    /// Shader name for colored materials
    pub colored_shader: String,
    /// Shader name for shaded materials
    pub shaded_shader: String,
    /// Ordered fallback shader names
    pub fallback_shaders: Vec<String>,
    /// Capacity of freshly allocated vertex buffers
    pub vertex_buffer_capacity: usize,
    /// Initial capacity of the primitive job list
    pub primitive_job_capacity: usize,
    /// Initial capacity of the mesh job list
    pub mesh_job_capacity: usize,
    /// Log filter used by hosts that let the overlay initialize logging
    pub log_level: String,
}

impl OverlayConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            enabled: true,
            colored_shader: COLORED_SHADER_NAME.to_string(),
            shaded_shader: SHADED_SHADER_NAME.to_string(),
            fallback_shaders: DEFAULT_FALLBACK_SHADERS.iter().map(ToString::to_string).collect(),
            vertex_buffer_capacity: 32,
            primitive_job_capacity: 64,
            mesh_job_capacity: 64,
            log_level: "info".to_string(),
        }
    }

    /// Set the initial enable state
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the colored and shaded shader names
    #[must_use]
    pub fn with_shaders(mut self, colored: impl Into<String>, shaded: impl Into<String>) -> Self {
        self.colored_shader = colored.into();
        self.shaded_shader = shaded.into();
        self
    }

    /// Replace the fallback shader list
    #[must_use]
    pub fn with_fallback_shaders<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_shaders = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the capacity of new vertex buffers
    #[must_use]
    pub fn with_vertex_buffer_capacity(mut self, capacity: usize) -> Self {
        self.vertex_buffer_capacity = capacity;
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for OverlayConfig {
    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.colored_shader.is_empty() || self.shaded_shader.is_empty() {
            return Err(ConfigError::Invalid("shader names cannot be empty".to_string()));
        }

        if self.vertex_buffer_capacity == 0 {
            return Err(ConfigError::Invalid(
                "vertex buffer capacity must be at least 1".to_string(),
            ));
        }

        if self.fallback_shaders.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid("fallback shader names cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OverlayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shaded_shader, SHADED_SHADER_NAME);
        assert_eq!(config.fallback_shaders, vec!["Hidden/Internal-Colored", "Unlit/Color"]);
    }

    #[test]
    fn test_zero_buffer_capacity_rejected() {
        let config = OverlayConfig::default().with_vertex_buffer_capacity(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: OverlayConfig = toml::from_str("enabled = false\nmesh_job_capacity = 8\n").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.mesh_job_capacity, 8);
        assert_eq!(config.vertex_buffer_capacity, 32);
    }

    #[test]
    fn test_ron_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("overlay_config_{}.ron", std::process::id()));
        let config = OverlayConfig::default().with_shaders("A", "B");
        config.save_to_file(&path).unwrap();
        let loaded = OverlayConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_rejected_on_load() {
        let path = std::env::temp_dir().join(format!("overlay_invalid_{}.toml", std::process::id()));
        std::fs::write(&path, "vertex_buffer_capacity = 0\n").unwrap();
        let result = OverlayConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = OverlayConfig::load_from_file("overlay.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
