//! Build-time support
//!
//! Hosts that strip shaders nobody references from their builds keep an
//! "always included" shader list. The shaded overlay material is created by
//! name at runtime, so its shader has to be on that list whenever the overlay
//! is compiled in, and should be taken off it when it is not.

use crate::core::config::SHADED_SHADER_NAME;
use crate::draw::IS_SUPPORTED;

/// Bring `shaders` in line with the `enabled` feature.
///
/// With the feature, [`SHADED_SHADER_NAME`] is appended once if absent.
/// Without it, every occurrence is removed. Returns whether the list changed.
pub fn sync_always_included_shaders(shaders: &mut Vec<String>) -> bool {
    sync_shader(shaders, SHADED_SHADER_NAME, IS_SUPPORTED)
}

fn sync_shader(shaders: &mut Vec<String>, name: &str, include: bool) -> bool {
    if include {
        if shaders.iter().any(|shader| shader == name) {
            return false;
        }
        shaders.push(name.to_string());
        log::info!("Added '{}' to always-included shaders", name);
        true
    } else {
        let before = shaders.len();
        shaders.retain(|shader| shader != name);
        let removed = before - shaders.len();
        if removed > 0 {
            log::info!("Removed {} '{}' entries from always-included shaders", removed, name);
        }
        removed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_include_adds_once() {
        let mut shaders = list(&["Standard"]);
        assert!(sync_shader(&mut shaders, SHADED_SHADER_NAME, true));
        assert!(!sync_shader(&mut shaders, SHADED_SHADER_NAME, true));
        assert_eq!(shaders, list(&["Standard", SHADED_SHADER_NAME]));
    }

    #[test]
    fn test_exclude_removes_every_occurrence() {
        let mut shaders = list(&[SHADED_SHADER_NAME, "Standard", SHADED_SHADER_NAME]);
        assert!(sync_shader(&mut shaders, SHADED_SHADER_NAME, false));
        assert_eq!(shaders, list(&["Standard"]));
        assert!(!sync_shader(&mut shaders, SHADED_SHADER_NAME, false));
    }

    #[test]
    fn test_public_sync_follows_feature() {
        let mut shaders = Vec::new();
        sync_always_included_shaders(&mut shaders);
        let present = shaders.iter().any(|shader| shader == SHADED_SHADER_NAME);
        assert_eq!(present, IS_SUPPORTED);
    }
}
