//! Core overlay types shared by every subsystem

pub mod config;

pub use config::{OverlayConfig, COLORED_SHADER_NAME, SHADED_SHADER_NAME};
