//! Configuration system
//!
//! TOML-backed engine configuration with shader path resolution for
//! applications launched from different working directories.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Configuration trait for TOML-backed config types
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Shader source configuration
///
/// Paths to the GLSL sources for the standard pipeline and the water
/// vertex variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the standard vertex shader source
    pub vertex_shader_path: String,
    /// Path to the shared fragment shader source
    pub fragment_shader_path: String,
    /// Path to the water-variant vertex shader source
    pub water_vertex_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration from explicit paths
    pub fn new(
        vertex_path: impl Into<String>,
        fragment_path: impl Into<String>,
        water_vertex_path: impl Into<String>,
    ) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
            water_vertex_shader_path: water_vertex_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries common shader locations, useful for applications run from
    /// different working directories (the workspace root, a member crate,
    /// or an installed layout).
    pub fn with_path_resolution(
        base_vertex: &str,
        base_fragment: &str,
        base_water_vertex: &str,
    ) -> Self {
        let shader_dirs = ["shaders/", "resources/shaders/", "../shaders/", "../../shaders/", "./"];

        let resolve = |file: &str| {
            for dir in &shader_dirs {
                let candidate = format!("{}{}", dir, file);
                if Path::new(&candidate).exists() {
                    return candidate;
                }
            }
            format!("shaders/{}", file)
        };

        Self {
            vertex_shader_path: resolve(base_vertex),
            fragment_shader_path: resolve(base_fragment),
            water_vertex_shader_path: resolve(base_water_vertex),
        }
    }

    /// Validate that all shader source files exist
    pub fn validate(&self) -> Result<(), String> {
        for path in [
            &self.vertex_shader_path,
            &self.fragment_shader_path,
            &self.water_vertex_shader_path,
        ] {
            if !Path::new(path).exists() {
                return Err(format!("Shader source not found: {}", path));
            }
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("default.vert", "default.frag", "water.vert")
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// VSync setting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Reef Engine Application".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,
    /// Shader configuration
    pub shaders: ShaderConfig,
}

impl Config for EngineConfig {}
