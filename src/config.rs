use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::BasecodeError;
use crate::model::DrawingMethod;
use crate::projection::FovMode;
use crate::texture::WrapMode;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
    pub model: ModelConfig,
    pub quad: QuadConfig,
    /// Log the frame rate every report interval.
    pub print_fps: bool,
    pub start_scene: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "rs-basecode".to_string(),
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Horizontal field of view in degrees.
    pub hfov: f32,
    pub near: f32,
    pub far: f32,
    pub mode: FovMode,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            hfov: 90.0,
            near: 1.0,
            far: 2000.0,
            mode: FovMode::HorizontalPlus,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Degrees, x = pitch, y = yaw.
    pub rotation: [f32; 3],
    pub speed: f32,
    pub pitch_sensitivity: f32,
    pub yaw_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 50.0],
            rotation: [0.0, 0.0, 0.0],
            speed: 200.0,
            pitch_sensitivity: 0.15,
            yaw_sensitivity: 0.15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub drawing_method: DrawingMethod,
    pub scale: f32,
    /// Radians per second around X, Y and Z.
    pub rotation_speed: [f32; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/models/cube.obj"),
            drawing_method: DrawingMethod::Arrays,
            scale: 4.0,
            rotation_speed: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuadConfig {
    pub size: f32,
    /// Shown while the quad faces away from the viewer.
    pub front_texture: Option<PathBuf>,
    pub back_texture: Option<PathBuf>,
    pub flip_textures: bool,
    /// How UVs outside [0, 1] are sampled.
    pub texture_wrap: WrapMode,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            front_texture: None,
            back_texture: None,
            flip_textures: false,
            texture_wrap: WrapMode::ClampToEdge,
        }
    }
}

impl AppConfig {
    /// Reads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, BasecodeError> {
        let Some(path) = path else {
            info!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let file = File::open(path).map_err(|source| BasecodeError::ConfigOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            BasecodeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{ "window": { "width": 800 }, "model": { "drawing_method": "elements" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.model.drawing_method, DrawingMethod::Elements);
        assert_eq!(config.model.scale, 4.0);
        assert_eq!(config.projection.far, 2000.0);
        assert_eq!(config.camera.position, [0.0, 0.0, 50.0]);
    }

    #[test]
    fn fov_mode_names() {
        let config: ProjectionConfig =
            serde_json::from_str(r#"{ "mode": "vertical_minus" }"#).unwrap();
        assert_eq!(config.mode, FovMode::VerticalMinus);
    }

    #[test]
    fn quad_texture_wrap_names() {
        let config: QuadConfig = serde_json::from_str(r#"{ "texture_wrap": "repeat" }"#).unwrap();
        assert_eq!(config.texture_wrap, WrapMode::Repeat);
        assert_eq!(QuadConfig::default().texture_wrap, WrapMode::ClampToEdge);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = AppConfig::load(Some(Path::new("does/not/exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
