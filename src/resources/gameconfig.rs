//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup (the defaults reproduce the original scene) and
//! methods to load configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//! vsync = true
//!
//! [render]
//! width = 800
//! height = 600
//!
//! [movement]
//! x_step = 2
//! y_step = 0.1
//! z_step = 0.05
//! x_limit = 150
//! y_top = -5
//! y_bottom = 0
//! time_scaled = false
//!
//! [animation]
//! idle = 1
//! walk = 4
//! fade = 0.3
//! selection = first_match
//!
//! [facing]
//! left = -90
//! right = 90
//! front = 0
//! back = 180
//!
//! [character]
//! model = ./assets/models/cibus_ninja.glb
//! height = -5
//! depth = -10
//!
//! [camera]
//! fovy = 75
//!
//! [background]
//! far = ./assets/images/treesBack_b.png
//! mid = ./assets/images/treesMiddle_b.png
//! near = ./assets/images/treesFront_b.png
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 800;
const DEFAULT_RENDER_HEIGHT: u32 = 600;
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const DEFAULT_MODEL_PATH: &str = "./assets/models/cibus_ninja.glb";
const DEFAULT_FAR_LAYER: &str = "./assets/images/treesBack_b.png";
const DEFAULT_MID_LAYER: &str = "./assets/images/treesMiddle_b.png";
const DEFAULT_NEAR_LAYER: &str = "./assets/images/treesFront_b.png";

/// How the controller picks facing and clip when several directions are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Left, right, none held, up, down; the first matching rule wins.
    #[default]
    FirstMatch,
    /// Every matching rule is applied in order so the last one wins. Up and
    /// down only count while they actually move the character.
    LastMatch,
}

impl SelectionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first_match" | "first" => Some(Self::FirstMatch),
            "last_match" | "last" => Some(Self::LastMatch),
            _ => None,
        }
    }
}

/// Per-tick movement steps and the area the character may walk in.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Horizontal screen step per tick.
    pub x_step: f32,
    /// Vertical screen step per tick.
    pub y_step: f32,
    /// 3D depth step per tick, applied together with `y_step`.
    pub z_step: f32,
    /// Horizontal bound; beyond it the background scrolls instead.
    pub x_limit: f32,
    pub y_top: f32,
    pub y_bottom: f32,
    /// Scale steps by frame time (60 Hz reference) instead of per tick.
    pub time_scaled: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            x_step: 2.0,
            y_step: 0.1,
            z_step: 0.05,
            x_limit: 150.0,
            y_top: -5.0,
            y_bottom: 0.0,
            time_scaled: false,
        }
    }
}

/// Clip indices (load order of the model) and crossfade timing.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub idle_clip: usize,
    pub walk_clip: usize,
    /// Crossfade duration in seconds.
    pub fade_seconds: f32,
    pub selection: SelectionPolicy,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            idle_clip: 1,
            walk_clip: 4,
            fade_seconds: 0.3,
            selection: SelectionPolicy::default(),
        }
    }
}

/// Yaw in degrees around +Y for each facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingAngles {
    pub left: f32,
    pub right: f32,
    pub front: f32,
    pub back: f32,
}

// The model faces +Z, towards the camera, at yaw 0.
impl Default for FacingAngles {
    fn default() -> Self {
        Self {
            left: -90.0,
            right: 90.0,
            front: 0.0,
            back: 180.0,
        }
    }
}

/// Game configuration resource.
///
/// Stores window and render settings plus every gameplay constant of the
/// scene. Values not present in the INI file keep their defaults.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical composite width in pixels.
    pub render_width: u32,
    /// Logical composite height in pixels.
    pub render_height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    pub movement: MovementConfig,
    pub animation: AnimationConfig,
    pub facing: FacingAngles,
    /// Character model (`.glb` or `.gltf`).
    pub model_path: PathBuf,
    /// Fixed height of the model in the 3D scene.
    pub model_height: f32,
    /// Initial depth of the model in the 3D scene.
    pub model_depth: f32,
    /// Vertical field of view of the 3D camera, in degrees.
    pub camera_fovy: f32,
    pub far_layer: PathBuf,
    pub mid_layer: PathBuf,
    pub near_layer: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            movement: MovementConfig::default(),
            animation: AnimationConfig::default(),
            facing: FacingAngles::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_height: -5.0,
            model_depth: -10.0,
            camera_fovy: 75.0,
            far_layer: PathBuf::from(DEFAULT_FAR_LAYER),
            mid_layer: PathBuf::from(DEFAULT_MID_LAYER),
            near_layer: PathBuf::from(DEFAULT_NEAR_LAYER),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, selection={:?}, time_scaled={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.animation.selection,
            self.movement.time_scaled
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| {
            config
                .getuint(section, key)
                .ok()
                .flatten()
                .map(|v| v as u32)
        };
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };
        let boolean = |section: &str, key: &str| config.getbool(section, key).ok().flatten();
        let path = |section: &str, key: &str| config.get(section, key).map(PathBuf::from);

        // [render] section
        if let Some(width) = uint("render", "width") {
            self.render_width = width;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height;
        }

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps;
        }
        if let Some(vsync) = boolean("window", "vsync") {
            self.vsync = vsync;
        }

        // [movement] section
        let movement = &mut self.movement;
        for (key, field) in [
            ("x_step", &mut movement.x_step),
            ("y_step", &mut movement.y_step),
            ("z_step", &mut movement.z_step),
            ("x_limit", &mut movement.x_limit),
            ("y_top", &mut movement.y_top),
            ("y_bottom", &mut movement.y_bottom),
        ] {
            if let Some(value) = float("movement", key) {
                *field = value;
            }
        }
        if let Some(time_scaled) = boolean("movement", "time_scaled") {
            movement.time_scaled = time_scaled;
        }
        if movement.y_top > movement.y_bottom {
            warn!(
                "movement.y_top ({}) is below y_bottom ({}); swapping",
                movement.y_top, movement.y_bottom
            );
            std::mem::swap(&mut movement.y_top, &mut movement.y_bottom);
        }

        // [animation] section
        if let Some(idle) = uint("animation", "idle") {
            self.animation.idle_clip = idle as usize;
        }
        if let Some(walk) = uint("animation", "walk") {
            self.animation.walk_clip = walk as usize;
        }
        if let Some(fade) = float("animation", "fade") {
            self.animation.fade_seconds = fade.max(0.0);
        }
        if let Some(selection) = config.get("animation", "selection") {
            match SelectionPolicy::parse(&selection) {
                Some(policy) => self.animation.selection = policy,
                None => warn!(
                    "Unknown animation.selection '{}', keeping {:?}",
                    selection, self.animation.selection
                ),
            }
        }

        // [facing] section
        let facing = &mut self.facing;
        for (key, field) in [
            ("left", &mut facing.left),
            ("right", &mut facing.right),
            ("front", &mut facing.front),
            ("back", &mut facing.back),
        ] {
            if let Some(value) = float("facing", key) {
                *field = value;
            }
        }

        // [character] section
        if let Some(model) = path("character", "model") {
            self.model_path = model;
        }
        if let Some(height) = float("character", "height") {
            self.model_height = height;
        }
        if let Some(depth) = float("character", "depth") {
            self.model_depth = depth;
        }

        // [camera] section
        if let Some(fovy) = float("camera", "fovy") {
            self.camera_fovy = fovy;
        }

        // [background] section
        if let Some(far) = path("background", "far") {
            self.far_layer = far;
        }
        if let Some(mid) = path("background", "mid") {
            self.mid_layer = mid;
        }
        if let Some(near) = path("background", "near") {
            self.near_layer = near;
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_scene() {
        let config = GameConfig::new();
        assert_eq!((config.render_width, config.render_height), (800, 600));
        assert_eq!(config.movement.x_step, 2.0);
        assert_eq!(config.movement.x_limit, 150.0);
        assert_eq!(config.movement.y_top, -5.0);
        assert_eq!(config.movement.y_bottom, 0.0);
        assert!(!config.movement.time_scaled);
        assert_eq!(config.animation.idle_clip, 1);
        assert_eq!(config.animation.walk_clip, 4);
        assert_eq!(config.animation.fade_seconds, 0.3);
        assert_eq!(config.animation.selection, SelectionPolicy::FirstMatch);
    }

    #[test]
    fn default_yaws_are_degrees_for_a_camera_facing_model() {
        let angles = GameConfig::new().facing;
        assert_eq!(angles.front, 0.0);
        assert_eq!(angles.back, 180.0);
        assert_eq!(angles.left, -90.0);
        assert_eq!(angles.right, 90.0);
        // Front and back are opposite, left and right mirror each other.
        assert_eq!((angles.back - angles.front).abs(), 180.0);
        assert_eq!(angles.left, -angles.right);
    }

    #[test]
    fn partial_ini_keeps_other_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[movement]\nx_step = 4\ntime_scaled = true\n[animation]\nselection = last_match\n")
            .unwrap();
        assert_eq!(config.movement.x_step, 4.0);
        assert!(config.movement.time_scaled);
        assert_eq!(config.movement.y_step, 0.1);
        assert_eq!(config.animation.selection, SelectionPolicy::LastMatch);
        assert_eq!(config.window_size(), (800, 600));
    }

    #[test]
    fn unknown_selection_keeps_default() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[animation]\nselection = sideways\n")
            .unwrap();
        assert_eq!(config.animation.selection, SelectionPolicy::FirstMatch);
    }

    #[test]
    fn inverted_vertical_limits_are_swapped() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[movement]\ny_top = 3\ny_bottom = -3\n")
            .unwrap();
        assert_eq!(config.movement.y_top, -3.0);
        assert_eq!(config.movement.y_bottom, 3.0);
    }

    #[test]
    fn load_from_file_reads_paths_and_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[window]\nwidth = 1280\nheight = 720\nvsync = false\n\n[character]\nmodel = ./other.glb\n\n[facing]\nback = 170"
        )
        .unwrap();

        let mut config = GameConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.window_size(), (1280, 720));
        assert!(!config.vsync);
        assert_eq!(config.model_path, PathBuf::from("./other.glb"));
        assert_eq!(config.facing.back, 170.0);
        assert_eq!(config.facing.left, -90.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.render_width, 800);
    }

    #[test]
    fn selection_policy_parse() {
        assert_eq!(
            SelectionPolicy::parse(" First_Match "),
            Some(SelectionPolicy::FirstMatch)
        );
        assert_eq!(SelectionPolicy::parse("last"), Some(SelectionPolicy::LastMatch));
        assert_eq!(SelectionPolicy::parse(""), None);
    }
}
