//! Centralized rendering options with TOML file support.
//!
//! All tweakable settings (camera projection, flight speed, scene geometry,
//! post-processing, layer toggles) are consolidated here. Options serialize
//! to/from TOML so a run can be reproduced from a file.

mod camera;
mod display;
mod flight;
mod post_processing;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use flight::FlightOptions;
pub use post_processing::PostProcessingOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WormholeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[flight]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Fly-through speed and look-ahead.
    pub flight: FlightOptions,
    /// Tube and box geometry.
    pub scene: SceneOptions,
    /// Fog, bloom and tone mapping.
    pub post_processing: PostProcessingOptions,
    /// Line layer toggles.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Io`] if the file cannot be read and
    /// [`WormholeError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, WormholeError> {
        let content =
            std::fs::read_to_string(path).map_err(WormholeError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, WormholeError> {
        toml::from_str(content)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty-printed TOML.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::OptionsParse`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, WormholeError> {
        toml::to_string_pretty(self)
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), WormholeError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WormholeError::Io)?;
        }
        std::fs::write(path, content).map_err(WormholeError::Io)
    }

    /// Check that every value can be used to build the scene and renderer.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] naming the first bad field.
    pub fn validate(&self) -> Result<(), WormholeError> {
        self.flight.follower_config().validate()?;

        let cam = &self.camera;
        if !(cam.fovy > 0.0 && cam.fovy < 180.0) {
            return Err(invalid("camera.fovy must be in (0, 180)"));
        }
        if !(cam.znear > 0.0 && cam.zfar > cam.znear) {
            return Err(invalid("camera.znear must be > 0 and < camera.zfar"));
        }
        if !cam.zfar.is_finite() {
            return Err(invalid("camera.zfar must be finite"));
        }

        let scene = &self.scene;
        if scene.tubular_segments < 3 {
            return Err(invalid("scene.tubular_segments must be at least 3"));
        }
        if scene.radial_segments < 3 {
            return Err(invalid("scene.radial_segments must be at least 3"));
        }
        if !(scene.tube_radius > 0.0 && scene.tube_radius.is_finite()) {
            return Err(invalid("scene.tube_radius must be positive"));
        }
        if !(scene.box_size > 0.0 && scene.box_size.is_finite()) {
            return Err(invalid("scene.box_size must be positive"));
        }
        if !(0.0..180.0).contains(&scene.edge_threshold_deg) {
            return Err(invalid("scene.edge_threshold_deg must be in [0, 180)"));
        }
        if !scene.jitter_bias.is_finite() {
            return Err(invalid("scene.jitter_bias must be finite"));
        }

        let pp = &self.post_processing;
        if !(0.0..=1.0).contains(&pp.bloom_radius) {
            return Err(invalid("post_processing.bloom_radius must be in [0, 1]"));
        }
        if !(pp.bloom_strength >= 0.0 && pp.bloom_strength.is_finite()) {
            return Err(invalid(
                "post_processing.bloom_strength must be finite and >= 0",
            ));
        }
        if !(pp.bloom_threshold >= 0.0 && pp.bloom_threshold.is_finite()) {
            return Err(invalid(
                "post_processing.bloom_threshold must be finite and >= 0",
            ));
        }
        if !(pp.fog_density >= 0.0 && pp.fog_density.is_finite()) {
            return Err(invalid(
                "post_processing.fog_density must be finite and >= 0",
            ));
        }
        if !(pp.exposure > 0.0 && pp.exposure.is_finite()) {
            return Err(invalid(
                "post_processing.exposure must be finite and > 0",
            ));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> WormholeError {
    WormholeError::InvalidOptions(msg.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn seed_round_trips_when_set() {
        let mut opts = Options::default();
        opts.scene.seed = Some(42);
        let parsed = Options::from_toml(&opts.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.scene.seed, Some(42));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[flight]
speed_factor = 0.5
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.flight.speed_factor, 0.5);
        // Everything else should be default
        assert_eq!(opts.flight.loop_duration_ms, 20_000.0);
        assert_eq!(opts.scene.box_count, 55);
        assert_eq!(opts.post_processing.bloom_strength, 3.5);
        assert!(opts.display.show_tube_edges);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[flight\nspeed_factor = ").unwrap_err();
        assert!(matches!(err, WormholeError::OptionsParse(_)));
    }

    #[test]
    fn defaults_validate() {
        Options::default().validate().unwrap();
    }

    #[test]
    fn validation_names_the_bad_field() {
        let mut opts = Options::default();
        opts.scene.radial_segments = 2;
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("radial_segments"));

        let mut opts = Options::default();
        opts.flight.loop_duration_ms = 0.0;
        assert!(matches!(
            opts.validate(),
            Err(WormholeError::InvalidOptions(_))
        ));

        let mut opts = Options::default();
        opts.post_processing.bloom_radius = 1.5;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera.znear = 0.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let cases: [(&str, fn(&mut Options)); 6] = [
            ("jitter_bias", |o| o.scene.jitter_bias = f32::NAN),
            ("zfar", |o| o.camera.zfar = f32::INFINITY),
            ("bloom_strength", |o| {
                o.post_processing.bloom_strength = f32::INFINITY;
            }),
            ("bloom_threshold", |o| {
                o.post_processing.bloom_threshold = f32::INFINITY;
            }),
            ("fog_density", |o| o.post_processing.fog_density = f32::INFINITY),
            ("exposure", |o| o.post_processing.exposure = f32::INFINITY),
        ];
        for (field, corrupt) in cases {
            let mut opts = Options::default();
            corrupt(&mut opts);
            let err = opts.validate().unwrap_err();
            assert!(
                matches!(err, WormholeError::InvalidOptions(_)),
                "{field}: {err}"
            );
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn nan_jitter_from_toml_fails_validation() {
        let opts =
            Options::from_toml("[scene]\njitter_bias = nan\nseed = 1\n").unwrap();
        assert!(opts.scene.jitter_bias.is_nan());
        assert!(opts.validate().is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("wormhole-options-{}", std::process::id()));
        let path = dir.join("opts.toml");
        let mut opts = Options::default();
        opts.flight.speed_factor = 1.25;
        opts.display.show_centerline = true;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Options::load(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, WormholeError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["camera", "flight", "scene", "post_processing", "display"]
        {
            assert!(props.contains_key(section), "missing {section}");
        }

        // Skipped fields stay out of the schema
        let scene = &props["scene"]["properties"];
        assert!(scene.get("box_count").is_some());
        assert!(scene.get("seed").is_none());
        assert!(scene.get("jitter_bias").is_none());
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
    }
}
