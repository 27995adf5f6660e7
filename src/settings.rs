//! Solver settings
//!
//! Defaults reproduce the reference tuning. Settings can be stored as JSON;
//! missing fields fall back to their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How a pair's overlap correction feeds back into its implicit velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionMode {
    /// Move the pair apart and keep each particle's prior velocity, damped.
    /// Overlapping spawns settle into contact instead of flying apart.
    #[default]
    Positional,
    /// Classic Verlet: the correction displacement becomes velocity, so
    /// contacts bounce and piles come to rest quickly.
    Kinetic,
}

/// Tunable solver constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Constant acceleration applied to every particle each update
    pub gravity: Vec2,
    /// Fixed integration step, independent of frame time
    pub sub_step_dt: f32,
    /// Integration passes per update
    pub sub_steps: u32,
    /// Spatial hash cell edge length
    pub cell_size: f32,
    /// Fraction of velocity kept per integration step
    pub damping: f32,
    /// Fraction of velocity kept after a wall hit
    pub bounce: f32,
    /// Fraction of a pair's overlap corrected per sub-step
    pub collision_response: f32,
    /// Velocity handling after an overlap correction
    pub correction: CorrectionMode,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            sub_step_dt: SUB_STEP_DT,
            sub_steps: SUB_STEPS,
            cell_size: CELL_SIZE,
            damping: DAMPING,
            bounce: BOUNCE,
            collision_response: COLLISION_RESPONSE,
            correction: CorrectionMode::default(),
        }
    }
}

impl SolverSettings {
    /// Default settings with gravity switched off
    pub fn weightless() -> Self {
        Self {
            gravity: Vec2::ZERO,
            ..Self::default()
        }
    }

    /// Check every field is finite and in range
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::invalid("gravity must be finite"));
        }
        if !self.sub_step_dt.is_finite() || self.sub_step_dt <= 0.0 {
            return Err(SimError::invalid(format!(
                "sub_step_dt must be positive, got {}",
                self.sub_step_dt
            )));
        }
        if self.sub_steps == 0 {
            return Err(SimError::invalid("sub_steps must be at least 1"));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SimError::invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        for (name, value) in [
            ("damping", self.damping),
            ("bounce", self.bounce),
            ("collision_response", self.collision_response),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file, using defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded solver settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Solver settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let s = SolverSettings::default();
        assert_eq!(s.gravity, Vec2::new(0.0, 800.0));
        assert_eq!(s.sub_steps, 3);
        assert!((s.sub_step_dt - 1.0 / 120.0).abs() < 1e-9);
        assert_eq!(s.cell_size, 45.0);
        assert_eq!(s.damping, 0.99);
        assert_eq!(s.bounce, 0.95);
        assert_eq!(s.collision_response, 0.8);
        assert_eq!(s.correction, CorrectionMode::Positional);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = SolverSettings::from_json(
            r#"{ "sub_steps": 8, "gravity": [0.0, 0.0], "correction": "kinetic" }"#,
        )
        .unwrap();
        assert_eq!(s.sub_steps, 8);
        assert_eq!(s.correction, CorrectionMode::Kinetic);
        assert_eq!(s.gravity, Vec2::ZERO);
        assert_eq!(s.cell_size, CELL_SIZE);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = SolverSettings {
            cell_size: 30.0,
            ..SolverSettings::weightless()
        };
        let back = SolverSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = [
            SolverSettings { cell_size: 0.0, ..Default::default() },
            SolverSettings { sub_step_dt: -1.0, ..Default::default() },
            SolverSettings { sub_steps: 0, ..Default::default() },
            SolverSettings { damping: 1.5, ..Default::default() },
            SolverSettings { bounce: f32::NAN, ..Default::default() },
            SolverSettings { gravity: Vec2::new(f32::INFINITY, 0.0), ..Default::default() },
        ];
        for s in bad {
            assert!(matches!(s.validate(), Err(SimError::InvalidConfiguration(_))), "{:?}", s);
        }
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(SolverSettings::from_json("{ nope"), Err(SimError::Parse(_))));
        assert!(matches!(
            SolverSettings::from_json(r#"{ "cell_size": -4.0 }"#),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("verlet_arena_missing_settings.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(SolverSettings::load(&path).unwrap(), SolverSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "verlet_arena_settings_{}.json",
            std::process::id()
        ));
        let s = SolverSettings { sub_steps: 5, ..Default::default() };
        s.save(&path).unwrap();
        assert_eq!(SolverSettings::load(&path).unwrap(), s);
        let _ = std::fs::remove_file(&path);
    }
}
