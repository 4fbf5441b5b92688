//! # Simulator camera descriptors

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::fmt;

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::robot::Position3D;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Viewpoint behaviours the simulator offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    Free,
    Follow,
    Orbit,
    FirstPerson,
    TopDown,
    Side,
    Fixed,
    Cinematic,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Full camera parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub mode: CameraMode,
    pub position: Position3D,

    /// Point the camera looks at.
    pub target: Position3D,

    /// Vertical field of view in degrees.
    pub fov: f64,

    pub near: f64,
    pub far: f64,
    pub zoom: f64,
}

/// Tuning of the robot-follow behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowCameraParams {
    /// Trailing distance in metres.
    pub distance: f64,

    /// Height above the robot in metres.
    pub height: f64,

    /// Yaw offset from straight behind, degrees.
    pub angle: f64,

    /// 0 snaps instantly, 1 never catches up.
    pub smoothness: f64,

    /// Metres of anticipation along the travel direction.
    pub look_ahead: f64,
}

/// Live camera state as the simulator reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub mode: CameraMode,
    pub config: CameraConfig,
    pub is_transitioning: bool,
    pub controls_enabled: bool,

    /// Name of the scene object being tracked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CameraMode {
    pub const ALL: [CameraMode; 8] = [
        CameraMode::Free,
        CameraMode::Follow,
        CameraMode::Orbit,
        CameraMode::FirstPerson,
        CameraMode::TopDown,
        CameraMode::Side,
        CameraMode::Fixed,
        CameraMode::Cinematic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CameraMode::Free => "free",
            CameraMode::Follow => "follow",
            CameraMode::Orbit => "orbit",
            CameraMode::FirstPerson => "first_person",
            CameraMode::TopDown => "top_down",
            CameraMode::Side => "side",
            CameraMode::Fixed => "fixed",
            CameraMode::Cinematic => "cinematic",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::validate::{self, ValidateError};
    use serde_json::json;

    fn sample_config() -> CameraConfig {
        CameraConfig {
            mode: CameraMode::Follow,
            position: Position3D::new(0.0, 1.5, -2.0),
            target: Position3D::new(0.0, 0.3, 0.0),
            fov: 60.0,
            near: 0.1,
            far: 100.0,
            zoom: 1.0,
        }
    }

    #[test]
    fn mode_spellings_round_trip() {
        assert_eq!(
            serde_json::to_value(CameraMode::FirstPerson).unwrap(),
            json!("first_person")
        );
        assert_eq!(
            serde_json::to_value(CameraMode::TopDown).unwrap(),
            json!("top_down")
        );

        for mode in CameraMode::ALL.iter() {
            let value = serde_json::to_value(mode).unwrap();
            assert_eq!(value, json!(mode.as_str()));
            assert_eq!(serde_json::from_value::<CameraMode>(value).unwrap(), *mode);
        }
    }

    #[test]
    fn state_uses_camel_case_and_optional_target() {
        let state = CameraState {
            mode: CameraMode::Follow,
            config: sample_config(),
            is_transitioning: false,
            controls_enabled: true,
            target: Some(String::from("marty")),
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["isTransitioning"], json!(false));
        assert_eq!(value["controlsEnabled"], json!(true));
        assert_eq!(value["target"], json!("marty"));

        let free = CameraState {
            target: None,
            ..state
        };
        let value = serde_json::to_value(&free).unwrap();
        assert_eq!(value.get("target"), None);
    }

    #[test]
    fn follow_params_spell_look_ahead() {
        let params = FollowCameraParams {
            distance: 1.5,
            height: 0.8,
            angle: 0.0,
            smoothness: 0.2,
            look_ahead: 0.5,
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["lookAhead"], json!(0.5));
        assert_eq!(
            serde_json::from_value::<FollowCameraParams>(value).unwrap(),
            params
        );
    }

    #[test]
    fn config_missing_field_is_reported() {
        let err = validate::typed::<CameraConfig>(&json!({
            "mode": "free",
            "position": {"x": 0.0, "y": 0.0, "z": 0.0},
            "target": {"x": 0.0, "y": 0.0, "z": 0.0},
            "near": 0.1,
            "far": 100.0,
            "zoom": 1.0,
        }))
        .unwrap_err();

        assert_eq!(err, ValidateError::MissingField(String::from("fov")));
    }
}
