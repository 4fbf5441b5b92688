//! # Trajectory command parameter records
//!
//! Each movement the robot can perform takes a parameter bundle defined here.
//! The records document the valid range and default of every field. Ranges
//! are enforced by [`validate`](WalkParams::validate) before a command is
//! handed to the transport, defaults are applied by the firmware when a field
//! is omitted (use [`with_defaults`](WalkParams::with_defaults) to see the
//! resolved command).
//!
//! [`TrajCmd`] ties the records to their REST endpoints and doubles as the
//! command grammar of the interactive CLI.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::convert::{Infallible, TryFrom};
use std::str::FromStr;

// External
use serde::{Deserialize, Serialize};
use structopt::clap::AppSettings;
use structopt::StructOpt;

// Internal
use crate::api::{Endpoint, RestParams, RicRequest};
use crate::robot::{EyePose, JointId, Side, StopType};
use crate::validate::{check_range, ValidateError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A joint referenced either by numeric ID or by canonical name.
///
/// Commands accept both forms on the wire, `0` and `"left hip"` select the
/// same joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JointSelector {
    Id(u8),
    Name(String),
}

/// A trajectory command with its parameters.
///
/// This is the builder side of the catalogue: each variant knows its REST
/// endpoint and validates its parameters against the documented ranges.
#[derive(Debug, Clone, PartialEq, StructOpt)]
#[structopt(global_settings = &[AppSettings::AllowNegativeNumbers])]
pub enum TrajCmd {
    /// Move to the ready pose
    #[structopt(name = "get-ready")]
    GetReady,

    /// Stand up straight
    #[structopt(name = "stand-straight")]
    StandStraight,

    /// Walk a number of steps
    Walk(WalkParams),

    /// Kick with one foot
    Kick(KickParams),

    /// Wave an arm
    Wave,

    /// Lean in a direction
    Lean(LeanParams),

    /// Step sideways
    Sidestep(SidestepParams),

    /// Walk in a circle
    Circle,

    /// Perform the dance routine
    Dance,

    /// Wiggle on the spot
    Wiggle,

    /// Move a single joint to a position
    Joint(MoveJointParams),

    /// Move the eyes to a predefined pose
    Eyes {
        /// One of angry, excited, normal, wide or wiggle
        pose: EyePose,
    },

    /// Pause the movement queue
    Pause,

    /// Resume a paused movement queue
    Resume,

    /// Stop, optionally choosing how
    Stop(StopParams),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the walk trajectory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct WalkParams {
    /// Number of steps to take
    #[structopt(short = "n", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_steps: Option<u32>,

    /// Foot to lead with, left, right or auto
    #[structopt(short = "f", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_foot: Option<Side>,

    /// Turn per step in degrees, -100 to 100
    #[structopt(short = "t", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<f64>,

    /// Step length in mm
    #[structopt(short = "l", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_length: Option<f64>,

    /// Time per step in ms
    #[structopt(short = "m", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_time: Option<u32>,
}

/// Parameters for the lean trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct LeanParams {
    /// Direction to lean, left, right, forward or back
    pub direction: Side,

    /// Lean amount in degrees, -60 to 60
    #[structopt(short = "a", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Movement time in ms
    #[structopt(short = "m", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_time: Option<u32>,
}

/// Parameters for the sidestep trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct SidestepParams {
    /// Side to step towards, left or right
    pub side: Side,

    /// Number of steps
    #[structopt(short = "n", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,

    /// Step length in mm
    #[structopt(short = "l", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_length: Option<f64>,

    /// Time per step in ms
    #[structopt(short = "m", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_time: Option<u32>,
}

/// Parameters for the kick trajectory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct KickParams {
    /// Foot to kick with, left or right
    #[structopt(short = "s", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,

    /// Twist while kicking, in degrees
    #[structopt(short = "t", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twist: Option<f64>,

    /// Movement time in ms
    #[structopt(short = "m", long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_time: Option<u32>,
}

/// Parameters for moving both arms at once.
///
/// There is no dedicated REST endpoint for this bundle, consumers issue it
/// over the WebSocket command channel or expand it into joint moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct ArmsParams {
    /// Left arm angle in degrees, -100 to 100
    pub left_angle: f64,

    /// Right arm angle in degrees, -100 to 100
    pub right_angle: f64,

    /// Movement time in ms
    pub move_time: u32,
}

/// Parameters for moving a single joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct MoveJointParams {
    /// Joint ID (0 to 8) or name, for example 0 or left-hip
    pub joint: JointSelector,

    /// Target angle in degrees
    pub position: f64,

    /// Movement time in ms
    pub move_time: u32,
}

/// Parameters for the stop action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, StructOpt)]
#[serde(rename_all = "camelCase")]
pub struct StopParams {
    /// How to stop, defaults to the firmware's standard stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_type: Option<StopType>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajCmd {
    /// The REST endpoint this command is sent to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            TrajCmd::GetReady => Endpoint::TrajGetReady,
            TrajCmd::StandStraight => Endpoint::TrajStandStraight,
            TrajCmd::Walk(_) => Endpoint::TrajWalk,
            TrajCmd::Kick(_) => Endpoint::TrajKick,
            TrajCmd::Wave => Endpoint::TrajWave,
            TrajCmd::Lean(_) => Endpoint::TrajLean,
            TrajCmd::Sidestep(_) => Endpoint::TrajSidestep,
            TrajCmd::Circle => Endpoint::TrajCircle,
            TrajCmd::Dance => Endpoint::TrajDance,
            TrajCmd::Wiggle => Endpoint::TrajWiggle,
            TrajCmd::Joint(_) => Endpoint::TrajJoint,
            TrajCmd::Eyes { pose } => match pose {
                EyePose::Angry => Endpoint::TrajEyesAngry,
                EyePose::Excited => Endpoint::TrajEyesExcited,
                EyePose::Normal => Endpoint::TrajEyesNormal,
                EyePose::Wide => Endpoint::TrajEyesWide,
                EyePose::Wiggle => Endpoint::TrajWiggleEyes,
            },
            TrajCmd::Pause => Endpoint::TrajPause,
            TrajCmd::Resume => Endpoint::TrajResume,
            TrajCmd::Stop(_) => Endpoint::TrajStop,
        }
    }

    /// Check the command parameters against their documented ranges.
    pub fn validate(&self) -> Result<(), ValidateError> {
        match self {
            TrajCmd::Walk(p) => p.validate(),
            TrajCmd::Kick(p) => p.validate(),
            TrajCmd::Lean(p) => p.validate(),
            TrajCmd::Sidestep(p) => p.validate(),
            TrajCmd::Joint(p) => p.validate(),
            _ => Ok(()),
        }
    }

    /// Build the REST request for this command.
    ///
    /// The parameters become query values, fields left at `None` are omitted
    /// so the firmware applies its own defaults.
    pub fn to_request(&self) -> Result<RicRequest, ValidateError> {
        let params = match self {
            TrajCmd::Walk(p) => RestParams::from_record(p)?,
            TrajCmd::Kick(p) => RestParams::from_record(p)?,
            TrajCmd::Lean(p) => RestParams::from_record(p)?,
            TrajCmd::Sidestep(p) => RestParams::from_record(p)?,
            TrajCmd::Joint(p) => RestParams::from_record(p)?,
            TrajCmd::Stop(p) => RestParams::from_record(p)?,
            _ => RestParams::new(),
        };

        Ok(RicRequest {
            endpoint: self.endpoint(),
            params,
        })
    }
}

impl JointSelector {
    /// Resolve the selector to a typed joint.
    pub fn resolve(&self) -> Result<JointId, ValidateError> {
        match self {
            JointSelector::Id(id) => {
                JointId::try_from(*id).map_err(|_| ValidateError::UnknownLiteral {
                    field: String::from("joint"),
                    value: id.to_string(),
                })
            }
            JointSelector::Name(name) => {
                JointId::from_name(name).ok_or_else(|| ValidateError::UnknownLiteral {
                    field: String::from("joint"),
                    value: name.clone(),
                })
            }
        }
    }
}

impl From<JointId> for JointSelector {
    fn from(joint: JointId) -> Self {
        JointSelector::Id(joint.id())
    }
}

impl FromStr for JointSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u8>() {
            Ok(id) => JointSelector::Id(id),
            // Accept "left-hip" for "left hip" so names survive shell splitting
            Err(_) => JointSelector::Name(
                s.chars()
                    .map(|c| if c == '-' || c == '_' { ' ' } else { c })
                    .collect(),
            ),
        })
    }
}

impl WalkParams {
    pub const DEFAULT_NUM_STEPS: u32 = 2;
    pub const DEFAULT_START_FOOT: Side = Side::Auto;
    pub const DEFAULT_TURN_DEG: f64 = 0.0;
    pub const DEFAULT_STEP_LENGTH_MM: f64 = 25.0;
    pub const DEFAULT_MOVE_TIME_MS: u32 = 1500;
    pub const TURN_RANGE_DEG: (f64, f64) = (-100.0, 100.0);

    pub fn validate(&self) -> Result<(), ValidateError> {
        if let Some(turn) = self.turn {
            check_range("turn", turn, Self::TURN_RANGE_DEG)?;
        }

        if let Some(foot) = self.start_foot {
            match foot {
                Side::Left | Side::Right | Side::Auto => (),
                other => {
                    return Err(unknown_side("startFoot", other));
                }
            }
        }

        Ok(())
    }

    /// The command as the firmware will interpret it, with documented
    /// defaults filled in for omitted fields.
    pub fn with_defaults(&self) -> WalkParams {
        WalkParams {
            num_steps: self.num_steps.or(Some(Self::DEFAULT_NUM_STEPS)),
            start_foot: self.start_foot.or(Some(Self::DEFAULT_START_FOOT)),
            turn: self.turn.or(Some(Self::DEFAULT_TURN_DEG)),
            step_length: self.step_length.or(Some(Self::DEFAULT_STEP_LENGTH_MM)),
            move_time: self.move_time.or(Some(Self::DEFAULT_MOVE_TIME_MS)),
        }
    }
}

impl LeanParams {
    /// V2 firmware default, V1 used 50.
    pub const DEFAULT_AMOUNT_DEG: f64 = 29.0;
    pub const DEFAULT_MOVE_TIME_MS: u32 = 1000;
    pub const AMOUNT_RANGE_DEG: (f64, f64) = (-60.0, 60.0);

    pub fn validate(&self) -> Result<(), ValidateError> {
        match self.direction {
            Side::Left | Side::Right | Side::Forward | Side::Back => (),
            other => return Err(unknown_side("direction", other)),
        }

        if let Some(amount) = self.amount {
            check_range("amount", amount, Self::AMOUNT_RANGE_DEG)?;
        }

        Ok(())
    }

    pub fn with_defaults(&self) -> LeanParams {
        LeanParams {
            direction: self.direction,
            amount: self.amount.or(Some(Self::DEFAULT_AMOUNT_DEG)),
            move_time: self.move_time.or(Some(Self::DEFAULT_MOVE_TIME_MS)),
        }
    }
}

impl SidestepParams {
    pub const DEFAULT_STEPS: u32 = 1;
    pub const DEFAULT_STEP_LENGTH_MM: f64 = 35.0;
    pub const DEFAULT_MOVE_TIME_MS: u32 = 1000;

    pub fn validate(&self) -> Result<(), ValidateError> {
        match self.side {
            Side::Left | Side::Right => Ok(()),
            other => Err(unknown_side("side", other)),
        }
    }

    pub fn with_defaults(&self) -> SidestepParams {
        SidestepParams {
            side: self.side,
            steps: self.steps.or(Some(Self::DEFAULT_STEPS)),
            step_length: self.step_length.or(Some(Self::DEFAULT_STEP_LENGTH_MM)),
            move_time: self.move_time.or(Some(Self::DEFAULT_MOVE_TIME_MS)),
        }
    }
}

impl KickParams {
    pub const DEFAULT_SIDE: Side = Side::Right;
    pub const DEFAULT_TWIST_DEG: f64 = 0.0;
    pub const DEFAULT_MOVE_TIME_MS: u32 = 2500;

    pub fn validate(&self) -> Result<(), ValidateError> {
        if let Some(side) = self.side {
            match side {
                Side::Left | Side::Right => (),
                other => return Err(unknown_side("side", other)),
            }
        }

        Ok(())
    }

    pub fn with_defaults(&self) -> KickParams {
        KickParams {
            side: self.side.or(Some(Self::DEFAULT_SIDE)),
            twist: self.twist.or(Some(Self::DEFAULT_TWIST_DEG)),
            move_time: self.move_time.or(Some(Self::DEFAULT_MOVE_TIME_MS)),
        }
    }
}

impl ArmsParams {
    pub const ANGLE_RANGE_DEG: (f64, f64) = (-100.0, 100.0);

    pub fn validate(&self) -> Result<(), ValidateError> {
        check_range("leftAngle", self.left_angle, Self::ANGLE_RANGE_DEG)?;
        check_range("rightAngle", self.right_angle, Self::ANGLE_RANGE_DEG)?;
        Ok(())
    }

    /// Expand into the two `traj/joint` moves a consumer without a dedicated
    /// arms endpoint issues.
    pub fn to_joint_moves(&self) -> [MoveJointParams; 2] {
        [
            MoveJointParams {
                joint: JointSelector::from(JointId::LeftArm),
                position: self.left_angle,
                move_time: self.move_time,
            },
            MoveJointParams {
                joint: JointSelector::from(JointId::RightArm),
                position: self.right_angle,
                move_time: self.move_time,
            },
        ]
    }
}

impl MoveJointParams {
    pub fn validate(&self) -> Result<(), ValidateError> {
        self.joint.resolve().map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn unknown_side(field: &str, side: Side) -> ValidateError {
    ValidateError::UnknownLiteral {
        field: String::from(field),
        value: String::from(side.as_str()),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn walk_params_serialise_only_given_fields() {
        let params = WalkParams {
            num_steps: Some(3),
            move_time: Some(2000),
            ..WalkParams::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"numSteps": 3, "moveTime": 2000}));
    }

    #[test]
    fn walk_turn_outside_documented_range_is_rejected() {
        let params = WalkParams {
            turn: Some(150.0),
            ..WalkParams::default()
        };

        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            ValidateError::OutOfRange {
                field: String::from("turn"),
                value: 150.0,
                min: -100.0,
                max: 100.0,
            }
        );
    }

    #[test]
    fn walk_start_foot_must_be_lateral_or_auto() {
        let params = WalkParams {
            start_foot: Some(Side::Forward),
            ..WalkParams::default()
        };

        match params.validate().unwrap_err() {
            ValidateError::UnknownLiteral { field, value } => {
                assert_eq!(field, "startFoot");
                assert_eq!(value, "forward");
            }
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }
    }

    #[test]
    fn walk_defaults_match_documentation() {
        let resolved = WalkParams::default().with_defaults();
        assert_eq!(resolved.num_steps, Some(2));
        assert_eq!(resolved.start_foot, Some(Side::Auto));
        assert_eq!(resolved.turn, Some(0.0));
        assert_eq!(resolved.step_length, Some(25.0));
        assert_eq!(resolved.move_time, Some(1500));
    }

    #[test]
    fn lean_amount_beyond_sixty_degrees_is_rejected() {
        let params: LeanParams =
            serde_json::from_value(json!({"direction": "left", "amount": 200})).unwrap();

        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            ValidateError::OutOfRange {
                field: String::from("amount"),
                value: 200.0,
                min: -60.0,
                max: 60.0,
            }
        );
    }

    #[test]
    fn lean_direction_auto_is_rejected() {
        let params = LeanParams {
            direction: Side::Auto,
            amount: None,
            move_time: None,
        };

        assert!(matches!(
            params.validate(),
            Err(ValidateError::UnknownLiteral { .. })
        ));
    }

    #[test]
    fn sidestep_side_must_be_lateral() {
        let good = SidestepParams {
            side: Side::Left,
            steps: None,
            step_length: None,
            move_time: None,
        };
        assert!(good.validate().is_ok());

        let bad = SidestepParams {
            side: Side::Back,
            ..good
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn kick_defaults_match_documentation() {
        let resolved = KickParams::default().with_defaults();
        assert_eq!(resolved.side, Some(Side::Right));
        assert_eq!(resolved.twist, Some(0.0));
        assert_eq!(resolved.move_time, Some(2500));
    }

    #[test]
    fn arms_angles_are_bounded() {
        let params = ArmsParams {
            left_angle: 120.0,
            right_angle: 0.0,
            move_time: 1000,
        };

        assert!(matches!(
            params.validate(),
            Err(ValidateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn arms_expand_to_the_arm_joints() {
        let arms = ArmsParams {
            left_angle: 45.0,
            right_angle: -30.0,
            move_time: 800,
        };

        let [left, right] = arms.to_joint_moves();
        assert_eq!(left.joint.resolve().unwrap(), JointId::LeftArm);
        assert_eq!(left.position, 45.0);
        assert_eq!(right.joint.resolve().unwrap(), JointId::RightArm);
        assert_eq!(right.position, -30.0);
        assert_eq!(right.move_time, 800);
    }

    #[test]
    fn joint_selector_accepts_id_and_name() {
        let by_id: JointSelector = "7".parse().unwrap();
        assert_eq!(by_id, JointSelector::Id(7));
        assert_eq!(by_id.resolve().unwrap(), JointId::RightArm);

        let by_name: JointSelector = "left-hip".parse().unwrap();
        assert_eq!(by_name, JointSelector::Name(String::from("left hip")));
        assert_eq!(by_name.resolve().unwrap(), JointId::LeftHip);

        assert!(JointSelector::Id(12).resolve().is_err());
        assert!(JointSelector::Name(String::from("tail")).resolve().is_err());
    }

    #[test]
    fn move_joint_accepts_both_wire_forms() {
        let by_name: MoveJointParams = serde_json::from_value(json!({
            "joint": "left hip",
            "position": 20.0,
            "moveTime": 500,
        }))
        .unwrap();
        assert!(by_name.validate().is_ok());

        let by_id: MoveJointParams = serde_json::from_value(json!({
            "joint": 8,
            "position": -10.0,
            "moveTime": 500,
        }))
        .unwrap();
        assert_eq!(by_id.joint.resolve().unwrap(), JointId::Eyes);
    }

    #[test]
    fn eyes_poses_map_to_their_own_endpoints() {
        let cases = [
            (EyePose::Angry, "traj/eyesAngry"),
            (EyePose::Excited, "traj/eyesExcited"),
            (EyePose::Normal, "traj/eyesNormal"),
            (EyePose::Wide, "traj/eyesWide"),
            (EyePose::Wiggle, "traj/wiggleEyes"),
        ];

        for (pose, path) in cases.iter() {
            let cmd = TrajCmd::Eyes { pose: *pose };
            assert_eq!(cmd.endpoint().as_path(), *path);
        }
    }

    #[test]
    fn walk_request_renders_path_and_query() {
        let cmd = TrajCmd::Walk(WalkParams {
            num_steps: Some(2),
            turn: Some(-10.0),
            ..WalkParams::default()
        });

        let request = cmd.to_request().unwrap();
        assert_eq!(request.endpoint, Endpoint::TrajWalk);
        assert_eq!(request.to_query_string(), "traj/step?numSteps=2&turn=-10.0");
    }

    #[test]
    fn parameterless_commands_render_bare_paths() {
        assert_eq!(
            TrajCmd::GetReady.to_request().unwrap().to_query_string(),
            "traj/getReady"
        );
        assert_eq!(
            TrajCmd::Stop(StopParams::default())
                .to_request()
                .unwrap()
                .to_query_string(),
            "traj/stop"
        );
    }

    #[test]
    fn stop_type_becomes_a_query_parameter() {
        let cmd = TrajCmd::Stop(StopParams {
            stop_type: Some(StopType::ClearQueue),
        });

        assert_eq!(
            cmd.to_request().unwrap().to_query_string(),
            "traj/stop?stopType=clear queue"
        );
    }
}
