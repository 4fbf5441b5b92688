//! # Robot state and identity records
//!
//! Core records describing the Marty V2 robot itself: the nine joints, the
//! flag words the firmware attaches to them, robot/power telemetry and the
//! small vocabulary enumerations (sides, eye poses, stop types) shared by the
//! trajectory commands.
//!
//! Field names and literal values in this module are RIC wire identifiers,
//! matched byte for byte against what the firmware sends. Several telemetry
//! fields are optional because older firmware simply omits them, absence is
//! therefore represented with `Option` and never with a sentinel value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::convert::TryFrom;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod addons;
pub mod traj;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Identifier of one of the robot's nine actuated joints.
///
/// The numeric values are the RIC servo IDs and are stable wire identifiers.
/// Each ID also has a canonical lowercase name (for example `"left hip"`)
/// which commands may use interchangeably with the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum JointId {
    LeftHip,
    LeftTwist,
    LeftKnee,
    RightHip,
    RightTwist,
    RightKnee,
    LeftArm,
    RightArm,
    Eyes,
}

/// Direction or side selector used by several trajectory commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Forward,
    Back,
    Auto,
}

/// Predefined eye poses, each backed by its own trajectory endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyePose {
    Angry,
    Excited,
    Normal,
    Wide,
    /// V2 firmware only.
    Wiggle,
}

/// How the robot should stop when asked to.
///
/// The wire literals contain spaces. [`FromStr`] additionally accepts the
/// hyphen and underscore spellings so the strings survive shell splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopType {
    /// Finish the current movement then clear the queue.
    #[serde(rename = "clear queue")]
    ClearQueue,
    /// Stop immediately.
    #[serde(rename = "clear and stop")]
    ClearAndStop,
    /// Stop immediately and disable the motors.
    #[serde(rename = "clear and disable")]
    ClearAndDisable,
    /// Stop and return to the zero position.
    #[serde(rename = "clear and zero")]
    ClearAndZero,
    /// Pause, movement can be resumed.
    #[serde(rename = "pause")]
    Pause,
    /// Pause and disable the motors.
    #[serde(rename = "pause and disable")]
    PauseAndDisable,
}

/// Accelerometer axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccelAxis {
    X,
    Y,
    Z,
}

/// State of a single RGB pixel reported in the robot status.
///
/// The known states are closed, but firmware newer than this catalogue may
/// report others. Those parse into [`PixelState::Unknown`] rather than
/// failing the whole telemetry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelState {
    Off,
    On,
    Breathe,
    Override,
    #[serde(untagged)]
    Unknown(String),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Bitmask of joint status flags as reported in [`JointInfo::flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointFlags(pub u8);

/// Information on a single joint, one entry of the `smartServos` telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointInfo {
    /// Servo ID, normally one of [`JointId`].
    #[serde(rename = "IDNo")]
    pub id_no: u8,

    /// Canonical joint name, for example `"left hip"`.
    pub name: String,

    /// Current angle in degrees.
    pub pos: f64,

    /// Motor current in milliamps.
    pub current: f64,

    pub enabled: bool,

    #[serde(rename = "commsOK")]
    pub comms_ok: bool,

    /// Combination of [`JointFlags`] bits.
    pub flags: JointFlags,
}

/// One RGB pixel entry of the robot status `pixRGBT` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelInfo {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub state: PixelState,
}

/// Overall robot state telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotStatus {
    pub flags: u8,

    /// Number of queued movements.
    pub work_q_count: u32,

    pub is_moving: bool,
    pub is_paused: bool,
    pub is_fw_updating: bool,

    /// Free heap in bytes, newer firmware only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap_free: Option<u32>,

    /// Minimum free heap seen since boot, newer firmware only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heap_min: Option<u32>,

    #[serde(rename = "pixRGBT", skip_serializing_if = "Option::is_none")]
    pub pix_rgbt: Option<Vec<PixelInfo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_ms_avg: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_ms_max: Option<f64>,
}

/// Battery and power rail telemetry.
///
/// Only the remaining capacity percentage is guaranteed, everything else
/// depends on the power board revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerStatus {
    pub batt_remain_capacity_percent: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batt_temp_deg_c: Option<f64>,

    #[serde(rename = "battRemainCapacityMAH", skip_serializing_if = "Option::is_none")]
    pub batt_remain_capacity_mah: Option<f64>,

    #[serde(rename = "battFullCapacityMAH", skip_serializing_if = "Option::is_none")]
    pub batt_full_capacity_mah: Option<f64>,

    #[serde(rename = "battCurrentMA", skip_serializing_if = "Option::is_none")]
    pub batt_current_ma: Option<f64>,

    #[serde(rename = "power5VOnTimeSecs", skip_serializing_if = "Option::is_none")]
    pub power_5v_on_time_secs: Option<f64>,

    #[serde(rename = "powerUSBIsConnected", skip_serializing_if = "Option::is_none")]
    pub power_usb_is_connected: Option<bool>,

    #[serde(rename = "power5VIsOn", skip_serializing_if = "Option::is_none")]
    pub power_5v_is_on: Option<bool>,
}

/// A single accelerometer sample in g.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccelerometerReading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Position in 3D space, metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Raised when a numeric joint ID is outside the valid 0 to 8 range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown joint `{0}`")]
pub struct UnknownJointError(pub u8);

/// Raised when a string is not a member of a vocabulary enumeration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown literal `{literal}` for {expected}")]
pub struct ParseLiteralError {
    pub literal: String,
    pub expected: &'static str,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl JointId {
    /// All joints in wire ID order.
    pub const ALL: [JointId; 9] = [
        JointId::LeftHip,
        JointId::LeftTwist,
        JointId::LeftKnee,
        JointId::RightHip,
        JointId::RightTwist,
        JointId::RightKnee,
        JointId::LeftArm,
        JointId::RightArm,
        JointId::Eyes,
    ];

    /// Numeric wire ID of this joint.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name of this joint.
    pub fn name(self) -> &'static str {
        match self {
            JointId::LeftHip => "left hip",
            JointId::LeftTwist => "left twist",
            JointId::LeftKnee => "left knee",
            JointId::RightHip => "right hip",
            JointId::RightTwist => "right twist",
            JointId::RightKnee => "right knee",
            JointId::LeftArm => "left arm",
            JointId::RightArm => "right arm",
            JointId::Eyes => "eyes",
        }
    }

    /// Look a joint up by its canonical name.
    pub fn from_name(name: &str) -> Option<JointId> {
        JointId::ALL.iter().copied().find(|j| j.name() == name)
    }
}

impl TryFrom<u8> for JointId {
    type Error = UnknownJointError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        JointId::ALL
            .get(id as usize)
            .copied()
            .ok_or(UnknownJointError(id))
    }
}

impl From<JointId> for u8 {
    fn from(joint: JointId) -> u8 {
        joint.id()
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl JointFlags {
    pub const ENABLED: JointFlags = JointFlags(0x01);
    pub const CURRENT_LIMIT_NOW: JointFlags = JointFlags(0x02);
    pub const CURRENT_LIMIT_LONG: JointFlags = JointFlags(0x04);
    pub const BUSY: JointFlags = JointFlags(0x08);
    pub const POS_RESTRICTED: JointFlags = JointFlags(0x10);
    pub const PAUSED: JointFlags = JointFlags(0x20);
    pub const COMMS_OK: JointFlags = JointFlags(0x80);

    /// True if every bit of `other` is set in `self`.
    pub fn contains(self, other: JointFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for JointFlags {
    type Output = JointFlags;

    fn bitor(self, rhs: JointFlags) -> JointFlags {
        JointFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for JointFlags {
    fn bitor_assign(&mut self, rhs: JointFlags) {
        self.0 |= rhs.0;
    }
}

impl JointInfo {
    /// The typed joint this entry refers to, or `None` for an ID outside the
    /// known set. Telemetry with unknown IDs is kept rather than rejected.
    pub fn joint(&self) -> Option<JointId> {
        JointId::try_from(self.id_no).ok()
    }

    /// Typed view of the raw flag word.
    pub fn flag_set(&self) -> JointFlags {
        self.flags
    }
}

impl RobotStatus {
    /// Pixel state literals this catalogue does not know about. Useful for
    /// logging a warning without dropping the record.
    pub fn unknown_pixel_states(&self) -> Vec<&str> {
        match &self.pix_rgbt {
            Some(pixels) => pixels
                .iter()
                .filter_map(|p| match &p.state {
                    PixelState::Unknown(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

impl AccelerometerReading {
    pub fn axis(&self, axis: AccelAxis) -> f64 {
        match axis {
            AccelAxis::X => self.x,
            AccelAxis::Y => self.y,
            AccelAxis::Z => self.z,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Rotation3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Forward => "forward",
            Side::Back => "back",
            Side::Auto => "auto",
        }
    }
}

impl FromStr for Side {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "forward" => Ok(Side::Forward),
            "back" => Ok(Side::Back),
            "auto" => Ok(Side::Auto),
            _ => Err(ParseLiteralError {
                literal: String::from(s),
                expected: "side",
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EyePose {
    pub fn as_str(self) -> &'static str {
        match self {
            EyePose::Angry => "angry",
            EyePose::Excited => "excited",
            EyePose::Normal => "normal",
            EyePose::Wide => "wide",
            EyePose::Wiggle => "wiggle",
        }
    }
}

impl FromStr for EyePose {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "angry" => Ok(EyePose::Angry),
            "excited" => Ok(EyePose::Excited),
            "normal" => Ok(EyePose::Normal),
            "wide" => Ok(EyePose::Wide),
            "wiggle" => Ok(EyePose::Wiggle),
            _ => Err(ParseLiteralError {
                literal: String::from(s),
                expected: "eye pose",
            }),
        }
    }
}

impl fmt::Display for EyePose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StopType {
    pub fn as_str(self) -> &'static str {
        match self {
            StopType::ClearQueue => "clear queue",
            StopType::ClearAndStop => "clear and stop",
            StopType::ClearAndDisable => "clear and disable",
            StopType::ClearAndZero => "clear and zero",
            StopType::Pause => "pause",
            StopType::PauseAndDisable => "pause and disable",
        }
    }
}

impl FromStr for StopType {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "clear-queue" and "clear_queue" as well as the wire form
        let norm: String = s
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();

        match norm.as_str() {
            "clear queue" => Ok(StopType::ClearQueue),
            "clear and stop" => Ok(StopType::ClearAndStop),
            "clear and disable" => Ok(StopType::ClearAndDisable),
            "clear and zero" => Ok(StopType::ClearAndZero),
            "pause" => Ok(StopType::Pause),
            "pause and disable" => Ok(StopType::PauseAndDisable),
            _ => Err(ParseLiteralError {
                literal: String::from(s),
                expected: "stop type",
            }),
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccelAxis {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(AccelAxis::X),
            "y" => Ok(AccelAxis::Y),
            "z" => Ok(AccelAxis::Z),
            _ => Err(ParseLiteralError {
                literal: String::from(s),
                expected: "accelerometer axis",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
