//! # ROS style topic publications
//!
//! Telemetry is also published on rosserial style topics. A publication is a
//! single JSON object carrying a `topic` tag alongside its topic specific
//! fields, so unlike the WebSocket envelope there is no separate `payload`
//! member.
//!
//! Each topic pairs one-to-one with a WebSocket telemetry kind and the two
//! surfaces use the same tag spellings, [`RosPublication::to_ws_message`]
//! crosses from one to the other. An unrecognised topic is rejected, the tag
//! is load bearing for dispatch.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::fmt;

// External
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// Internal
use crate::api::ws::{WsMessage, WsMessageType};
use crate::robot::addons::AddOnInfo;
use crate::robot::{AccelerometerReading, JointInfo, PowerStatus, RobotStatus};
use crate::validate::{self, ValidateError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The closed set of publication topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosTopic {
    #[serde(rename = "smartServos")]
    SmartServos,
    #[serde(rename = "accel")]
    Accel,
    #[serde(rename = "powerStatus")]
    PowerStatus,
    #[serde(rename = "addOns")]
    AddOns,
    #[serde(rename = "robotStatus")]
    RobotStatus,
}

/// A publication, dispatched on the `topic` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic")]
pub enum RosPublication {
    #[serde(rename = "smartServos")]
    SmartServos { servos: Vec<JointInfo> },

    #[serde(rename = "accel")]
    Accel { x: f64, y: f64, z: f64 },

    #[serde(rename = "powerStatus")]
    PowerStatus { power: PowerStatus },

    #[serde(rename = "addOns")]
    AddOns {
        #[serde(rename = "addOns")]
        add_ons: Vec<AddOnInfo>,
    },

    #[serde(rename = "robotStatus")]
    RobotStatus { status: RobotStatus },
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Reasons an inbound publication is rejected.
#[derive(Debug, Error)]
pub enum RosParseError {
    #[error("publication is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("publication is not a JSON object")]
    NotAnObject,

    #[error("publication has no `topic` field")]
    NoTopic,

    #[error("unrecognised topic `{0}`")]
    UnknownTopic(String),

    #[error("{topic:?} publication invalid: {source}")]
    PayloadError {
        topic: RosTopic,
        #[source]
        source: ValidateError,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RosTopic {
    /// Every topic, in declaration order.
    pub const ALL: [RosTopic; 5] = [
        RosTopic::SmartServos,
        RosTopic::Accel,
        RosTopic::PowerStatus,
        RosTopic::AddOns,
        RosTopic::RobotStatus,
    ];

    /// The wire spelling of this topic.
    pub fn as_topic_str(self) -> &'static str {
        match self {
            RosTopic::SmartServos => "smartServos",
            RosTopic::Accel => "accel",
            RosTopic::PowerStatus => "powerStatus",
            RosTopic::AddOns => "addOns",
            RosTopic::RobotStatus => "robotStatus",
        }
    }

    /// Look a topic up by wire spelling.
    pub fn from_topic_str(s: &str) -> Option<RosTopic> {
        RosTopic::ALL.iter().copied().find(|t| t.as_topic_str() == s)
    }

    /// The WebSocket telemetry kind this topic pairs with.
    pub fn ws_message_type(self) -> WsMessageType {
        match self {
            RosTopic::SmartServos => WsMessageType::SmartServos,
            RosTopic::Accel => WsMessageType::Accel,
            RosTopic::PowerStatus => WsMessageType::PowerStatus,
            RosTopic::AddOns => WsMessageType::AddOns,
            RosTopic::RobotStatus => WsMessageType::RobotStatus,
        }
    }
}

impl fmt::Display for RosTopic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_topic_str())
    }
}

impl RosPublication {
    /// Parse a publication from a JSON string.
    pub fn from_json(json_str: &str) -> Result<RosPublication, RosParseError> {
        let value: Value = serde_json::from_str(json_str)?;
        RosPublication::from_value(&value)
    }

    /// Parse a publication from an already parsed value.
    ///
    /// The `topic` tag is checked first so an unknown topic is reported as
    /// such rather than as a payload shape problem.
    pub fn from_value(value: &Value) -> Result<RosPublication, RosParseError> {
        let obj = value.as_object().ok_or(RosParseError::NotAnObject)?;

        let topic_str = obj
            .get("topic")
            .and_then(Value::as_str)
            .ok_or(RosParseError::NoTopic)?;

        let topic = RosTopic::from_topic_str(topic_str)
            .ok_or_else(|| RosParseError::UnknownTopic(String::from(topic_str)))?;

        validate::typed(value)
            .map_err(|source| RosParseError::PayloadError { topic, source })
    }

    /// Serialise the publication, tag inline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The topic this publication belongs on.
    pub fn topic(&self) -> RosTopic {
        match self {
            RosPublication::SmartServos { .. } => RosTopic::SmartServos,
            RosPublication::Accel { .. } => RosTopic::Accel,
            RosPublication::PowerStatus { .. } => RosTopic::PowerStatus,
            RosPublication::AddOns { .. } => RosTopic::AddOns,
            RosPublication::RobotStatus { .. } => RosTopic::RobotStatus,
        }
    }

    /// Re-frame this publication as the paired WebSocket telemetry message.
    pub fn to_ws_message(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        let (msg_type, payload) = match self {
            RosPublication::SmartServos { servos } => {
                (WsMessageType::SmartServos, serde_json::to_value(servos)?)
            }
            RosPublication::Accel { x, y, z } => (
                WsMessageType::Accel,
                serde_json::to_value(AccelerometerReading {
                    x: *x,
                    y: *y,
                    z: *z,
                })?,
            ),
            RosPublication::PowerStatus { power } => {
                (WsMessageType::PowerStatus, serde_json::to_value(power)?)
            }
            RosPublication::AddOns { add_ons } => {
                (WsMessageType::AddOns, serde_json::to_value(add_ons)?)
            }
            RosPublication::RobotStatus { status } => {
                (WsMessageType::RobotStatus, serde_json::to_value(status)?)
            }
        };

        Ok(WsMessage {
            msg_type,
            payload,
            timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
