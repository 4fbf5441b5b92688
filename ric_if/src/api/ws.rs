//! # WebSocket API surface
//!
//! Every WebSocket frame carries the same envelope: a `type` tag, a payload
//! whose schema is fixed by the tag, and a millisecond timestamp. The tag set
//! is closed, every tag maps to exactly one payload schema, and that mapping
//! is a completeness property the tests pin down.
//!
//! Inbound handling is split in three steps, in order:
//!
//! 1. [`WsMessage::from_json`] parses the envelope and rejects unknown tags
//! 2. [`WsMessage::validate`] checks the payload against its schema
//! 3. [`WsMessage::decode`] produces the typed [`WsPayload`]
//!
//! A message failing any step is rejected at the boundary, the structured
//! reason is reported back with an `error` message carrying one of the
//! closed [`WsErrorCode`] values.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::convert::TryFrom;
use std::fmt;

// External
use chrono::{serde::ts_milliseconds, DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// Internal
use crate::api::{Endpoint, RestParams, SystemStatus};
use crate::robot::addons::{AddOnInfo, DiscoColorParams};
use crate::robot::traj::{
    KickParams, LeanParams, MoveJointParams, SidestepParams, StopParams, WalkParams,
};
use crate::robot::{AccelerometerReading, JointInfo, PowerStatus, RobotStatus};
use crate::schema::SchemaId;
use crate::validate::{self, ValidateError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The closed set of WebSocket message tags.
///
/// Wire spellings are inconsistent by history, some are camelCase and some
/// snake_case. They are reproduced exactly, not normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WsMessageType {
    #[serde(rename = "ack")]
    Ack,
    #[serde(rename = "disconnect")]
    Disconnect,
    #[serde(rename = "heartbeat")]
    Heartbeat,
    #[serde(rename = "heartbeat_ack")]
    HeartbeatAck,
    #[serde(rename = "smartServos")]
    SmartServos,
    #[serde(rename = "robotStatus")]
    RobotStatus,
    #[serde(rename = "accel")]
    Accel,
    #[serde(rename = "powerStatus")]
    PowerStatus,
    #[serde(rename = "addOns")]
    AddOns,
    #[serde(rename = "systemStatus")]
    SystemStatus,
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "command_ack")]
    CommandAck,
    #[serde(rename = "error")]
    Error,
}

/// Status literal of the connect acknowledgement. There is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectStatus {
    Connected,
}

/// Lifecycle of an issued command as reported by `command_ack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAckStatus {
    Accepted,
    Rejected,
    Completed,
}

/// Closed numeric error codes of the `error` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum WsErrorCode {
    InvalidMessage,
    Unauthorized,
    CommandFailed,
    RobotNotReady,
    SimulationError,
    InternalError,
}

/// A decoded WebSocket payload, one variant per message tag.
#[derive(Debug, Clone, PartialEq)]
pub enum WsPayload {
    Ack(AckPayload),
    Disconnect(DisconnectPayload),
    Heartbeat(HeartbeatPayload),
    HeartbeatAck(HeartbeatAckPayload),
    SmartServos(Vec<JointInfo>),
    RobotStatus(RobotStatus),
    Accel(AccelerometerReading),
    PowerStatus(PowerStatus),
    AddOns(Vec<AddOnInfo>),
    SystemStatus(SystemStatus),
    Command(CommandPayload),
    CommandAck(CommandAckPayload),
    Error(ErrorPayload),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The raw WebSocket envelope. The payload stays an untyped value until
/// [`decode`](WsMessage::decode) is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsMessage {
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,

    pub payload: Value,

    #[serde(with = "ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Payload of `ack`, sent by the server once a connection is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckPayload {
    pub status: ConnectStatus,
    pub server_version: String,

    /// Telemetry rate in Hz granted to this client.
    pub subscription_rate: f64,
}

/// Payload of `disconnect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisconnectPayload {
    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

/// Payload of `heartbeat`, the client ping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatPayload {
    #[serde(with = "ts_milliseconds")]
    pub client_time: DateTime<Utc>,
}

/// Payload of `heartbeat_ack`, the server pong.
///
/// `client_time` is the clock value from the heartbeat being answered,
/// echoed back untouched so the client can measure round trip time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatAckPayload {
    #[serde(with = "ts_milliseconds")]
    pub server_time: DateTime<Utc>,

    #[serde(with = "ts_milliseconds")]
    pub client_time: DateTime<Utc>,
}

/// Payload of `command`, a REST action tunnelled over the socket.
///
/// Template endpoints travel verbatim, the add-on name goes in `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub endpoint: Endpoint,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RestParams>,
}

/// Payload of `command_ack`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandAckPayload {
    pub command_id: String,
    pub status: CommandAckStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Payload of `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: WsErrorCode,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Client side WebSocket connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsConfig {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect: Option<bool>,

    /// Milliseconds between reconnection attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_delay: Option<u32>,

    /// Milliseconds between heartbeats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_interval: Option<u32>,

    /// Telemetry rate in Hz requested from the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_rate: Option<f64>,
}

/// Reasons an inbound frame is rejected before reaching business logic.
#[derive(Debug, Error)]
pub enum WsParseError {
    #[error("message is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message has no `type` field")]
    NoMessageType,

    #[error("unrecognised message type `{0}`")]
    UnknownMessageType(String),

    #[error("message of type {0:?} has no payload")]
    NoPayload(WsMessageType),

    #[error("message has no numeric `timestamp` field")]
    NoTimestamp,

    #[error("{msg_type:?} payload invalid: {source}")]
    PayloadError {
        msg_type: WsMessageType,
        #[source]
        source: ValidateError,
    },
}

/// Raised when a numeric error code is outside the documented 1000 to 1005
/// range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown error code `{0}`")]
pub struct UnknownErrorCodeError(pub u16);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WsMessageType {
    /// Every message tag, in declaration order.
    pub const ALL: [WsMessageType; 13] = [
        WsMessageType::Ack,
        WsMessageType::Disconnect,
        WsMessageType::Heartbeat,
        WsMessageType::HeartbeatAck,
        WsMessageType::SmartServos,
        WsMessageType::RobotStatus,
        WsMessageType::Accel,
        WsMessageType::PowerStatus,
        WsMessageType::AddOns,
        WsMessageType::SystemStatus,
        WsMessageType::Command,
        WsMessageType::CommandAck,
        WsMessageType::Error,
    ];

    /// The wire spelling of this tag.
    pub fn as_type_str(self) -> &'static str {
        match self {
            WsMessageType::Ack => "ack",
            WsMessageType::Disconnect => "disconnect",
            WsMessageType::Heartbeat => "heartbeat",
            WsMessageType::HeartbeatAck => "heartbeat_ack",
            WsMessageType::SmartServos => "smartServos",
            WsMessageType::RobotStatus => "robotStatus",
            WsMessageType::Accel => "accel",
            WsMessageType::PowerStatus => "powerStatus",
            WsMessageType::AddOns => "addOns",
            WsMessageType::SystemStatus => "systemStatus",
            WsMessageType::Command => "command",
            WsMessageType::CommandAck => "command_ack",
            WsMessageType::Error => "error",
        }
    }

    /// Look a tag up by wire spelling.
    pub fn from_type_str(s: &str) -> Option<WsMessageType> {
        WsMessageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_type_str() == s)
    }

    /// The schema every payload of this tag must satisfy. Total by
    /// construction, which is exactly the dispatch completeness property.
    pub fn payload_schema(self) -> SchemaId {
        match self {
            WsMessageType::Ack => SchemaId::ConnectAck,
            WsMessageType::Disconnect => SchemaId::Disconnect,
            WsMessageType::Heartbeat => SchemaId::Heartbeat,
            WsMessageType::HeartbeatAck => SchemaId::HeartbeatAck,
            WsMessageType::SmartServos => SchemaId::JointInfoList,
            WsMessageType::RobotStatus => SchemaId::RobotStatus,
            WsMessageType::Accel => SchemaId::AccelReading,
            WsMessageType::PowerStatus => SchemaId::PowerStatus,
            WsMessageType::AddOns => SchemaId::AddOnInfoList,
            WsMessageType::SystemStatus => SchemaId::SystemStatus,
            WsMessageType::Command => SchemaId::Command,
            WsMessageType::CommandAck => SchemaId::CommandAck,
            WsMessageType::Error => SchemaId::WsError,
        }
    }
}

impl fmt::Display for WsMessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_type_str())
    }
}

impl WsMessage {
    /// Parse an envelope from a JSON frame.
    ///
    /// Rejects frames with an unknown tag, a missing payload or a missing
    /// timestamp. The payload itself is not checked here, see
    /// [`validate`](WsMessage::validate) and [`decode`](WsMessage::decode).
    pub fn from_json(json_str: &str) -> Result<WsMessage, WsParseError> {
        let value: Value = serde_json::from_str(json_str)?;
        let obj = value.as_object().ok_or(WsParseError::NotAnObject)?;

        let type_str = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(WsParseError::NoMessageType)?;

        let msg_type = WsMessageType::from_type_str(type_str)
            .ok_or_else(|| WsParseError::UnknownMessageType(String::from(type_str)))?;

        let payload = obj
            .get("payload")
            .cloned()
            .ok_or(WsParseError::NoPayload(msg_type))?;

        let millis = obj
            .get("timestamp")
            .and_then(Value::as_i64)
            .ok_or(WsParseError::NoTimestamp)?;
        let timestamp = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(WsParseError::NoTimestamp)?;

        Ok(WsMessage {
            msg_type,
            payload,
            timestamp,
        })
    }

    /// Serialise the envelope to a JSON frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check the payload against the schema its tag demands.
    pub fn validate(&self) -> Result<(), WsParseError> {
        self.msg_type
            .payload_schema()
            .validate(&self.payload)
            .map_err(|source| WsParseError::PayloadError {
                msg_type: self.msg_type,
                source,
            })
    }

    /// Decode the payload into its typed form.
    pub fn decode(&self) -> Result<WsPayload, WsParseError> {
        let payload = match self.msg_type {
            WsMessageType::Ack => WsPayload::Ack(self.typed()?),
            WsMessageType::Disconnect => WsPayload::Disconnect(self.typed()?),
            WsMessageType::Heartbeat => WsPayload::Heartbeat(self.typed()?),
            WsMessageType::HeartbeatAck => WsPayload::HeartbeatAck(self.typed()?),
            WsMessageType::SmartServos => WsPayload::SmartServos(self.typed()?),
            WsMessageType::RobotStatus => WsPayload::RobotStatus(self.typed()?),
            WsMessageType::Accel => WsPayload::Accel(self.typed()?),
            WsMessageType::PowerStatus => WsPayload::PowerStatus(self.typed()?),
            WsMessageType::AddOns => WsPayload::AddOns(self.typed()?),
            WsMessageType::SystemStatus => WsPayload::SystemStatus(self.typed()?),
            WsMessageType::Command => WsPayload::Command(self.typed()?),
            WsMessageType::CommandAck => WsPayload::CommandAck(self.typed()?),
            WsMessageType::Error => WsPayload::Error(self.typed()?),
        };

        Ok(payload)
    }

    /// Build the `ack` sent once a client connection is accepted.
    pub fn connect_ack(
        server_version: &str,
        subscription_rate: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::Ack,
            &AckPayload {
                status: ConnectStatus::Connected,
                server_version: String::from(server_version),
                subscription_rate,
            },
            timestamp,
        )
    }

    /// Build a client heartbeat. The envelope is stamped with the same
    /// clock value as the payload.
    pub fn heartbeat(client_time: DateTime<Utc>) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::Heartbeat,
            &HeartbeatPayload { client_time },
            client_time,
        )
    }

    /// Build the acknowledgement for a received heartbeat.
    ///
    /// The client's clock value is echoed back untouched, the envelope and
    /// `server_time` carry the server clock.
    pub fn heartbeat_ack(
        heartbeat: &HeartbeatPayload,
        server_time: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::HeartbeatAck,
            &HeartbeatAckPayload {
                server_time,
                client_time: heartbeat.client_time,
            },
            server_time,
        )
    }

    /// Build a `command` frame.
    pub fn command(
        endpoint: Endpoint,
        params: Option<RestParams>,
        timestamp: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::Command,
            &CommandPayload { endpoint, params },
            timestamp,
        )
    }

    /// Build a `command_ack` frame.
    pub fn command_ack(
        command_id: &str,
        status: CommandAckStatus,
        message: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::CommandAck,
            &CommandAckPayload {
                command_id: String::from(command_id),
                status,
                message,
            },
            timestamp,
        )
    }

    /// Build an `error` frame.
    pub fn error(
        code: WsErrorCode,
        message: &str,
        details: Option<Value>,
        timestamp: DateTime<Utc>,
    ) -> Result<WsMessage, serde_json::Error> {
        envelope(
            WsMessageType::Error,
            &ErrorPayload {
                code,
                message: String::from(message),
                details,
            },
            timestamp,
        )
    }

    fn typed<T: serde::de::DeserializeOwned>(&self) -> Result<T, WsParseError> {
        validate::typed(&self.payload).map_err(|source| WsParseError::PayloadError {
            msg_type: self.msg_type,
            source,
        })
    }
}

impl CommandPayload {
    /// Validate the parameters against the records documented for the
    /// endpoint. Endpoints without a parameter record pass as long as the
    /// envelope shape held.
    pub fn validate(&self) -> Result<(), ValidateError> {
        let params_value = match &self.params {
            Some(params) => params.to_value(),
            None => Value::Object(serde_json::Map::new()),
        };

        match self.endpoint {
            Endpoint::TrajStep | Endpoint::TrajWalk => {
                validate::typed::<WalkParams>(&params_value)?.validate()
            }
            Endpoint::TrajKick => validate::typed::<KickParams>(&params_value)?.validate(),
            Endpoint::TrajLean => validate::typed::<LeanParams>(&params_value)?.validate(),
            Endpoint::TrajSidestep => {
                validate::typed::<SidestepParams>(&params_value)?.validate()
            }
            Endpoint::TrajJoint => validate::typed::<MoveJointParams>(&params_value)?.validate(),
            Endpoint::TrajStop => validate::typed::<StopParams>(&params_value).map(|_| ()),
            Endpoint::LedColor => {
                validate::typed::<DiscoColorParams>(&params_value)?.validate()
            }
            _ => Ok(()),
        }
    }
}

impl WsErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: [WsErrorCode; 6] = [
        WsErrorCode::InvalidMessage,
        WsErrorCode::Unauthorized,
        WsErrorCode::CommandFailed,
        WsErrorCode::RobotNotReady,
        WsErrorCode::SimulationError,
        WsErrorCode::InternalError,
    ];

    /// The numeric wire code.
    pub fn code(self) -> u16 {
        1000 + self as u16
    }

    /// Snake case name of the code, for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            WsErrorCode::InvalidMessage => "invalid_message",
            WsErrorCode::Unauthorized => "unauthorized",
            WsErrorCode::CommandFailed => "command_failed",
            WsErrorCode::RobotNotReady => "robot_not_ready",
            WsErrorCode::SimulationError => "simulation_error",
            WsErrorCode::InternalError => "internal_error",
        }
    }
}

impl TryFrom<u16> for WsErrorCode {
    type Error = UnknownErrorCodeError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1000 => Ok(WsErrorCode::InvalidMessage),
            1001 => Ok(WsErrorCode::Unauthorized),
            1002 => Ok(WsErrorCode::CommandFailed),
            1003 => Ok(WsErrorCode::RobotNotReady),
            1004 => Ok(WsErrorCode::SimulationError),
            1005 => Ok(WsErrorCode::InternalError),
            other => Err(UnknownErrorCodeError(other)),
        }
    }
}

impl From<WsErrorCode> for u16 {
    fn from(code: WsErrorCode) -> u16 {
        code.code()
    }
}

impl fmt::Display for WsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn envelope<P: Serialize>(
    msg_type: WsMessageType,
    payload: &P,
    timestamp: DateTime<Utc>,
) -> Result<WsMessage, serde_json::Error> {
    Ok(WsMessage {
        msg_type,
        payload: serde_json::to_value(payload)?,
        timestamp,
    })
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
