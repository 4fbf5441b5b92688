//! # Schema catalogue index
//!
//! [`SchemaId`] names every record schema the catalogue publishes and is
//! the single entry point for validating untyped JSON against one of them:
//!
//! ```text
//! SchemaId::LeanParams.validate(&value)
//! ```
//!
//! Validation checks, in order: the value is the right shape, every
//! required field is present, closed literal fields hold permitted values,
//! and documented numeric ranges hold. Unknown values in non-tag literal
//! fields (pixel states, `rslt`, hardware and add-on type strings) are
//! forward-compatibility signals, they are logged at warn level and carried
//! rather than rejected. Tags stay load bearing and reject.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::fmt;
use std::str::FromStr;

// External
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

// Internal
use crate::api::ros::{RosParseError, RosPublication};
use crate::api::ws::{
    AckPayload, CommandAckPayload, CommandPayload, DisconnectPayload, ErrorPayload,
    HeartbeatAckPayload, HeartbeatPayload, WsConfig,
};
use crate::api::{
    CommandResult, ConnectionConfig, HealthStatus, HwElem, HwStatusResponse, RicResponse, Rslt,
    SystemInfo, SystemStatus,
};
use crate::robot::addons::{
    AddOnInfo, AddOnQueryRequest, AddOnQueryResponse, AddOnStatus, ColorIRReading,
    ColorSensorReading, DiscoColorParams, FootSensorParams,
};
use crate::robot::traj::{
    ArmsParams, KickParams, LeanParams, MoveJointParams, SidestepParams, StopParams, WalkParams,
};
use crate::robot::{
    AccelerometerReading, JointInfo, ParseLiteralError, PowerStatus, RobotStatus,
};
use crate::sim::camera::{CameraConfig, CameraState, FollowCameraParams};
use crate::sim::{
    EnvironmentConfig, EnvironmentObject, Geometry, LightingConfig, MaterialPhysics,
    PhysicsConfig,
};
use crate::validate::{self, ValidateError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Every schema the catalogue publishes, by stable kebab-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    // WebSocket payloads
    ConnectAck,
    Disconnect,
    Heartbeat,
    HeartbeatAck,
    JointInfoList,
    RobotStatus,
    AccelReading,
    PowerStatus,
    AddOnInfoList,
    SystemStatus,
    Command,
    CommandAck,
    WsError,

    // Telemetry and REST records
    JointInfo,
    AddOnInfo,
    AddOnStatus,
    ColorIrReading,
    ColorSensorReading,
    HwElem,
    HwStatusResponse,
    RicResponse,
    SystemInfo,
    HealthStatus,
    RosPublication,

    // Command parameter records
    WalkParams,
    LeanParams,
    SidestepParams,
    KickParams,
    ArmsParams,
    MoveJointParams,
    StopParams,
    DiscoColorParams,
    FootSensorParams,
    AddOnQueryRequest,
    AddOnQueryResponse,

    // Client configuration records
    ConnectionConfig,
    WebSocketConfig,
    CommandResult,

    // Simulator descriptors
    Geometry,
    EnvironmentObject,
    EnvironmentConfig,
    MaterialPhysics,
    LightingConfig,
    PhysicsConfig,
    CameraConfig,
    FollowCameraParams,
    CameraState,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SchemaId {
    /// Every schema, grouped as declared.
    pub const ALL: [SchemaId; 47] = [
        SchemaId::ConnectAck,
        SchemaId::Disconnect,
        SchemaId::Heartbeat,
        SchemaId::HeartbeatAck,
        SchemaId::JointInfoList,
        SchemaId::RobotStatus,
        SchemaId::AccelReading,
        SchemaId::PowerStatus,
        SchemaId::AddOnInfoList,
        SchemaId::SystemStatus,
        SchemaId::Command,
        SchemaId::CommandAck,
        SchemaId::WsError,
        SchemaId::JointInfo,
        SchemaId::AddOnInfo,
        SchemaId::AddOnStatus,
        SchemaId::ColorIrReading,
        SchemaId::ColorSensorReading,
        SchemaId::HwElem,
        SchemaId::HwStatusResponse,
        SchemaId::RicResponse,
        SchemaId::SystemInfo,
        SchemaId::HealthStatus,
        SchemaId::RosPublication,
        SchemaId::WalkParams,
        SchemaId::LeanParams,
        SchemaId::SidestepParams,
        SchemaId::KickParams,
        SchemaId::ArmsParams,
        SchemaId::MoveJointParams,
        SchemaId::StopParams,
        SchemaId::DiscoColorParams,
        SchemaId::FootSensorParams,
        SchemaId::AddOnQueryRequest,
        SchemaId::AddOnQueryResponse,
        SchemaId::ConnectionConfig,
        SchemaId::WebSocketConfig,
        SchemaId::CommandResult,
        SchemaId::Geometry,
        SchemaId::EnvironmentObject,
        SchemaId::EnvironmentConfig,
        SchemaId::MaterialPhysics,
        SchemaId::LightingConfig,
        SchemaId::PhysicsConfig,
        SchemaId::CameraConfig,
        SchemaId::FollowCameraParams,
        SchemaId::CameraState,
    ];

    /// Stable name of this schema.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaId::ConnectAck => "connect-ack",
            SchemaId::Disconnect => "disconnect",
            SchemaId::Heartbeat => "heartbeat",
            SchemaId::HeartbeatAck => "heartbeat-ack",
            SchemaId::JointInfoList => "joint-info-list",
            SchemaId::RobotStatus => "robot-status",
            SchemaId::AccelReading => "accel-reading",
            SchemaId::PowerStatus => "power-status",
            SchemaId::AddOnInfoList => "add-on-info-list",
            SchemaId::SystemStatus => "system-status",
            SchemaId::Command => "command",
            SchemaId::CommandAck => "command-ack",
            SchemaId::WsError => "ws-error",
            SchemaId::JointInfo => "joint-info",
            SchemaId::AddOnInfo => "add-on-info",
            SchemaId::AddOnStatus => "add-on-status",
            SchemaId::ColorIrReading => "color-ir-reading",
            SchemaId::ColorSensorReading => "color-sensor-reading",
            SchemaId::HwElem => "hw-elem",
            SchemaId::HwStatusResponse => "hw-status-response",
            SchemaId::RicResponse => "ric-response",
            SchemaId::SystemInfo => "system-info",
            SchemaId::HealthStatus => "health-status",
            SchemaId::RosPublication => "ros-publication",
            SchemaId::WalkParams => "walk-params",
            SchemaId::LeanParams => "lean-params",
            SchemaId::SidestepParams => "sidestep-params",
            SchemaId::KickParams => "kick-params",
            SchemaId::ArmsParams => "arms-params",
            SchemaId::MoveJointParams => "move-joint-params",
            SchemaId::StopParams => "stop-params",
            SchemaId::DiscoColorParams => "disco-color-params",
            SchemaId::FootSensorParams => "foot-sensor-params",
            SchemaId::AddOnQueryRequest => "add-on-query-request",
            SchemaId::AddOnQueryResponse => "add-on-query-response",
            SchemaId::ConnectionConfig => "connection-config",
            SchemaId::WebSocketConfig => "websocket-config",
            SchemaId::CommandResult => "command-result",
            SchemaId::Geometry => "geometry",
            SchemaId::EnvironmentObject => "environment-object",
            SchemaId::EnvironmentConfig => "environment-config",
            SchemaId::MaterialPhysics => "material-physics",
            SchemaId::LightingConfig => "lighting-config",
            SchemaId::PhysicsConfig => "physics-config",
            SchemaId::CameraConfig => "camera-config",
            SchemaId::FollowCameraParams => "follow-camera-params",
            SchemaId::CameraState => "camera-state",
        }
    }

    /// Top level fields a record must carry to satisfy this schema.
    ///
    /// Spellings are the wire spellings. List schemas and the geometry
    /// union manage their own shape and report an empty table.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            SchemaId::ConnectAck => &["status", "serverVersion", "subscriptionRate"],
            SchemaId::Disconnect => &["reason"],
            SchemaId::Heartbeat => &["clientTime"],
            SchemaId::HeartbeatAck => &["serverTime", "clientTime"],
            SchemaId::JointInfoList => &[],
            SchemaId::RobotStatus => {
                &["flags", "workQCount", "isMoving", "isPaused", "isFwUpdating"]
            }
            SchemaId::AccelReading => &["x", "y", "z"],
            SchemaId::PowerStatus => &["battRemainCapacityPercent"],
            SchemaId::AddOnInfoList => &[],
            SchemaId::SystemStatus => &["uptimeSecs"],
            SchemaId::Command => &["endpoint"],
            SchemaId::CommandAck => &["commandId", "status"],
            SchemaId::WsError => &["code", "message"],
            SchemaId::JointInfo => {
                &["IDNo", "name", "pos", "current", "enabled", "commsOK", "flags"]
            }
            SchemaId::AddOnInfo => {
                &["IDNo", "name", "type", "whoAmITypeCode", "valid", "data"]
            }
            SchemaId::AddOnStatus => &["IDNo", "valid", "data"],
            SchemaId::ColorIrReading => {
                &["detectionFlags", "obstacleRaw", "groundRaw", "side"]
            }
            SchemaId::ColorSensorReading => &["red", "green", "blue", "clear", "hex"],
            SchemaId::HwElem => &["name", "type", "IDNo"],
            SchemaId::HwStatusResponse => &["rslt", "hw"],
            SchemaId::RicResponse => &["rslt"],
            SchemaId::SystemInfo => {
                &["HardwareVersion", "SystemName", "SystemVersion", "SerialNo", "MAC"]
            }
            SchemaId::HealthStatus => &["status", "version", "uptime", "components"],
            SchemaId::RosPublication => &["topic"],
            SchemaId::WalkParams => &[],
            SchemaId::LeanParams => &["direction"],
            SchemaId::SidestepParams => &["side"],
            SchemaId::KickParams => &[],
            SchemaId::ArmsParams => &["leftAngle", "rightAngle", "moveTime"],
            SchemaId::MoveJointParams => &["joint", "position", "moveTime"],
            SchemaId::StopParams => &[],
            SchemaId::DiscoColorParams => &["color"],
            SchemaId::FootSensorParams => &["addOnOrSide"],
            SchemaId::AddOnQueryRequest => {
                &["addOnName", "dataToWrite", "numBytesToRead"]
            }
            SchemaId::AddOnQueryResponse => &["rslt"],
            SchemaId::ConnectionConfig => &["method"],
            SchemaId::WebSocketConfig => &["url"],
            SchemaId::CommandResult => &["success"],
            SchemaId::Geometry => &["type"],
            SchemaId::EnvironmentObject => &[
                "id",
                "name",
                "type",
                "position",
                "rotation",
                "scale",
                "material",
                "isCollider",
            ],
            SchemaId::EnvironmentConfig => &[
                "id",
                "name",
                "type",
                "description",
                "objects",
                "lighting",
                "physics",
                "spawnPoint",
            ],
            SchemaId::MaterialPhysics => &["friction", "restitution", "density"],
            SchemaId::LightingConfig => &["ambient", "directional"],
            SchemaId::PhysicsConfig => &["gravity", "timeStep", "substeps", "enabled"],
            SchemaId::CameraConfig => {
                &["mode", "position", "target", "fov", "near", "far", "zoom"]
            }
            SchemaId::FollowCameraParams => {
                &["distance", "height", "angle", "smoothness", "lookAhead"]
            }
            SchemaId::CameraState => {
                &["mode", "config", "isTransitioning", "controlsEnabled"]
            }
        }
    }

    /// Validate an untyped value against this schema.
    pub fn validate(self, value: &Value) -> Result<(), ValidateError> {
        debug!("Validating against `{}`", self);

        match self {
            SchemaId::ConnectAck => self.record::<AckPayload>(value),
            SchemaId::Disconnect => self.record::<DisconnectPayload>(value),
            SchemaId::Heartbeat => self.record::<HeartbeatPayload>(value),
            SchemaId::HeartbeatAck => self.record::<HeartbeatAckPayload>(value),
            SchemaId::JointInfoList => list::<JointInfo>(value).map(|_| ()),
            SchemaId::RobotStatus => {
                let status: RobotStatus = self.parse(value)?;
                for state in status.unknown_pixel_states() {
                    warn!("unrecognised pixel state `{}` carried through", state);
                }
                Ok(())
            }
            SchemaId::AccelReading => self.record::<AccelerometerReading>(value),
            SchemaId::PowerStatus => self.record::<PowerStatus>(value),
            SchemaId::AddOnInfoList => {
                for info in list::<AddOnInfo>(value)?.iter() {
                    warn_unknown_addon(info);
                }
                Ok(())
            }
            SchemaId::SystemStatus => self.record::<SystemStatus>(value),
            SchemaId::Command => {
                let command: CommandPayload = self.parse(value)?;
                command.validate()
            }
            SchemaId::CommandAck => self.record::<CommandAckPayload>(value),
            SchemaId::WsError => self.record::<ErrorPayload>(value),
            SchemaId::JointInfo => self.record::<JointInfo>(value),
            SchemaId::AddOnInfo => {
                let info: AddOnInfo = self.parse(value)?;
                warn_unknown_addon(&info);
                Ok(())
            }
            SchemaId::AddOnStatus => self.record::<AddOnStatus>(value),
            SchemaId::ColorIrReading => self.record::<ColorIRReading>(value),
            SchemaId::ColorSensorReading => self.record::<ColorSensorReading>(value),
            SchemaId::HwElem => {
                let elem: HwElem = self.parse(value)?;
                warn_unknown_hw(&elem);
                Ok(())
            }
            SchemaId::HwStatusResponse => {
                let response: HwStatusResponse = self.parse(value)?;
                warn_unknown_rslt(&response.rslt);
                for elem in &response.hw {
                    warn_unknown_hw(elem);
                }
                Ok(())
            }
            SchemaId::RicResponse => {
                let response: RicResponse = self.parse(value)?;
                warn_unknown_rslt(&response.rslt);
                Ok(())
            }
            SchemaId::SystemInfo => self.record::<SystemInfo>(value),
            SchemaId::HealthStatus => self.record::<HealthStatus>(value),
            SchemaId::RosPublication => {
                RosPublication::from_value(value).map(|_| ()).map_err(ros_reason)
            }
            SchemaId::WalkParams => self.parse::<WalkParams>(value)?.validate(),
            SchemaId::LeanParams => self.parse::<LeanParams>(value)?.validate(),
            SchemaId::SidestepParams => self.parse::<SidestepParams>(value)?.validate(),
            SchemaId::KickParams => self.parse::<KickParams>(value)?.validate(),
            SchemaId::ArmsParams => self.parse::<ArmsParams>(value)?.validate(),
            SchemaId::MoveJointParams => self.parse::<MoveJointParams>(value)?.validate(),
            SchemaId::StopParams => self.record::<StopParams>(value),
            SchemaId::DiscoColorParams => self.parse::<DiscoColorParams>(value)?.validate(),
            SchemaId::FootSensorParams => self.record::<FootSensorParams>(value),
            SchemaId::AddOnQueryRequest => self.record::<AddOnQueryRequest>(value),
            SchemaId::AddOnQueryResponse => self.record::<AddOnQueryResponse>(value),
            SchemaId::ConnectionConfig => self.record::<ConnectionConfig>(value),
            SchemaId::WebSocketConfig => self.record::<WsConfig>(value),
            SchemaId::CommandResult => self.record::<CommandResult>(value),
            SchemaId::Geometry => Geometry::from_value(value).map(|_| ()),
            SchemaId::EnvironmentObject => self.record::<EnvironmentObject>(value),
            SchemaId::EnvironmentConfig => self.record::<EnvironmentConfig>(value),
            SchemaId::MaterialPhysics => self.parse::<MaterialPhysics>(value)?.validate(),
            SchemaId::LightingConfig => self.record::<LightingConfig>(value),
            SchemaId::PhysicsConfig => self.record::<PhysicsConfig>(value),
            SchemaId::CameraConfig => self.record::<CameraConfig>(value),
            SchemaId::FollowCameraParams => self.record::<FollowCameraParams>(value),
            SchemaId::CameraState => self.record::<CameraState>(value),
        }
    }

    /// Parse with the required-field table checked first, so a missing
    /// field is reported by its wire name before serde sees the value.
    fn parse<T: DeserializeOwned>(self, value: &Value) -> Result<T, ValidateError> {
        validate::require_fields(value, self.required_fields())?;
        validate::typed(value)
    }

    fn record<T: DeserializeOwned>(self, value: &Value) -> Result<(), ValidateError> {
        self.parse::<T>(value).map(|_| ())
    }
}

impl FromStr for SchemaId {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseLiteralError {
                literal: String::from(s),
                expected: "a schema name",
            })
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn list<T: DeserializeOwned>(value: &Value) -> Result<Vec<T>, ValidateError> {
    if !value.is_array() {
        return Err(ValidateError::WrongShape(String::from(
            "expected a JSON array",
        )));
    }

    validate::typed(value)
}

fn warn_unknown_addon(info: &AddOnInfo) {
    if !info.addon_type.is_known() {
        warn!(
            "unrecognised add-on type `{}` on `{}` carried through",
            info.addon_type.name(),
            info.name
        );
    }
}

fn warn_unknown_hw(elem: &HwElem) {
    if !elem.elem_type.is_known() {
        warn!(
            "unrecognised hardware type `{}` on `{}` carried through",
            elem.elem_type.name(),
            elem.name
        );
    }
}

fn warn_unknown_rslt(rslt: &Rslt) {
    if let Rslt::Other(other) = rslt {
        warn!("unrecognised rslt `{}` carried through", other);
    }
}

fn ros_reason(err: RosParseError) -> ValidateError {
    match err {
        RosParseError::InvalidJson(e) => validate::classify(&e),
        RosParseError::NotAnObject => {
            ValidateError::WrongShape(String::from("publication is not a JSON object"))
        }
        RosParseError::NoTopic => ValidateError::MissingField(String::from("topic")),
        RosParseError::UnknownTopic(topic) => ValidateError::UnknownLiteral {
            field: String::from("topic"),
            value: topic,
        },
        RosParseError::PayloadError { source, .. } => source,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn schema_names_are_unique_and_parse_back() {
        let names: HashSet<&str> = SchemaId::ALL.iter().map(|id| id.as_str()).collect();
        assert_eq!(names.len(), SchemaId::ALL.len());

        for id in SchemaId::ALL.iter() {
            assert_eq!(id.as_str().parse::<SchemaId>().unwrap(), *id);
        }

        assert!("no-such-schema".parse::<SchemaId>().is_err());
    }

    #[test]
    fn minimal_hwstatus_response_validates() {
        SchemaId::HwStatusResponse
            .validate(&json!({
                "rslt": "ok",
                "hw": [{"name": "LeftHip", "type": "SmartServo", "IDNo": 0}],
            }))
            .unwrap();
    }

    #[test]
    fn missing_required_field_is_named() {
        let err = SchemaId::CameraState
            .validate(&json!({
                "mode": "free",
                "config": {},
                "isTransitioning": false,
            }))
            .unwrap_err();

        assert_eq!(
            err,
            ValidateError::MissingField(String::from("controlsEnabled"))
        );
    }

    #[test]
    fn optional_only_params_accept_an_empty_object() {
        SchemaId::WalkParams.validate(&json!({})).unwrap();
        SchemaId::KickParams.validate(&json!({})).unwrap();
        SchemaId::StopParams.validate(&json!({})).unwrap();

        assert!(matches!(
            SchemaId::WalkParams.validate(&json!([1, 2])),
            Err(ValidateError::WrongShape(_))
        ));
    }

    #[test]
    fn lean_amount_is_range_checked() {
        let err = SchemaId::LeanParams
            .validate(&json!({"direction": "left", "amount": 200}))
            .unwrap_err();

        assert!(matches!(err, ValidateError::OutOfRange { .. }));

        SchemaId::LeanParams
            .validate(&json!({"direction": "left", "amount": 30}))
            .unwrap();
    }

    #[test]
    fn command_schema_checks_endpoint_parameters() {
        SchemaId::Command
            .validate(&json!({"endpoint": "traj/getReady"}))
            .unwrap();

        let err = SchemaId::Command
            .validate(&json!({"endpoint": "traj/step", "params": {"turn": 150}}))
            .unwrap_err();
        assert!(matches!(err, ValidateError::OutOfRange { .. }));

        let err = SchemaId::Command
            .validate(&json!({"endpoint": "traj/teleport"}))
            .unwrap_err();
        assert!(matches!(err, ValidateError::UnknownLiteral { .. }));
    }

    #[test]
    fn geometry_schema_stays_strict() {
        SchemaId::Geometry
            .validate(&json!({"type": "sphere", "radius": 1.0}))
            .unwrap();

        assert!(matches!(
            SchemaId::Geometry.validate(&json!({
                "type": "sphere",
                "radius": 1.0,
                "width": 2.0,
            })),
            Err(ValidateError::WrongShape(_))
        ));
    }

    #[test]
    fn ros_schema_rejects_unknown_topics() {
        SchemaId::RosPublication
            .validate(&json!({"topic": "accel", "x": 0.0, "y": 0.0, "z": 1.0}))
            .unwrap();

        let err = SchemaId::RosPublication
            .validate(&json!({"topic": "odom"}))
            .unwrap_err();
        match err {
            ValidateError::UnknownLiteral { field, value } => {
                assert_eq!(field, "topic");
                assert_eq!(value, "odom");
            }
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }
    }

    #[test]
    fn material_schema_checks_coefficients() {
        let err = SchemaId::MaterialPhysics
            .validate(&json!({"friction": 2.0, "restitution": 0.5, "density": 700.0}))
            .unwrap_err();

        assert!(matches!(err, ValidateError::OutOfRange { .. }));
    }

    #[test]
    fn list_schemas_demand_arrays() {
        SchemaId::JointInfoList
            .validate(&json!([{
                "IDNo": 0,
                "name": "left hip",
                "pos": 0.0,
                "current": 0.0,
                "enabled": true,
                "commsOK": true,
                "flags": 1,
            }]))
            .unwrap();

        assert!(matches!(
            SchemaId::JointInfoList.validate(&json!({"IDNo": 0})),
            Err(ValidateError::WrongShape(_))
        ));
    }

    #[test]
    fn joint_selector_resolves_through_move_joint_schema() {
        SchemaId::MoveJointParams
            .validate(&json!({"joint": "left hip", "position": 20.0, "moveTime": 1000}))
            .unwrap();
        SchemaId::MoveJointParams
            .validate(&json!({"joint": 3, "position": -10.0, "moveTime": 500}))
            .unwrap();

        let err = SchemaId::MoveJointParams
            .validate(&json!({"joint": "nowhere", "position": 0.0, "moveTime": 500}))
            .unwrap_err();
        assert!(matches!(err, ValidateError::UnknownLiteral { .. }));
    }

    #[test]
    fn unknown_non_tag_literals_degrade_instead_of_failing() {
        SchemaId::RobotStatus
            .validate(&json!({
                "flags": 0,
                "workQCount": 0,
                "isMoving": false,
                "isPaused": false,
                "isFwUpdating": false,
                "pixRGBT": [{"r": 0, "g": 255, "b": 0, "state": "sparkle"}],
            }))
            .unwrap();

        SchemaId::RicResponse
            .validate(&json!({"rslt": "partial", "data": {"x": 1}}))
            .unwrap();

        SchemaId::HwElem
            .validate(&json!({"name": "Mystery", "type": "FluxCapacitor", "IDNo": 9}))
            .unwrap();
    }
}
