//! # REST API surface
//!
//! Endpoint paths, the generic RIC response envelope and the records returned
//! by the status endpoints. The WebSocket and ROS serial surfaces live in the
//! [`ws`] and [`ros`] submodules.
//!
//! Two quirks of the RIC API are preserved deliberately:
//!
//! - Some logical actions share a wire path. `traj/step` serves both the step
//!   and walk actions, so [`Endpoint::TrajStep`] and [`Endpoint::TrajWalk`]
//!   are distinct variants with equal paths. Parsing a shared path yields the
//!   first declared variant, compare with [`Endpoint::same_path`] when the
//!   wire form is what matters.
//! - The LED endpoints are templates containing a literal `{name}` segment.
//!   They are carried verbatim in command messages, the add-on name travels
//!   in the parameters and [`Endpoint::filled`] builds the concrete path.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

// External
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

// Internal
use crate::validate::ValidateError;

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod ros;
pub mod ws;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// REST endpoints of the RIC API.
///
/// The paths are stable wire identifiers. Variants are never removed or
/// renumbered, new firmware adds new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Endpoint {
    TrajGetReady,
    TrajStandStraight,
    TrajStep,
    /// Alias of [`Endpoint::TrajStep`], same wire path.
    TrajWalk,
    TrajKick,
    TrajWave,
    TrajLean,
    TrajSidestep,
    TrajCircle,
    TrajDance,
    TrajWiggle,
    TrajJoint,
    TrajEyesAngry,
    TrajEyesExcited,
    TrajEyesNormal,
    TrajEyesWide,
    TrajWiggleEyes,
    AudioVolume,
    AudioPlay,
    /// Template path, fill with [`Endpoint::filled`].
    LedOff,
    /// Template path, fill with [`Endpoint::filled`].
    LedPattern,
    /// Template path, fill with [`Endpoint::filled`].
    LedColor,
    HwStatus,
    SystemInfo,
    TrajPause,
    TrajResume,
    TrajStop,
}

/// Result literal of the generic RIC response.
///
/// Firmware is only documented to send `ok` and `fail` but has been seen
/// sending other strings, those are kept rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rslt {
    Ok,
    Fail,
    #[serde(untagged)]
    Other(String),
}

/// Hardware element types reported by `hwstatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HwElemType {
    #[serde(rename = "SmartServo")]
    SmartServo,
    #[serde(rename = "IMU")]
    Imu,
    #[serde(rename = "I2SOut")]
    I2sOut,
    #[serde(rename = "BusPixels")]
    BusPixels,
    #[serde(rename = "GPIO")]
    Gpio,
    #[serde(rename = "FuelGauge")]
    FuelGauge,
    #[serde(rename = "PowerCtrl")]
    PowerCtrl,
    /// Hardware newer than this catalogue, kept as its raw literal.
    #[serde(untagged)]
    Other(String),
}

/// Connection transport selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMethod {
    Wifi,
    Usb,
    Exp,
    Test,
}

/// Overall service health literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Liveness of a single service component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    Up,
    Down,
    Unknown,
}

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestValue {
    Str(String),
    Num(Number),
    Bool(bool),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Generic envelope of every RIC REST response.
///
/// Firmware freely attaches extra top level fields, they are preserved in
/// `extra` so a response survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RicResponse<T = Value> {
    pub rslt: Rslt,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the `hwstatus` endpoint. The element list arrives under the
/// `hw` key, not `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HwStatusResponse {
    pub rslt: Rslt,
    pub hw: Vec<HwElem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One hardware element of the `hwstatus` response.
///
/// `addr_valid` and `comms_ok` are 0/1 numbers on the wire, not booleans,
/// use [`HwElem::is_addr_valid`] and [`HwElem::is_comms_ok`] for a typed
/// view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HwElem {
    pub name: String,

    #[serde(rename = "type")]
    pub elem_type: HwElemType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr: Option<u32>,

    /// 0 or 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_valid: Option<u8>,

    #[serde(rename = "IDNo")]
    pub id_no: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_am_i: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_am_i_type_code: Option<String>,

    #[serde(rename = "SN", skip_serializing_if = "Option::is_none")]
    pub sn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_str: Option<String>,

    /// 0 or 1.
    #[serde(rename = "commsOK", skip_serializing_if = "Option::is_none")]
    pub comms_ok: Option<u8>,
}

/// Response of the `v` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemInfo {
    pub hardware_version: String,
    pub system_name: String,
    pub system_version: String,
    pub serial_no: String,

    #[serde(rename = "MAC")]
    pub mac: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ric_hw_rev_no: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a client connects to the robot or simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub method: ConnectMethod,

    /// Address, serial port or similar, depending on the method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_rate_hz: Option<f64>,
}

/// Outcome of a single issued command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Seconds the command took end to end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Liveness of the individual service components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub engine: ComponentState,
    pub websocket: ComponentState,
    pub physics: ComponentState,
}

/// Health summary of the whole service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub version: String,

    /// Seconds since service start.
    pub uptime: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemStatus>,

    pub components: ComponentHealth,
}

/// Runtime metrics of the simulation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Seconds since service start.
    pub uptime_secs: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_time_secs: Option<f64>,

    /// Simulation speed relative to wall clock, 1.0 is real time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_time_factor: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,

    #[serde(rename = "memoryUsedMB", skip_serializing_if = "Option::is_none")]
    pub memory_used_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_clients: Option<u32>,
}

/// Query parameters of a REST request, ordered for stable rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestParams(pub BTreeMap<String, RestValue>);

/// A fully formed REST request, endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RicRequest {
    pub endpoint: Endpoint,
    pub params: RestParams,
}

/// Raised when a path does not belong to the endpoint table.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown endpoint `{0}`")]
pub struct UnknownEndpointError(pub String);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Endpoint {
    /// Every endpoint, in declaration order. Aliased paths appear once per
    /// named variant.
    pub const ALL: [Endpoint; 27] = [
        Endpoint::TrajGetReady,
        Endpoint::TrajStandStraight,
        Endpoint::TrajStep,
        Endpoint::TrajWalk,
        Endpoint::TrajKick,
        Endpoint::TrajWave,
        Endpoint::TrajLean,
        Endpoint::TrajSidestep,
        Endpoint::TrajCircle,
        Endpoint::TrajDance,
        Endpoint::TrajWiggle,
        Endpoint::TrajJoint,
        Endpoint::TrajEyesAngry,
        Endpoint::TrajEyesExcited,
        Endpoint::TrajEyesNormal,
        Endpoint::TrajEyesWide,
        Endpoint::TrajWiggleEyes,
        Endpoint::AudioVolume,
        Endpoint::AudioPlay,
        Endpoint::LedOff,
        Endpoint::LedPattern,
        Endpoint::LedColor,
        Endpoint::HwStatus,
        Endpoint::SystemInfo,
        Endpoint::TrajPause,
        Endpoint::TrajResume,
        Endpoint::TrajStop,
    ];

    /// The wire path of this endpoint.
    pub fn as_path(self) -> &'static str {
        match self {
            Endpoint::TrajGetReady => "traj/getReady",
            Endpoint::TrajStandStraight => "traj/standStraight",
            Endpoint::TrajStep => "traj/step",
            Endpoint::TrajWalk => "traj/step",
            Endpoint::TrajKick => "traj/kick",
            Endpoint::TrajWave => "traj/wave",
            Endpoint::TrajLean => "traj/lean",
            Endpoint::TrajSidestep => "traj/sidestep",
            Endpoint::TrajCircle => "traj/circle",
            Endpoint::TrajDance => "traj/dance",
            Endpoint::TrajWiggle => "traj/wiggle",
            Endpoint::TrajJoint => "traj/joint",
            Endpoint::TrajEyesAngry => "traj/eyesAngry",
            Endpoint::TrajEyesExcited => "traj/eyesExcited",
            Endpoint::TrajEyesNormal => "traj/eyesNormal",
            Endpoint::TrajEyesWide => "traj/eyesWide",
            Endpoint::TrajWiggleEyes => "traj/wiggleEyes",
            Endpoint::AudioVolume => "audio/vol",
            Endpoint::AudioPlay => "filerun",
            Endpoint::LedOff => "led/{name}/off",
            Endpoint::LedPattern => "led/{name}/pattern",
            Endpoint::LedColor => "led/{name}/color",
            Endpoint::HwStatus => "hwstatus",
            Endpoint::SystemInfo => "v",
            Endpoint::TrajPause => "traj/pause",
            Endpoint::TrajResume => "traj/resume",
            Endpoint::TrajStop => "traj/stop",
        }
    }

    /// Look an endpoint up by wire path. Paths shared by several variants
    /// resolve to the first declared one, so `"traj/step"` gives
    /// [`Endpoint::TrajStep`].
    pub fn from_path(path: &str) -> Result<Endpoint, UnknownEndpointError> {
        Endpoint::ALL
            .iter()
            .copied()
            .find(|e| e.as_path() == path)
            .ok_or_else(|| UnknownEndpointError(String::from(path)))
    }

    /// True if the two endpoints share a wire path, regardless of which
    /// named variant they are.
    pub fn same_path(self, other: Endpoint) -> bool {
        self.as_path() == other.as_path()
    }

    /// True for template paths containing a `{name}` segment.
    pub fn is_template(self) -> bool {
        self.as_path().contains("{name}")
    }

    /// The path with any `{name}` segment replaced by `name`. Identity for
    /// non-template endpoints.
    pub fn filled(self, name: &str) -> String {
        self.as_path().replace("{name}", name)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = UnknownEndpointError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Endpoint::from_path(&path)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> String {
        String::from(endpoint.as_path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

impl Rslt {
    pub fn is_ok(&self) -> bool {
        matches!(self, Rslt::Ok)
    }
}

impl HwElemType {
    /// The documented element types. [`HwElemType::Other`] values are
    /// outside this set by definition.
    pub const KNOWN: [HwElemType; 7] = [
        HwElemType::SmartServo,
        HwElemType::Imu,
        HwElemType::I2sOut,
        HwElemType::BusPixels,
        HwElemType::Gpio,
        HwElemType::FuelGauge,
        HwElemType::PowerCtrl,
    ];

    pub fn name(&self) -> &str {
        match self {
            HwElemType::SmartServo => "SmartServo",
            HwElemType::Imu => "IMU",
            HwElemType::I2sOut => "I2SOut",
            HwElemType::BusPixels => "BusPixels",
            HwElemType::Gpio => "GPIO",
            HwElemType::FuelGauge => "FuelGauge",
            HwElemType::PowerCtrl => "PowerCtrl",
            HwElemType::Other(s) => s.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, HwElemType::Other(_))
    }
}

impl<T> RicResponse<T> {
    pub fn ok(data: T) -> Self {
        RicResponse {
            rslt: Rslt::Ok,
            data: Some(data),
            extra: Map::new(),
        }
    }

    pub fn fail() -> Self {
        RicResponse {
            rslt: Rslt::Fail,
            data: None,
            extra: Map::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.rslt.is_ok()
    }
}

impl HwElem {
    pub fn is_addr_valid(&self) -> Option<bool> {
        self.addr_valid.map(|v| v != 0)
    }

    pub fn is_comms_ok(&self) -> Option<bool> {
        self.comms_ok.map(|v| v != 0)
    }
}

impl RestParams {
    pub fn new() -> Self {
        RestParams(BTreeMap::new())
    }

    /// Build query parameters from a serialisable record. Fields holding
    /// `None` disappear, everything else must flatten to scalars.
    pub fn from_record<T: Serialize>(record: &T) -> Result<RestParams, ValidateError> {
        let value = serde_json::to_value(record)
            .map_err(|e| ValidateError::WrongShape(e.to_string()))?;
        RestParams::from_value(&value)
    }

    /// Build query parameters from a JSON object of scalars.
    pub fn from_value(value: &Value) -> Result<RestParams, ValidateError> {
        let obj = value.as_object().ok_or_else(|| {
            ValidateError::WrongShape(String::from("query parameters must be a JSON object"))
        })?;

        let mut params = BTreeMap::new();
        for (key, val) in obj {
            let rest_value = match val {
                Value::String(s) => RestValue::Str(s.clone()),
                Value::Number(n) => RestValue::Num(n.clone()),
                Value::Bool(b) => RestValue::Bool(*b),
                other => {
                    return Err(ValidateError::WrongShape(format!(
                        "query parameter `{}` must be a scalar, got {}",
                        key, other
                    )));
                }
            };
            params.insert(key.clone(), rest_value);
        }

        Ok(RestParams(params))
    }

    /// The parameters as a JSON object.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        for (key, val) in &self.0 {
            let value = match val {
                RestValue::Str(s) => Value::String(s.clone()),
                RestValue::Num(n) => Value::Number(n.clone()),
                RestValue::Bool(b) => Value::Bool(*b),
            };
            obj.insert(key.clone(), value);
        }
        Value::Object(obj)
    }

    pub fn insert<V: Into<RestValue>>(&mut self, key: &str, value: V) {
        self.0.insert(String::from(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RestValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RestValue)> {
        self.0.iter()
    }
}

impl RicRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        RicRequest {
            endpoint,
            params: RestParams::new(),
        }
    }

    /// Render the request as `path?key=value&...`.
    ///
    /// Values are written verbatim, a caller feeding this to an HTTP client
    /// must URL encode it first.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::from(self.endpoint.as_path());
        }

        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();

        format!("{}?{}", self.endpoint.as_path(), pairs.join("&"))
    }
}

impl fmt::Display for RestValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RestValue::Str(s) => write!(f, "{}", s),
            RestValue::Num(n) => write!(f, "{}", n),
            RestValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for RestValue {
    fn from(s: &str) -> Self {
        RestValue::Str(String::from(s))
    }
}

impl From<String> for RestValue {
    fn from(s: String) -> Self {
        RestValue::Str(s)
    }
}

impl From<u32> for RestValue {
    fn from(n: u32) -> Self {
        RestValue::Num(Number::from(n))
    }
}

impl From<i64> for RestValue {
    fn from(n: i64) -> Self {
        RestValue::Num(Number::from(n))
    }
}

impl From<bool> for RestValue {
    fn from(b: bool) -> Self {
        RestValue::Bool(b)
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
    fn endpoint_paths_are_stable() {
        assert_eq!(Endpoint::TrajGetReady.as_path(), "traj/getReady");
        assert_eq!(Endpoint::AudioPlay.as_path(), "filerun");
        assert_eq!(Endpoint::SystemInfo.as_path(), "v");
        assert_eq!(Endpoint::HwStatus.as_path(), "hwstatus");
        assert_eq!(Endpoint::TrajWiggleEyes.as_path(), "traj/wiggleEyes");
    }

    #[test]
    fn every_endpoint_survives_a_path_round_trip() {
        for endpoint in Endpoint::ALL.iter() {
            let back = Endpoint::from_path(endpoint.as_path()).unwrap();
            assert!(back.same_path(*endpoint), "path mismatch for {:?}", endpoint);
        }

        assert!(Endpoint::from_path("traj/teleport").is_err());
    }

    #[test]
    fn aliased_path_resolves_to_first_declared_variant() {
        // Step and walk intentionally share a path
        assert_eq!(Endpoint::TrajStep.as_path(), Endpoint::TrajWalk.as_path());
        assert_ne!(Endpoint::TrajStep, Endpoint::TrajWalk);
        assert_eq!(
            Endpoint::from_path("traj/step").unwrap(),
            Endpoint::TrajStep
        );
        assert!(Endpoint::TrajWalk.same_path(Endpoint::TrajStep));
    }

    #[test]
    fn endpoint_serialises_as_its_path() {
        assert_eq!(
            serde_json::to_value(Endpoint::TrajLean).unwrap(),
            json!("traj/lean")
        );
        assert_eq!(
            serde_json::from_value::<Endpoint>(json!("traj/kick")).unwrap(),
            Endpoint::TrajKick
        );

        let err = serde_json::from_value::<Endpoint>(json!("warp/engage")).unwrap_err();
        assert!(err.to_string().contains("unknown endpoint `warp/engage`"));
    }

    #[test]
    fn led_templates_fill_in_the_addon_name() {
        assert!(Endpoint::LedColor.is_template());
        assert!(!Endpoint::HwStatus.is_template());
        assert_eq!(Endpoint::LedColor.filled("LEDeye"), "led/LEDeye/color");
        assert_eq!(Endpoint::LedOff.filled("LEDfoot"), "led/LEDfoot/off");
    }

    #[test]
    fn rslt_keeps_unexpected_literals() {
        assert_eq!(serde_json::from_value::<Rslt>(json!("ok")).unwrap(), Rslt::Ok);
        assert_eq!(
            serde_json::from_value::<Rslt>(json!("fail")).unwrap(),
            Rslt::Fail
        );

        let other = serde_json::from_value::<Rslt>(json!("busy")).unwrap();
        assert_eq!(other, Rslt::Other(String::from("busy")));
        assert_eq!(serde_json::to_value(&other).unwrap(), json!("busy"));
    }

    #[test]
    fn ric_response_preserves_extra_fields() {
        let response: RicResponse = serde_json::from_value(json!({
            "rslt": "ok",
            "clientCount": 2,
        }))
        .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.data, None);
        assert_eq!(response.extra["clientCount"], json!(2));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["clientCount"], json!(2));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn hwstatus_minimal_element_parses() {
        let response: HwStatusResponse = serde_json::from_value(json!({
            "rslt": "ok",
            "hw": [{"name": "LeftHip", "type": "SmartServo", "IDNo": 0}],
        }))
        .unwrap();

        assert!(response.rslt.is_ok());
        let elem = &response.hw[0];
        assert_eq!(elem.name, "LeftHip");
        assert_eq!(elem.elem_type, HwElemType::SmartServo);
        assert_eq!(elem.id_no, 0);
        assert_eq!(elem.bus_name, None);
        assert_eq!(elem.is_comms_ok(), None);
    }

    #[test]
    fn hw_elem_flag_numbers_read_as_booleans() {
        let elem: HwElem = serde_json::from_value(json!({
            "name": "IMU0",
            "type": "IMU",
            "IDNo": 10,
            "addrValid": 1,
            "commsOK": 0,
        }))
        .unwrap();

        assert_eq!(elem.is_addr_valid(), Some(true));
        assert_eq!(elem.is_comms_ok(), Some(false));
    }

    #[test]
    fn unexpected_hw_elem_type_degrades_to_other() {
        let elem: HwElem = serde_json::from_value(json!({
            "name": "X1",
            "type": "QuantumFlux",
            "IDNo": 99,
        }))
        .unwrap();

        assert!(!elem.elem_type.is_known());
        assert_eq!(elem.elem_type.name(), "QuantumFlux");

        // Degraded literal still round trips
        let value = serde_json::to_value(&elem).unwrap();
        assert_eq!(value["type"], json!("QuantumFlux"));
    }

    #[test]
    fn system_info_uses_firmware_casing() {
        let info: SystemInfo = serde_json::from_value(json!({
            "HardwareVersion": "2.0",
            "SystemName": "Marty",
            "SystemVersion": "1.2.0",
            "SerialNo": "0011aabb",
            "MAC": "aa:bb:cc:dd:ee:ff",
            "RicHwRevNo": 2,
            "Nickname": "marty-42",
        }))
        .unwrap();

        assert_eq!(info.system_name, "Marty");
        assert_eq!(info.ric_hw_rev_no, Some(2));
        assert_eq!(info.extra["Nickname"], json!("marty-42"));

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["MAC"], json!("aa:bb:cc:dd:ee:ff"));
        assert_eq!(value["Nickname"], json!("marty-42"));
    }

    #[test]
    fn health_status_round_trips() {
        let health = HealthStatus {
            status: HealthState::Degraded,
            version: String::from("0.3.1"),
            uptime: 120.5,
            system: Some(SystemStatus {
                uptime_secs: 120.5,
                sim_time_secs: Some(60.0),
                real_time_factor: Some(0.5),
                cpu_percent: None,
                memory_used_mb: None,
                active_clients: Some(1),
            }),
            components: ComponentHealth {
                engine: ComponentState::Up,
                websocket: ComponentState::Up,
                physics: ComponentState::Down,
            },
        };

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], json!("degraded"));
        assert_eq!(value["components"]["physics"], json!("down"));
        assert_eq!(value["system"]["realTimeFactor"], json!(0.5));

        let back: HealthStatus = serde_json::from_value(value).unwrap();
        assert_eq!(back, health);
    }

    #[test]
    fn connection_config_literals() {
        let config: ConnectionConfig = serde_json::from_value(json!({
            "method": "wifi",
            "locator": "192.168.0.42",
            "subscribeRateHz": 10.0,
        }))
        .unwrap();

        assert_eq!(config.method, ConnectMethod::Wifi);
        assert_eq!(config.blocking, None);

        assert!(serde_json::from_value::<ConnectionConfig>(json!({"method": "radio"})).is_err());
    }

    #[test]
    fn rest_params_render_in_stable_order() {
        let mut params = RestParams::new();
        params.insert("volume", 75u32);
        params.insert("loop", false);
        params.insert("file", "beep.mp3");

        let request = RicRequest {
            endpoint: Endpoint::AudioPlay,
            params,
        };

        // BTreeMap ordering keeps the rendering deterministic
        assert_eq!(
            request.to_query_string(),
            "filerun?file=beep.mp3&loop=false&volume=75"
        );
    }

    #[test]
    fn rest_params_reject_nested_values() {
        let err = RestParams::from_value(&json!({"config": {"a": 1}})).unwrap_err();
        assert!(matches!(err, ValidateError::WrongShape(_)));
    }

    #[test]
    fn rest_params_round_trip_through_value() {
        let mut params = RestParams::new();
        params.insert("numSteps", 2u32);
        params.insert("startFoot", "auto");

        let value = params.to_value();
        assert_eq!(value, json!({"numSteps": 2, "startFoot": "auto"}));
        assert_eq!(RestParams::from_value(&value).unwrap(), params);
    }
}
