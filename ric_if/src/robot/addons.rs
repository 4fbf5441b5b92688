//! # Add-on peripheral records
//!
//! Add-ons are pluggable peripherals (IR feet, colour sensors, disco LED
//! boards) identified by name and type string. The type set grows with
//! firmware releases, so an unrecognised type is carried in an `Other`
//! variant rather than rejected.
//!
//! Each add-on reports up to 10 raw payload bytes. The documented decodings
//! for the IR foot and colour sensor payloads live here as well, producing
//! [`ColorIRReading`] and [`ColorSensorReading`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// External
use byteorder::{BigEndian, ByteOrder};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use structopt::StructOpt;
use thiserror::Error;

// Internal
use crate::api::{Endpoint, RestParams, Rslt};
use crate::robot::{ParseLiteralError, Side};
use crate::validate::ValidateError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Known add-on type strings.
///
/// The spellings are firmware constants and deliberately inconsistent,
/// `IRFoot` but `coloursensor`. Unknown strings land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddOnType {
    #[serde(rename = "IRFoot")]
    IrFoot,
    #[serde(rename = "coloursensor")]
    ColourSensor,
    #[serde(rename = "LEDfoot")]
    LedFoot,
    #[serde(rename = "LEDarm")]
    LedArm,
    #[serde(rename = "LEDeye")]
    LedEye,
    #[serde(rename = "distance")]
    Distance,
    #[serde(untagged)]
    Other(String),
}

/// Named colours of the disco LED palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoColor {
    White,
    Red,
    Blue,
    Yellow,
    Green,
    Teal,
    Pink,
    Purple,
    Orange,
}

/// Built-in disco LED animation patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoPattern {
    #[serde(rename = "show-off")]
    ShowOff,
    #[serde(rename = "pinwheel")]
    Pinwheel,
    #[serde(rename = "off")]
    Off,
}

/// Disco LED board groups addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoAddOn {
    Arms,
    Feet,
    Eyes,
    All,
}

/// A single LED region of a disco board.
///
/// The wire form is a number for one of the three physical regions, or the
/// string `"all"` for the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoRegion {
    Index(u8),
    All,
}

/// Channels reported by the colour sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
    Clear,
}

/// A disco colour as a caller gives it: a palette name, an explicit RGB
/// triple, or a hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(DiscoColor),
    Rgb(RGBColor),
    Css(String),
}

/// A disco LED command with its parameters.
///
/// The builder side of the LED endpoints: each variant knows its template
/// REST endpoint and how its parameters travel in a `command` payload.
#[derive(Debug, Clone, PartialEq, StructOpt)]
pub enum DiscoCmd {
    /// Set a group of LEDs to a colour
    Color {
        /// Palette name, hex string or CSS colour
        color: ColorSpec,

        /// Group to address, arms, feet, eyes or all
        #[structopt(short = "g", long, default_value = "all")]
        group: DiscoAddOn,

        /// Single region of the board, 0 to 2, or all
        #[structopt(short = "r", long)]
        region: Option<DiscoRegion>,
    },

    /// Play a pattern on a group of LEDs
    Pattern {
        /// One of show-off, pinwheel or off
        pattern: DiscoPattern,

        /// Group to address, arms, feet, eyes or all
        #[structopt(short = "g", long, default_value = "all")]
        group: DiscoAddOn,
    },

    /// Turn a group of LEDs off
    Off {
        /// Group to address, arms, feet, eyes or all
        #[structopt(short = "g", long, default_value = "all")]
        group: DiscoAddOn,
    },
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Identity and latest raw payload of one add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnInfo {
    #[serde(rename = "IDNo")]
    pub id_no: u8,

    /// User visible name, for example `"LeftIRFoot"`.
    pub name: String,

    #[serde(rename = "type")]
    pub addon_type: AddOnType,

    /// Identity string reported by the whoAmI register.
    #[serde(rename = "whoAmITypeCode")]
    pub who_am_i_type_code: String,

    pub valid: bool,

    /// Up to 10 raw payload bytes.
    pub data: Vec<u8>,
}

/// Compact per add-on status, identity stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnStatus {
    #[serde(rename = "IDNo")]
    pub id_no: u8,

    pub valid: bool,
    pub data: Vec<u8>,
}

/// Raw register query against one add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnQueryRequest {
    pub add_on_name: String,

    /// Bytes written before the read, base64 on the wire.
    #[serde(with = "base64_bytes")]
    pub data_to_write: Vec<u8>,

    pub num_bytes_to_read: u8,
}

/// Answer to an [`AddOnQueryRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnQueryResponse {
    pub rslt: Rslt,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_read: Option<Vec<u8>>,
}

/// An RGB triple, 0 to 255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parameters of the disco colour command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoColorParams {
    pub color: ColorSpec,

    /// Add-on name, all boards when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<DiscoRegion>,
}

/// Decoded IR foot payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorIRReading {
    pub detection_flags: u8,
    pub obstacle_raw: u16,
    pub ground_raw: u16,
    pub side: Side,
}

/// Decoded colour sensor payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSensorReading {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub clear: u8,

    /// `#rrggbb` rendering of the RGB channels.
    pub hex: String,
}

/// Selector for foot sensor calls, an add-on name or a bare side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootSensorParams {
    pub add_on_or_side: String,
}

/// Raised when an add-on payload is shorter than its documented layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddOnDecodeError {
    #[error("payload is {got} bytes but the decode needs {needed}")]
    TooShort { needed: usize, got: usize },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AddOnType {
    /// Every known type, in firmware constant order.
    pub const KNOWN: [AddOnType; 6] = [
        AddOnType::IrFoot,
        AddOnType::ColourSensor,
        AddOnType::LedFoot,
        AddOnType::LedArm,
        AddOnType::LedEye,
        AddOnType::Distance,
    ];

    /// The wire spelling, or the raw string for unknown types.
    pub fn name(&self) -> &str {
        match self {
            AddOnType::IrFoot => "IRFoot",
            AddOnType::ColourSensor => "coloursensor",
            AddOnType::LedFoot => "LEDfoot",
            AddOnType::LedArm => "LEDarm",
            AddOnType::LedEye => "LEDeye",
            AddOnType::Distance => "distance",
            AddOnType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AddOnType::Other(_))
    }

    /// True for the LED board types the disco commands address.
    pub fn is_disco(&self) -> bool {
        matches!(
            self,
            AddOnType::LedFoot | AddOnType::LedArm | AddOnType::LedEye
        )
    }
}

impl fmt::Display for AddOnType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl DiscoColor {
    /// Every palette colour.
    pub const ALL: [DiscoColor; 9] = [
        DiscoColor::White,
        DiscoColor::Red,
        DiscoColor::Blue,
        DiscoColor::Yellow,
        DiscoColor::Green,
        DiscoColor::Teal,
        DiscoColor::Pink,
        DiscoColor::Purple,
        DiscoColor::Orange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiscoColor::White => "white",
            DiscoColor::Red => "red",
            DiscoColor::Blue => "blue",
            DiscoColor::Yellow => "yellow",
            DiscoColor::Green => "green",
            DiscoColor::Teal => "teal",
            DiscoColor::Pink => "pink",
            DiscoColor::Purple => "purple",
            DiscoColor::Orange => "orange",
        }
    }

    /// The RGB value the firmware renders for this name.
    pub fn rgb(self) -> RGBColor {
        let (r, g, b) = match self {
            DiscoColor::White => (255, 255, 255),
            DiscoColor::Red => (255, 0, 0),
            DiscoColor::Blue => (0, 0, 255),
            DiscoColor::Yellow => (255, 255, 0),
            DiscoColor::Green => (0, 255, 0),
            DiscoColor::Teal => (0, 128, 128),
            DiscoColor::Pink => (255, 105, 180),
            DiscoColor::Purple => (128, 0, 128),
            DiscoColor::Orange => (255, 165, 0),
        };

        RGBColor { r, g, b }
    }
}

impl FromStr for DiscoColor {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscoColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseLiteralError {
                literal: String::from(s),
                expected: "a disco palette colour",
            })
    }
}

impl fmt::Display for DiscoColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DiscoPattern {
    pub const ALL: [DiscoPattern; 3] = [
        DiscoPattern::ShowOff,
        DiscoPattern::Pinwheel,
        DiscoPattern::Off,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiscoPattern::ShowOff => "show-off",
            DiscoPattern::Pinwheel => "pinwheel",
            DiscoPattern::Off => "off",
        }
    }
}

impl FromStr for DiscoPattern {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscoPattern::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseLiteralError {
                literal: String::from(s),
                expected: "a disco pattern",
            })
    }
}

impl fmt::Display for DiscoPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DiscoAddOn {
    pub const ALL: [DiscoAddOn; 4] = [
        DiscoAddOn::Arms,
        DiscoAddOn::Feet,
        DiscoAddOn::Eyes,
        DiscoAddOn::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiscoAddOn::Arms => "arms",
            DiscoAddOn::Feet => "feet",
            DiscoAddOn::Eyes => "eyes",
            DiscoAddOn::All => "all",
        }
    }

    /// The board type a group addresses, `None` for the whole robot.
    pub fn led_type(self) -> Option<AddOnType> {
        match self {
            DiscoAddOn::Arms => Some(AddOnType::LedArm),
            DiscoAddOn::Feet => Some(AddOnType::LedFoot),
            DiscoAddOn::Eyes => Some(AddOnType::LedEye),
            DiscoAddOn::All => None,
        }
    }
}

impl FromStr for DiscoAddOn {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscoAddOn::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseLiteralError {
                literal: String::from(s),
                expected: "a disco add-on group",
            })
    }
}

impl fmt::Display for DiscoAddOn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DiscoRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiscoRegion::Index(n) => serializer.serialize_u8(*n),
            DiscoRegion::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for DiscoRegion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegionVisitor;

        impl<'de> de::Visitor<'de> for RegionVisitor {
            type Value = DiscoRegion;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "0, 1, 2 or \"all\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DiscoRegion, E> {
                if v <= 2 {
                    Ok(DiscoRegion::Index(v as u8))
                } else {
                    Err(E::custom(format!("unknown region `{}`", v)))
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DiscoRegion, E> {
                if (0..=2).contains(&v) {
                    Ok(DiscoRegion::Index(v as u8))
                } else {
                    Err(E::custom(format!("unknown region `{}`", v)))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DiscoRegion, E> {
                if v == "all" {
                    Ok(DiscoRegion::All)
                } else {
                    Err(E::custom(format!("unknown region `{}`", v)))
                }
            }
        }

        deserializer.deserialize_any(RegionVisitor)
    }
}

impl fmt::Display for DiscoRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiscoRegion::Index(n) => write!(f, "{}", n),
            DiscoRegion::All => write!(f, "all"),
        }
    }
}

impl FromStr for DiscoRegion {
    type Err = ParseLiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(DiscoRegion::All);
        }

        match s.parse::<u8>() {
            Ok(n) if n <= 2 => Ok(DiscoRegion::Index(n)),
            _ => Err(ParseLiteralError {
                literal: String::from(s),
                expected: "a region number (0 to 2) or `all`",
            }),
        }
    }
}

impl RGBColor {
    /// Render as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a hex string, with or without the leading `#`.
    pub fn from_hex(s: &str) -> Option<RGBColor> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.len() != 6 {
            return None;
        }

        let value = u32::from_str_radix(digits, 16).ok()?;

        Some(RGBColor {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl ColorSpec {
    /// Resolve to a concrete RGB value.
    ///
    /// Hex strings that do not parse are unknown literals, the closed forms
    /// cannot fail.
    pub fn resolve(&self) -> Result<RGBColor, ValidateError> {
        match self {
            ColorSpec::Named(color) => Ok(color.rgb()),
            ColorSpec::Rgb(color) => Ok(*color),
            ColorSpec::Css(s) => {
                RGBColor::from_hex(s).ok_or_else(|| ValidateError::UnknownLiteral {
                    field: String::from("color"),
                    value: s.clone(),
                })
            }
        }
    }
}

impl FromStr for ColorSpec {
    type Err = Infallible;

    /// Palette names become [`ColorSpec::Named`], anything else is carried
    /// as a hex candidate and judged by [`resolve`](ColorSpec::resolve).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<DiscoColor>() {
            Ok(color) => Ok(ColorSpec::Named(color)),
            Err(_) => Ok(ColorSpec::Css(String::from(s))),
        }
    }
}

impl From<DiscoColor> for ColorSpec {
    fn from(color: DiscoColor) -> Self {
        ColorSpec::Named(color)
    }
}

impl From<RGBColor> for ColorSpec {
    fn from(color: RGBColor) -> Self {
        ColorSpec::Rgb(color)
    }
}

impl DiscoColorParams {
    /// Check the colour resolves. Group and region are closed by type.
    pub fn validate(&self) -> Result<(), ValidateError> {
        self.color.resolve().map(|_| ())
    }
}

impl DiscoCmd {
    /// The REST endpoint this command is sent to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            DiscoCmd::Color { .. } => Endpoint::LedColor,
            DiscoCmd::Pattern { .. } => Endpoint::LedPattern,
            DiscoCmd::Off { .. } => Endpoint::LedOff,
        }
    }

    /// The group of LED boards the command addresses.
    pub fn group(&self) -> DiscoAddOn {
        match self {
            DiscoCmd::Color { group, .. } => *group,
            DiscoCmd::Pattern { group, .. } => *group,
            DiscoCmd::Off { group, .. } => *group,
        }
    }

    /// Colour parameters for a colour command, `None` for the others.
    ///
    /// The `all` group is expressed by omitting `addOn`, the firmware then
    /// applies the colour to every disco board.
    pub fn color_params(&self) -> Option<DiscoColorParams> {
        match self {
            DiscoCmd::Color {
                color,
                group,
                region,
            } => Some(DiscoColorParams {
                color: color.clone(),
                add_on: match group {
                    DiscoAddOn::All => None,
                    other => Some(String::from(other.as_str())),
                },
                region: *region,
            }),
            _ => None,
        }
    }

    /// Check the command parameters, which for a colour command means the
    /// colour must resolve to an RGB value.
    pub fn validate(&self) -> Result<(), ValidateError> {
        match self.color_params() {
            Some(params) => params.validate(),
            None => Ok(()),
        }
    }

    /// The REST path with the template name filled from the group.
    ///
    /// The `all` group has no single board name, so the template travels
    /// unfilled and the group goes in the parameters instead.
    pub fn rest_path(&self) -> String {
        match self.group().led_type() {
            Some(board) => self.endpoint().filled(board.name()),
            None => String::from(self.endpoint().as_path()),
        }
    }

    /// Query parameters of the command.
    pub fn to_params(&self) -> Result<RestParams, ValidateError> {
        match self {
            DiscoCmd::Color { .. } => match self.color_params() {
                Some(params) => RestParams::from_record(&params),
                None => Ok(RestParams::new()),
            },
            DiscoCmd::Pattern { pattern, .. } => {
                let mut params = RestParams::new();
                params.insert("pattern", pattern.as_str());
                Ok(params)
            }
            DiscoCmd::Off { .. } => Ok(RestParams::new()),
        }
    }
}

impl AddOnInfo {
    /// Project down to the compact status record.
    pub fn status(&self) -> AddOnStatus {
        AddOnStatus {
            id_no: self.id_no,
            valid: self.valid,
            data: self.data.clone(),
        }
    }
}

impl ColorIRReading {
    /// Bytes of payload the decode consumes.
    pub const PAYLOAD_LEN: usize = 5;

    /// Obstacle bit of the detection flags.
    pub const OBSTACLE_FLAG: u8 = 0x01;

    /// Ground contact bit of the detection flags.
    pub const GROUND_FLAG: u8 = 0x02;

    /// Decode an IR foot payload.
    ///
    /// Layout: detection flags byte, then big-endian u16 obstacle and
    /// ground raw values. The side comes from the add-on name, not the
    /// payload.
    pub fn from_payload(payload: &[u8], side: Side) -> Result<ColorIRReading, AddOnDecodeError> {
        if payload.len() < Self::PAYLOAD_LEN {
            return Err(AddOnDecodeError::TooShort {
                needed: Self::PAYLOAD_LEN,
                got: payload.len(),
            });
        }

        Ok(ColorIRReading {
            detection_flags: payload[0],
            obstacle_raw: BigEndian::read_u16(&payload[1..3]),
            ground_raw: BigEndian::read_u16(&payload[3..5]),
            side,
        })
    }

    pub fn obstacle_detected(&self) -> bool {
        self.detection_flags & Self::OBSTACLE_FLAG != 0
    }

    pub fn on_ground(&self) -> bool {
        self.detection_flags & Self::GROUND_FLAG != 0
    }
}

impl ColorSensorReading {
    /// Bytes of payload the decode consumes.
    pub const PAYLOAD_LEN: usize = 5;

    /// Decode a colour sensor payload.
    ///
    /// Layout: one status byte, then red, green, blue and clear channel
    /// bytes. The hex string is derived from the RGB channels.
    pub fn from_payload(payload: &[u8]) -> Result<ColorSensorReading, AddOnDecodeError> {
        if payload.len() < Self::PAYLOAD_LEN {
            return Err(AddOnDecodeError::TooShort {
                needed: Self::PAYLOAD_LEN,
                got: payload.len(),
            });
        }

        let (red, green, blue, clear) = (payload[1], payload[2], payload[3], payload[4]);

        Ok(ColorSensorReading {
            red,
            green,
            blue,
            clear,
            hex: RGBColor {
                r: red,
                g: green,
                b: blue,
            }
            .to_hex(),
        })
    }

    /// Read one channel by name.
    pub fn channel(&self, channel: ColorChannel) -> u8 {
        match channel {
            ColorChannel::Red => self.red,
            ColorChannel::Green => self.green,
            ColorChannel::Blue => self.blue,
            ColorChannel::Clear => self.clear,
        }
    }
}

impl FootSensorParams {
    /// The bare side, if the selector is one.
    pub fn side(&self) -> Option<Side> {
        self.add_on_or_side.parse::<Side>().ok()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

mod base64_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::decode(&encoded).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::RestValue;
    use crate::validate;
    use serde_json::json;

    #[test]
    fn addon_type_spellings_round_trip() {
        for addon_type in AddOnType::KNOWN.iter() {
            let value = serde_json::to_value(addon_type).unwrap();
            assert_eq!(value, json!(addon_type.name()));
            assert_eq!(
                serde_json::from_value::<AddOnType>(value).unwrap(),
                *addon_type
            );
        }
    }

    #[test]
    fn unknown_addon_type_is_carried() {
        let parsed = serde_json::from_value::<AddOnType>(json!("gesture")).unwrap();
        assert_eq!(parsed, AddOnType::Other(String::from("gesture")));
        assert_eq!(parsed.name(), "gesture");
        assert!(!parsed.is_known());
        assert!(!parsed.is_disco());

        assert!(AddOnType::LedArm.is_disco());
    }

    #[test]
    fn palette_colours_resolve_to_documented_rgb() {
        assert_eq!(
            DiscoColor::Red.rgb(),
            RGBColor { r: 255, g: 0, b: 0 }
        );
        assert_eq!(
            DiscoColor::Teal.rgb(),
            RGBColor {
                r: 0,
                g: 128,
                b: 128
            }
        );

        for color in DiscoColor::ALL.iter() {
            assert_eq!(color.as_str().parse::<DiscoColor>().unwrap(), *color);
            assert_eq!(
                serde_json::to_value(color).unwrap(),
                json!(color.as_str())
            );
        }
    }

    #[test]
    fn pattern_spellings_round_trip() {
        for pattern in DiscoPattern::ALL.iter() {
            assert_eq!(
                serde_json::to_value(pattern).unwrap(),
                json!(pattern.as_str())
            );
            assert_eq!(pattern.as_str().parse::<DiscoPattern>().unwrap(), *pattern);
        }

        assert_eq!("show-off".parse::<DiscoPattern>(), Ok(DiscoPattern::ShowOff));
        assert!("strobe".parse::<DiscoPattern>().is_err());
    }

    #[test]
    fn disco_groups_pair_with_led_types() {
        assert_eq!(DiscoAddOn::Arms.led_type(), Some(AddOnType::LedArm));
        assert_eq!(DiscoAddOn::Feet.led_type(), Some(AddOnType::LedFoot));
        assert_eq!(DiscoAddOn::Eyes.led_type(), Some(AddOnType::LedEye));
        assert_eq!(DiscoAddOn::All.led_type(), None);
    }

    #[test]
    fn region_wire_forms() {
        assert_eq!(
            serde_json::to_value(DiscoRegion::Index(1)).unwrap(),
            json!(1)
        );
        assert_eq!(serde_json::to_value(DiscoRegion::All).unwrap(), json!("all"));

        assert_eq!(
            serde_json::from_value::<DiscoRegion>(json!(2)).unwrap(),
            DiscoRegion::Index(2)
        );
        assert_eq!(
            serde_json::from_value::<DiscoRegion>(json!("all")).unwrap(),
            DiscoRegion::All
        );
    }

    #[test]
    fn out_of_range_region_is_an_unknown_literal() {
        let err = validate::typed::<DiscoRegion>(&json!(7)).unwrap_err();
        match err {
            ValidateError::UnknownLiteral { value, .. } => assert_eq!(value, "7"),
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }

        assert!(validate::typed::<DiscoRegion>(&json!("left")).is_err());
    }

    #[test]
    fn color_spec_accepts_three_forms() {
        assert_eq!(
            serde_json::from_value::<ColorSpec>(json!("red")).unwrap(),
            ColorSpec::Named(DiscoColor::Red)
        );
        assert_eq!(
            serde_json::from_value::<ColorSpec>(json!({"r": 1, "g": 2, "b": 3})).unwrap(),
            ColorSpec::Rgb(RGBColor { r: 1, g: 2, b: 3 })
        );
        assert_eq!(
            serde_json::from_value::<ColorSpec>(json!("#a0b1c2")).unwrap(),
            ColorSpec::Css(String::from("#a0b1c2"))
        );
    }

    #[test]
    fn color_spec_resolution() {
        let named: ColorSpec = DiscoColor::Orange.into();
        assert_eq!(named.resolve().unwrap(), RGBColor { r: 255, g: 165, b: 0 });

        let css = ColorSpec::Css(String::from("#a0b1c2"));
        assert_eq!(
            css.resolve().unwrap(),
            RGBColor {
                r: 0xa0,
                g: 0xb1,
                b: 0xc2
            }
        );

        let junk = ColorSpec::Css(String::from("nonsense"));
        match junk.resolve() {
            Err(ValidateError::UnknownLiteral { field, value }) => {
                assert_eq!(field, "color");
                assert_eq!(value, "nonsense");
            }
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }
    }

    #[test]
    fn color_spec_from_str_never_fails() {
        assert_eq!(
            "teal".parse::<ColorSpec>().unwrap(),
            ColorSpec::Named(DiscoColor::Teal)
        );
        assert_eq!(
            "ff0000".parse::<ColorSpec>().unwrap(),
            ColorSpec::Css(String::from("ff0000"))
        );
    }

    #[test]
    fn hex_round_trip_is_lowercase() {
        let color = RGBColor {
            r: 0xde,
            g: 0xad,
            b: 0x0f,
        };
        assert_eq!(color.to_hex(), "#dead0f");
        assert_eq!(RGBColor::from_hex("#DEAD0F"), Some(color));
        assert_eq!(RGBColor::from_hex("dead0f"), Some(color));

        assert_eq!(RGBColor::from_hex("#dead0"), None);
        assert_eq!(RGBColor::from_hex("not hex"), None);
    }

    #[test]
    fn disco_params_validate_their_colour() {
        let params = validate::typed::<DiscoColorParams>(&json!({
            "color": "green",
            "addOn": "LEDeye",
            "region": "all",
        }))
        .unwrap();
        params.validate().unwrap();
        assert_eq!(params.region, Some(DiscoRegion::All));

        let minimal = validate::typed::<DiscoColorParams>(&json!({"color": "red"})).unwrap();
        minimal.validate().unwrap();

        let junk = validate::typed::<DiscoColorParams>(&json!({"color": "zzz"})).unwrap();
        assert!(junk.validate().is_err());
    }

    #[test]
    fn addon_info_parses_and_projects_status() {
        let info = serde_json::from_value::<AddOnInfo>(json!({
            "IDNo": 1,
            "name": "LeftIRFoot",
            "type": "IRFoot",
            "whoAmITypeCode": "86",
            "valid": true,
            "data": [3, 1, 2, 3, 4, 0, 0, 0, 0, 0],
        }))
        .unwrap();

        assert_eq!(info.addon_type, AddOnType::IrFoot);

        let status = info.status();
        assert_eq!(status.id_no, 1);
        assert!(status.valid);
        assert_eq!(status.data.len(), 10);
    }

    #[test]
    fn ir_payload_decodes_big_endian() {
        let payload = [0x03, 0x01, 0x02, 0x03, 0x04];
        let reading = ColorIRReading::from_payload(&payload, Side::Left).unwrap();

        assert_eq!(reading.detection_flags, 3);
        assert_eq!(reading.obstacle_raw, 0x0102);
        assert_eq!(reading.ground_raw, 0x0304);
        assert_eq!(reading.side, Side::Left);
        assert!(reading.obstacle_detected());
        assert!(reading.on_ground());

        assert_eq!(
            ColorIRReading::from_payload(&[1, 2], Side::Right),
            Err(AddOnDecodeError::TooShort { needed: 5, got: 2 })
        );
    }

    #[test]
    fn colour_payload_decodes_with_hex() {
        let payload = [0x00, 0xa0, 0xb1, 0xc2, 0x10];
        let reading = ColorSensorReading::from_payload(&payload).unwrap();

        assert_eq!(reading.red, 0xa0);
        assert_eq!(reading.channel(ColorChannel::Clear), 0x10);
        assert_eq!(reading.hex, "#a0b1c2");
    }

    #[test]
    fn query_request_writes_base64() {
        let request = AddOnQueryRequest {
            add_on_name: String::from("LeftIRFoot"),
            data_to_write: vec![1, 2],
            num_bytes_to_read: 2,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "addOnName": "LeftIRFoot",
                "dataToWrite": "AQI=",
                "numBytesToRead": 2,
            })
        );

        let back = serde_json::from_value::<AddOnQueryRequest>(value).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn query_response_reuses_rest_result() {
        let response =
            serde_json::from_value::<AddOnQueryResponse>(json!({"rslt": "fail"})).unwrap();
        assert!(!response.rslt.is_ok());
        assert_eq!(response.data_read, None);
    }

    #[test]
    fn foot_selector_recognises_bare_sides() {
        let side = FootSensorParams {
            add_on_or_side: String::from("left"),
        };
        assert_eq!(side.side(), Some(Side::Left));

        let named = FootSensorParams {
            add_on_or_side: String::from("LeftIRFoot"),
        };
        assert_eq!(named.side(), None);
    }

    #[test]
    fn regions_parse_from_command_strings() {
        assert_eq!("all".parse::<DiscoRegion>().unwrap(), DiscoRegion::All);
        assert_eq!("2".parse::<DiscoRegion>().unwrap(), DiscoRegion::Index(2));
        assert!("7".parse::<DiscoRegion>().is_err());
        assert!("left".parse::<DiscoRegion>().is_err());
    }

    #[test]
    fn disco_commands_know_their_endpoints() {
        let color = DiscoCmd::Color {
            color: ColorSpec::Named(DiscoColor::Red),
            group: DiscoAddOn::Eyes,
            region: Some(DiscoRegion::Index(1)),
        };
        assert_eq!(color.endpoint(), Endpoint::LedColor);
        assert_eq!(color.rest_path(), "led/LEDeye/color");

        let off = DiscoCmd::Off {
            group: DiscoAddOn::All,
        };
        assert_eq!(off.endpoint(), Endpoint::LedOff);
        assert_eq!(off.rest_path(), "led/{name}/off");
    }

    #[test]
    fn colour_commands_build_their_params() {
        let cmd = DiscoCmd::Color {
            color: ColorSpec::Named(DiscoColor::Teal),
            group: DiscoAddOn::Feet,
            region: None,
        };
        cmd.validate().unwrap();

        let params = cmd.color_params().unwrap();
        assert_eq!(params.add_on.as_deref(), Some("feet"));
        assert_eq!(params.region, None);

        let rest = cmd.to_params().unwrap();
        assert_eq!(rest.get("color"), Some(&RestValue::from("teal")));
        assert_eq!(rest.get("addOn"), Some(&RestValue::from("feet")));

        // The whole-robot group omits addOn entirely
        let all = DiscoCmd::Color {
            color: ColorSpec::Css(String::from("#a0b1c2")),
            group: DiscoAddOn::All,
            region: Some(DiscoRegion::All),
        };
        let params = all.color_params().unwrap();
        assert_eq!(params.add_on, None);

        let rest = all.to_params().unwrap();
        assert_eq!(rest.get("addOn"), None);
        assert_eq!(rest.get("region"), Some(&RestValue::from("all")));
    }

    #[test]
    fn bad_hex_colours_fail_command_validation() {
        let cmd = DiscoCmd::Color {
            color: ColorSpec::Css(String::from("#nothex")),
            group: DiscoAddOn::All,
            region: None,
        };

        match cmd.validate().unwrap_err() {
            ValidateError::UnknownLiteral { field, value } => {
                assert_eq!(field, "color");
                assert_eq!(value, "#nothex");
            }
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }
    }

    #[test]
    fn pattern_commands_carry_the_pattern_name() {
        let cmd = DiscoCmd::Pattern {
            pattern: DiscoPattern::ShowOff,
            group: DiscoAddOn::Arms,
        };
        cmd.validate().unwrap();
        assert_eq!(cmd.rest_path(), "led/LEDarm/pattern");

        let params = cmd.to_params().unwrap();
        assert_eq!(params.get("pattern"), Some(&RestValue::from("show-off")));
    }
}
