//! # Simulator scene descriptors
//!
//! Shapes the 3D simulator consumes: environment definitions, the objects
//! inside them, lighting, physics settings and basic geometry. These are
//! simulator-only records and can differ from what the physical robot
//! reports.
//!
//! Geometry is the one place decoding is stricter than serde's default. A
//! geometry record must carry exactly the fields of its own kind, a box
//! with a stray `radius` is malformed, so the tag union is decoded by hand
//! through per kind field structs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod camera;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::fmt;

// External
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Internal
use crate::robot::{Position3D, Rotation3D};
use crate::validate::{self, check_range, ValidateError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Built-in environment families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    Empty,
    Classroom,
    Maze,
    ObstacleCourse,
    Playground,
    Custom,
}

/// Physics role of an environment object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Immovable scenery.
    Static,
    /// Fully simulated body.
    Dynamic,
    /// Animated by script, pushes but is not pushed.
    Kinematic,
}

/// Named material presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsMaterial {
    Wood,
    Metal,
    Plastic,
    Rubber,
    Concrete,
}

/// Basic geometry, tagged by `type` on the wire.
///
/// Serialisation uses the derived internally tagged form. Deserialisation
/// goes through [`Geometry::from_value`] so each kind is held to exactly its
/// own fields, which the derived decoding would not do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Box { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Plane { width: f64, height: f64 },
    Custom,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Friction and bounce properties of a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPhysics {
    /// Sliding friction coefficient, 0 to 1.
    pub friction: f64,

    /// Bounce coefficient, 0 to 1.
    pub restitution: f64,

    /// Density in kg per cubic metre.
    pub density: f64,
}

/// One object placed in an environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentObject {
    pub id: String,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ObjectKind,

    pub position: Position3D,
    pub rotation: Rotation3D,
    pub scale: Position3D,

    /// Path to a mesh asset, exclusive with `geometry` in practice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    pub material: PhysicsMaterial,

    /// CSS style colour override for the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    pub is_collider: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Axis aligned bounds of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentBounds {
    pub min: Position3D,
    pub max: Position3D,
}

/// Flat ambient light term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: String,
    pub intensity: f64,
}

/// A sun style directional light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalLight {
    pub color: String,
    pub intensity: f64,
    pub position: Position3D,
    pub cast_shadow: bool,
}

/// A local point light with falloff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLight {
    pub color: String,
    pub intensity: f64,
    pub position: Position3D,

    /// Falloff distance in metres.
    pub distance: f64,
}

/// Scene lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingConfig {
    pub ambient: AmbientLight,
    pub directional: Vec<DirectionalLight>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_lights: Option<Vec<PointLight>>,
}

/// Physics engine settings of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConfig {
    pub gravity: Position3D,

    /// Fixed step length in seconds.
    pub time_step: f64,

    pub substeps: u32,
    pub enabled: bool,
}

/// A complete environment definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub id: String,
    pub name: String,

    #[serde(rename = "type")]
    pub env_type: EnvironmentType,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    pub objects: Vec<EnvironmentObject>,
    pub lighting: LightingConfig,
    pub physics: PhysicsConfig,

    /// Where the robot appears on load.
    pub spawn_point: Position3D,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<EnvironmentBounds>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EnvironmentType {
    pub const ALL: [EnvironmentType; 6] = [
        EnvironmentType::Empty,
        EnvironmentType::Classroom,
        EnvironmentType::Maze,
        EnvironmentType::ObstacleCourse,
        EnvironmentType::Playground,
        EnvironmentType::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnvironmentType::Empty => "empty",
            EnvironmentType::Classroom => "classroom",
            EnvironmentType::Maze => "maze",
            EnvironmentType::ObstacleCourse => "obstacle_course",
            EnvironmentType::Playground => "playground",
            EnvironmentType::Custom => "custom",
        }
    }
}

impl fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [
        ObjectKind::Static,
        ObjectKind::Dynamic,
        ObjectKind::Kinematic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Static => "static",
            ObjectKind::Dynamic => "dynamic",
            ObjectKind::Kinematic => "kinematic",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PhysicsMaterial {
    pub const ALL: [PhysicsMaterial; 5] = [
        PhysicsMaterial::Wood,
        PhysicsMaterial::Metal,
        PhysicsMaterial::Plastic,
        PhysicsMaterial::Rubber,
        PhysicsMaterial::Concrete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhysicsMaterial::Wood => "wood",
            PhysicsMaterial::Metal => "metal",
            PhysicsMaterial::Plastic => "plastic",
            PhysicsMaterial::Rubber => "rubber",
            PhysicsMaterial::Concrete => "concrete",
        }
    }
}

impl fmt::Display for PhysicsMaterial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Geometry {
    /// Every geometry tag.
    pub const KINDS: [&'static str; 5] = ["box", "sphere", "cylinder", "plane", "custom"];

    /// The wire tag of this kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Box { .. } => "box",
            Geometry::Sphere { .. } => "sphere",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Plane { .. } => "plane",
            Geometry::Custom => "custom",
        }
    }

    /// Decode a geometry record, holding it to exactly the fields of its
    /// tagged kind.
    pub fn from_value(value: &Value) -> Result<Geometry, ValidateError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ValidateError::WrongShape(String::from("geometry must be an object")))?;

        let tag = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ValidateError::MissingField(String::from("type")))?;

        // Strip the tag, then each kind rejects any field it does not own
        let mut fields = obj.clone();
        fields.remove("type");
        let fields = Value::Object(fields);

        match tag {
            "box" => {
                let BoxFields {
                    width,
                    height,
                    depth,
                } = validate::typed(&fields)?;
                Ok(Geometry::Box {
                    width,
                    height,
                    depth,
                })
            }
            "sphere" => {
                let SphereFields { radius } = validate::typed(&fields)?;
                Ok(Geometry::Sphere { radius })
            }
            "cylinder" => {
                let CylinderFields { radius, height } = validate::typed(&fields)?;
                Ok(Geometry::Cylinder { radius, height })
            }
            "plane" => {
                let PlaneFields { width, height } = validate::typed(&fields)?;
                Ok(Geometry::Plane { width, height })
            }
            "custom" => {
                let CustomFields {} = validate::typed(&fields)?;
                Ok(Geometry::Custom)
            }
            other => Err(ValidateError::UnknownLiteral {
                field: String::from("type"),
                value: String::from(other),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Geometry::from_value(&value).map_err(de::Error::custom)
    }
}

impl MaterialPhysics {
    pub const FRICTION_RANGE: (f64, f64) = (0.0, 1.0);
    pub const RESTITUTION_RANGE: (f64, f64) = (0.0, 1.0);

    /// Check coefficients against their documented ranges. Density is
    /// unbounded.
    pub fn validate(&self) -> Result<(), ValidateError> {
        check_range("friction", self.friction, Self::FRICTION_RANGE)?;
        check_range("restitution", self.restitution, Self::RESTITUTION_RANGE)?;

        Ok(())
    }
}

impl EnvironmentConfig {
    /// Find an object by its ID.
    pub fn object(&self, id: &str) -> Option<&EnvironmentObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoxFields {
    width: f64,
    height: f64,
    depth: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereFields {
    radius: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CylinderFields {
    radius: f64,
    height: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaneFields {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CustomFields {}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn maze() -> EnvironmentConfig {
        EnvironmentConfig {
            id: String::from("maze-1"),
            name: String::from("Starter maze"),
            env_type: EnvironmentType::Maze,
            description: String::from("Four walls and a goal"),
            thumbnail: None,
            objects: vec![EnvironmentObject {
                id: String::from("wall-north"),
                name: String::from("North wall"),
                kind: ObjectKind::Static,
                position: Position3D::new(0.0, 0.5, -2.0),
                rotation: Rotation3D::default(),
                scale: Position3D::new(1.0, 1.0, 1.0),
                model_path: None,
                geometry: Some(Geometry::Box {
                    width: 4.0,
                    height: 1.0,
                    depth: 0.1,
                }),
                material: PhysicsMaterial::Concrete,
                color: Some(String::from("#888888")),
                is_collider: true,
                metadata: None,
            }],
            lighting: LightingConfig {
                ambient: AmbientLight {
                    color: String::from("#ffffff"),
                    intensity: 0.4,
                },
                directional: vec![DirectionalLight {
                    color: String::from("#fff4e0"),
                    intensity: 1.0,
                    position: Position3D::new(5.0, 10.0, 5.0),
                    cast_shadow: true,
                }],
                point_lights: None,
            },
            physics: PhysicsConfig {
                gravity: Position3D::new(0.0, -9.81, 0.0),
                time_step: 1.0 / 60.0,
                substeps: 2,
                enabled: true,
            },
            spawn_point: Position3D::new(0.0, 0.0, 0.0),
            bounds: None,
        }
    }

    #[test]
    fn geometry_kinds_round_trip() {
        let samples = [
            Geometry::Box {
                width: 1.0,
                height: 2.0,
                depth: 3.0,
            },
            Geometry::Sphere { radius: 0.5 },
            Geometry::Cylinder {
                radius: 0.5,
                height: 2.0,
            },
            Geometry::Plane {
                width: 10.0,
                height: 10.0,
            },
            Geometry::Custom,
        ];

        for geometry in samples.iter() {
            let value = serde_json::to_value(geometry).unwrap();
            assert_eq!(value["type"], json!(geometry.kind()));
            assert_eq!(Geometry::from_value(&value).unwrap(), *geometry);
        }
    }

    #[test]
    fn geometry_rejects_fields_of_another_kind() {
        let mixed = json!({
            "type": "box",
            "width": 1.0,
            "height": 1.0,
            "depth": 1.0,
            "radius": 2.0,
        });

        match Geometry::from_value(&mixed) {
            Err(ValidateError::WrongShape(msg)) => assert!(msg.contains("radius")),
            other => panic!("expected WrongShape, got {:?}", other),
        }

        // The custom kind owns no fields at all
        assert!(Geometry::from_value(&json!({"type": "custom", "radius": 1.0})).is_err());
    }

    #[test]
    fn geometry_unknown_tag_is_rejected() {
        match Geometry::from_value(&json!({"type": "torus", "radius": 1.0})) {
            Err(ValidateError::UnknownLiteral { field, value }) => {
                assert_eq!(field, "type");
                assert_eq!(value, "torus");
            }
            other => panic!("expected UnknownLiteral, got {:?}", other),
        }
    }

    #[test]
    fn geometry_missing_pieces_are_named() {
        assert_eq!(
            Geometry::from_value(&json!({"radius": 1.0})),
            Err(ValidateError::MissingField(String::from("type")))
        );
        assert_eq!(
            Geometry::from_value(&json!({"type": "sphere"})),
            Err(ValidateError::MissingField(String::from("radius")))
        );
    }

    #[test]
    fn nested_geometry_stays_strict_through_serde() {
        let object = json!({
            "id": "ball",
            "name": "Ball",
            "type": "dynamic",
            "position": {"x": 0.0, "y": 1.0, "z": 0.0},
            "rotation": {"x": 0.0, "y": 0.0, "z": 0.0},
            "scale": {"x": 1.0, "y": 1.0, "z": 1.0},
            "geometry": {"type": "sphere", "radius": 0.2, "width": 1.0},
            "material": "rubber",
            "isCollider": true,
        });

        assert!(serde_json::from_value::<EnvironmentObject>(object).is_err());
    }

    #[test]
    fn environment_round_trips_with_optionals_absent() {
        let environment = maze();
        let value = serde_json::to_value(&environment).unwrap();

        assert_eq!(value["type"], json!("maze"));
        assert_eq!(value["spawnPoint"]["x"], json!(0.0));
        assert_eq!(value.get("thumbnail"), None);
        assert_eq!(value["objects"][0]["isCollider"], json!(true));

        let back = serde_json::from_value::<EnvironmentConfig>(value).unwrap();
        assert_eq!(back, environment);
        assert!(back.object("wall-north").is_some());
        assert!(back.object("wall-south").is_none());
    }

    #[test]
    fn material_coefficients_are_range_checked() {
        let ok = MaterialPhysics {
            friction: 0.6,
            restitution: 0.3,
            density: 700.0,
        };
        ok.validate().unwrap();

        let slippery = MaterialPhysics {
            friction: 1.5,
            restitution: 0.3,
            density: 700.0,
        };
        match slippery.validate() {
            Err(ValidateError::OutOfRange { field, .. }) => assert_eq!(field, "friction"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn environment_type_spellings() {
        assert_eq!(
            serde_json::to_value(EnvironmentType::ObstacleCourse).unwrap(),
            json!("obstacle_course")
        );

        for env_type in EnvironmentType::ALL.iter() {
            let value = serde_json::to_value(env_type).unwrap();
            assert_eq!(value, json!(env_type.as_str()));
            assert_eq!(
                serde_json::from_value::<EnvironmentType>(value).unwrap(),
                *env_type
            );
        }
    }

    #[test]
    fn physics_config_uses_camel_case() {
        let physics = maze().physics;
        let value = serde_json::to_value(&physics).unwrap();
        assert!(value.get("timeStep").is_some());
        assert_eq!(value["substeps"], json!(2));
    }
}
