//! # RIC Interface Crate
//!
//! This crate is the shared wire contract between the components of the Marty
//! V2 control and simulation stack. It declares every record that crosses a
//! process boundary:
//!
//! - REST endpoint paths and their response envelopes ([`api`])
//! - WebSocket message envelopes, payloads and error codes ([`api::ws`])
//! - ROS serial topics and their publications ([`api::ros`])
//! - Robot state, joint and power telemetry ([`robot`])
//! - Trajectory command parameter records ([`robot::traj`])
//! - Add-on sensor and disco LED records ([`robot::addons`])
//! - Simulator scene, environment and camera descriptors ([`sim`])
//!
//! The values mirror the RIC (Robotical Interface Controller) API as spoken
//! by Marty V2 firmware, so the literal tags and field names here are wire
//! identifiers and must never be renamed once published.
//!
//! No transport lives here. Executables bring their own REST/WebSocket
//! plumbing and use this crate to agree on the bytes.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod api;
pub mod robot;
pub mod schema;
pub mod sim;
pub mod validate;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Revision of the contract declared by this crate.
///
/// Servers report it as the `serverVersion` of their connection `ack` and as
/// the `SystemVersion` of their [`api::SystemInfo`] record, so both sides can
/// tell when they disagree about the catalogue.
pub const RIC_API_VERSION: &str = "2.0.0";
