//! # Interactive console command grammar
//!
//! One [`ReplCmd`] variant per console operation. Lines typed at the prompt
//! are tokenised and parsed with structopt, so every command gets `--help`
//! for free, and the same grammar doubles as the one-shot subcommand surface
//! of the executable.
//!
//! Commands never panic on bad input. Parse errors are printed with their
//! usage text, validation failures are logged, and the console moves on. In
//! strict mode (the default) a command that fails validation is not echoed
//! as a request.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Standard
use std::fs;
use std::path::PathBuf;

// External
use chrono::Utc;
use color_eyre::{eyre::WrapErr, Report};
use log::{error, info, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use structopt::clap::AppSettings;
use structopt::StructOpt;

// Internal
use crate::CliParams;
use ric_if::api::ws::WsMessage;
use ric_if::robot::addons::DiscoCmd;
use ric_if::robot::traj::{ArmsParams, TrajCmd};
use ric_if::schema::SchemaId;
use util::host;
use util::routine::Routine;
use util::session::{self, Session};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// History file kept under the software root, shared between sessions.
const HISTORY_PATH: &str = "data/history.txt";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A console command.
#[derive(Debug, StructOpt)]
#[structopt(name = "marty")]
pub enum ReplCmd {
    /// Trajectory and motion commands
    Traj(TrajCmd),

    /// Disco LED commands
    Led(DiscoCmd),

    /// Move both arms, expanded into two joint commands
    #[structopt(setting = AppSettings::AllowNegativeNumbers)]
    Arms(ArmsParams),

    /// Check a JSON value against a catalogue schema
    #[structopt(setting = AppSettings::AllowLeadingHyphen)]
    Validate {
        /// Name of the schema, see `schemas` for the full list
        schema: SchemaId,

        /// The JSON value to check
        json: Vec<String>,
    },

    /// Load a routine file and validate every command in it
    Check {
        /// Path to the routine file
        path: String,
    },

    /// List the schemas in the catalogue
    Schemas,

    /// Print version information
    Version,

    /// Leave the console
    Exit,
}

/// What the console should do once a command has executed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CmdOutcome {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One console line, recorded into the session transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Session elapsed time the line was entered at
    pub time_s: f64,

    /// The line as typed
    pub line: String,

    /// Whether the line parsed as a command
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the interactive console until the user exits.
pub fn run(session: &Session, params: &CliParams) -> Result<(), Report> {
    let mut rl = DefaultEditor::new().wrap_err("Failed to start the line editor")?;

    let history_path = history_path();

    if rl.load_history(&history_path).is_err() {
        info!("No console history found");
    }

    let mut transcript: Vec<TranscriptEntry> = Vec::new();

    loop {
        match rl.readline(&params.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str()).ok();

                if exec_line(&line, params.strict, &mut transcript) == CmdOutcome::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                error!("Console error: {:?}", e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        fs::create_dir_all(parent).ok();
    }
    if let Err(e) = rl.save_history(&history_path) {
        warn!("Could not save console history: {}", e);
    }

    info!("Saving {} transcript entries", transcript.len());
    session.save("transcripts/console.json", transcript);

    Ok(())
}

/// Execute a parsed console command.
///
/// Used by the interactive loop and for one-shot invocations from the
/// command line.
pub fn exec(cmd: &ReplCmd, strict: bool) -> CmdOutcome {
    match cmd {
        ReplCmd::Traj(traj) => {
            exec_traj(traj, strict);
            CmdOutcome::Continue
        }
        ReplCmd::Led(led) => {
            exec_led(led, strict);
            CmdOutcome::Continue
        }
        ReplCmd::Arms(arms) => {
            exec_arms(arms, strict);
            CmdOutcome::Continue
        }
        ReplCmd::Validate { schema, json } => {
            exec_validate(*schema, json);
            CmdOutcome::Continue
        }
        ReplCmd::Check { path } => {
            exec_check(path);
            CmdOutcome::Continue
        }
        ReplCmd::Schemas => {
            for id in SchemaId::ALL.iter() {
                info!("{}", id);
            }
            CmdOutcome::Continue
        }
        ReplCmd::Version => {
            info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            info!("RIC API v{}", ric_if::RIC_API_VERSION);
            CmdOutcome::Continue
        }
        ReplCmd::Exit => CmdOutcome::Quit,
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse and execute one console line.
fn exec_line(line: &str, strict: bool, transcript: &mut Vec<TranscriptEntry>) -> CmdOutcome {
    let time_s = session::get_elapsed_seconds();
    let parsed = ReplCmd::from_iter_safe(std::iter::once("marty").chain(line.split_whitespace()));

    match parsed {
        Ok(cmd) => {
            transcript.push(TranscriptEntry {
                time_s,
                line: String::from(line),
                accepted: true,
            });

            exec(&cmd, strict)
        }
        Err(e) => {
            transcript.push(TranscriptEntry {
                time_s,
                line: String::from(line),
                accepted: false,
            });

            // clap errors carry the usage and help text
            println!("{}", e.message);

            CmdOutcome::Continue
        }
    }
}

/// Build, validate and echo a trajectory command.
fn exec_traj(cmd: &TrajCmd, strict: bool) {
    if let Err(e) = cmd.validate() {
        if strict {
            error!("Command rejected: {}", e);
            return;
        }

        warn!("Command failed validation, echoing it anyway: {}", e);
    }

    let request = match cmd.to_request() {
        Ok(r) => r,
        Err(e) => {
            error!("Could not build the request: {}", e);
            return;
        }
    };

    info!("REST: {}", request.to_query_string());

    let params = if request.params.is_empty() {
        None
    } else {
        Some(request.params.clone())
    };

    match WsMessage::command(request.endpoint, params, Utc::now()) {
        Ok(msg) => log_envelope(&msg),
        Err(e) => error!("Could not build the command envelope: {}", e),
    }
}

/// Validate an arms bundle and echo its joint-move expansion.
fn exec_arms(params: &ArmsParams, strict: bool) {
    if let Err(e) = params.validate() {
        if strict {
            error!("Command rejected: {}", e);
            return;
        }

        warn!("Command failed validation, echoing it anyway: {}", e);
    }

    for joint_move in params.to_joint_moves().iter() {
        exec_traj(&TrajCmd::Joint(joint_move.clone()), strict);
    }
}

/// Build, validate and echo an LED command.
fn exec_led(cmd: &DiscoCmd, strict: bool) {
    if let Err(e) = cmd.validate() {
        if strict {
            error!("Command rejected: {}", e);
            return;
        }

        warn!("Command failed validation, echoing it anyway: {}", e);
    }

    let params = match cmd.to_params() {
        Ok(p) => p,
        Err(e) => {
            error!("Could not build the parameters: {}", e);
            return;
        }
    };

    if params.is_empty() {
        info!("REST: {}", cmd.rest_path());
    } else {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        info!("REST: {}?{}", cmd.rest_path(), query.join("&"));
    }

    let ws_params = if params.is_empty() { None } else { Some(params) };

    match WsMessage::command(cmd.endpoint(), ws_params, Utc::now()) {
        Ok(msg) => log_envelope(&msg),
        Err(e) => error!("Could not build the command envelope: {}", e),
    }
}

/// Check a JSON value against a named schema.
fn exec_validate(schema: SchemaId, json: &[String]) {
    let text = json.join(" ");

    if text.trim().is_empty() {
        error!("No JSON value given");
        return;
    }

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            error!("Input is not JSON: {}", e);
            return;
        }
    };

    match schema.validate(&value) {
        Ok(()) => info!("Valid against `{}`", schema),
        Err(e) => error!("Rejected by `{}`: {}", schema, e),
    }
}

/// Load a routine file and report on its schedule.
fn exec_check(path: &str) {
    let routine = match Routine::new(path) {
        Ok(r) => r,
        Err(e) => {
            error!("Routine check failed: {}", e);
            return;
        }
    };

    let summary = routine.summary();

    info!(
        "Routine OK: {} commands over {:.1} s",
        summary.num_commands, summary.duration_s
    );
    for endpoint in &summary.endpoints {
        info!("    {}", endpoint);
    }

    session::save_with_timestamp("transcripts/routine_check.json", summary);
}

/// Log the WebSocket envelope a command would travel in.
fn log_envelope(msg: &WsMessage) {
    match msg.to_json() {
        Ok(json) => info!("WS:   {}", json),
        Err(e) => error!("Could not serialise the envelope: {}", e),
    }
}

/// Where the console history lives, anchored to the software root when set.
fn history_path() -> PathBuf {
    match host::get_sw_root() {
        Ok(root) => root.join(HISTORY_PATH),
        Err(_) => PathBuf::from(HISTORY_PATH),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use ric_if::robot::Side;

    fn parse(line: &str) -> Result<ReplCmd, structopt::clap::Error> {
        ReplCmd::from_iter_safe(std::iter::once("marty").chain(line.split_whitespace()))
    }

    #[test]
    fn console_lines_parse_into_commands() {
        assert!(matches!(parse("traj get-ready"), Ok(ReplCmd::Traj(_))));
        assert!(matches!(parse("led color red"), Ok(ReplCmd::Led(_))));
        assert!(matches!(parse("schemas"), Ok(ReplCmd::Schemas)));
        assert!(matches!(parse("exit"), Ok(ReplCmd::Exit)));
        assert!(parse("warp 9").is_err());
    }

    #[test]
    fn negative_numbers_reach_command_fields() {
        match parse("traj lean left -a -20") {
            Ok(ReplCmd::Traj(TrajCmd::Lean(params))) => {
                assert_eq!(params.direction, Side::Left);
                assert_eq!(params.amount, Some(-20.0));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn arms_parse_with_negative_angles() {
        match parse("arms 45 -30 800") {
            Ok(ReplCmd::Arms(params)) => {
                assert_eq!(params.left_angle, 45.0);
                assert_eq!(params.right_angle, -30.0);
                assert_eq!(params.move_time, 800);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn validate_lines_keep_their_json_tokens() {
        match parse(r#"validate lean-params {"direction": "left"}"#) {
            Ok(ReplCmd::Validate { schema, json }) => {
                assert_eq!(schema, SchemaId::LeanParams);
                assert_eq!(json.join(" "), r#"{"direction": "left"}"#);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn help_is_reported_through_the_parse_error() {
        let err = parse("help").unwrap_err();
        assert_eq!(err.kind, structopt::clap::ErrorKind::HelpDisplayed);
    }

    #[test]
    fn only_exit_quits_the_console() {
        assert_eq!(exec(&ReplCmd::Schemas, true), CmdOutcome::Continue);
        assert_eq!(exec(&ReplCmd::Version, true), CmdOutcome::Continue);
        assert_eq!(exec(&ReplCmd::Exit, true), CmdOutcome::Quit);
    }
}
