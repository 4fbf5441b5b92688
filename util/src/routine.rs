//! # Marty routine interpreter module
//!
//! Routines are timed command scripts. Each entry pairs an offset in seconds
//! from routine start with the command to issue at that time, in the same
//! `{endpoint, params?}` shape the WebSocket `command` payload uses:
//!
//! ```text
//! 0.0:  {"endpoint": "traj/getReady"};
//! 2.5:  {"endpoint": "traj/step", "params": {"numSteps": 4}};
//! 10.0: {"endpoint": "traj/standStraight"};
//! ```
//!
//! Anything outside a `<seconds>: <json>;` entry is ignored, so blank lines
//! and comment lines are fine. Every command is validated against the
//! catalogue when the routine loads, a routine that parses is a routine
//! whose every command would be accepted.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;
use ric_if::api::ws::CommandPayload;
use ric_if::validate::{self, ValidateError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scheduled to be issued at a specific time.
#[derive(Debug)]
pub struct TimedCommand {
    /// The offset from routine start to issue the command at
    exec_time_s: f64,

    /// The command to issue
    command: CommandPayload,
}

/// A routine interpreter.
///
/// After initialising with the path of the routine to run use
/// [`Routine::get_pending_commands`] to acquire the commands that need
/// issuing now.
#[derive(Debug)]
pub struct Routine {
    _routine_path: PathBuf,
    queue: VecDeque<TimedCommand>,
}

/// Loading summary of a routine, saved into session transcripts.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineSummary {
    pub path: String,
    pub num_commands: usize,
    pub duration_s: f64,
    pub endpoints: Vec<String>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("Could not find the routine at {0}")]
    NotFound(String),

    #[error("Could not load the routine: {0}")]
    LoadError(std::io::Error),

    #[error("The routine is empty (or is so bad it can't be read)")]
    Empty,

    #[error(
        "Routine contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Routine contains an invalid command at {0} s: {1}")]
    InvalidCommand(f64, serde_json::Error),

    #[error("Routine command at {0} s was rejected: {1}")]
    CommandRejected(f64, ValidateError),
}

pub enum PendingCommands {
    None,
    Some(Vec<CommandPayload>),
    EndOfRoutine,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Routine {
    /// Create a new interpreter from the given routine path.
    pub fn new<P: AsRef<Path>>(routine_path: P) -> Result<Self, RoutineError> {
        // Get the path in a buffer
        let path = PathBuf::from(routine_path.as_ref());

        // Check that the routine file exists.
        if !path.exists() {
            return Err(RoutineError::NotFound(path.display().to_string()));
        }

        // Load the routine into a string
        let routine = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(RoutineError::LoadError(e)),
        };

        let queue = parse(&routine)?;

        Ok(Routine {
            _routine_path: path,
            queue,
        })
    }

    /// Return the commands due now, or `None` if nothing needs issuing yet.
    pub fn get_pending_commands(&mut self) -> PendingCommands {
        // If the queue is empty the routine is over and we return the end of
        // routine variant
        if self.queue.is_empty() {
            return PendingCommands::EndOfRoutine;
        }

        let current_time_s = get_elapsed_seconds();

        let mut pending: Vec<CommandPayload> = vec![];

        // Peek items from the queue, if the head's exec time is lower than
        // the current time move it into the vector, and keep going until the
        // exec times are larger than the current time.
        while let Some(head) = self.queue.front() {
            if head.exec_time_s < current_time_s {
                if let Some(cmd) = self.queue.pop_front() {
                    pending.push(cmd.command);
                }
            } else {
                break;
            }
        }

        if pending.is_empty() {
            PendingCommands::None
        } else {
            PendingCommands::Some(pending)
        }
    }

    /// Get the number of commands remaining in the routine
    pub fn num_commands(&self) -> usize {
        self.queue.len()
    }

    /// Get the length of the routine in seconds
    pub fn duration_s(&self) -> f64 {
        match self.queue.back() {
            Some(c) => c.exec_time_s,
            None => 0f64,
        }
    }

    /// Summarise the routine for transcripts.
    pub fn summary(&self) -> RoutineSummary {
        RoutineSummary {
            path: self._routine_path.display().to_string(),
            num_commands: self.num_commands(),
            duration_s: self.duration_s(),
            endpoints: self
                .queue
                .iter()
                .map(|c| String::from(c.command.endpoint.as_path()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse routine text into the scheduled command queue.
fn parse(routine: &str) -> Result<VecDeque<TimedCommand>, RoutineError> {
    let mut queue: VecDeque<TimedCommand> = VecDeque::new();

    // Go through the routine executing __the magic regex__.
    let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
        .multi_line(true)
        .build()
        .unwrap();

    for cap in re.captures_iter(routine) {
        let (time_match, body_match) = match (cap.get(1), cap.get(3)) {
            (Some(t), Some(b)) => (t, b),
            _ => continue,
        };

        // Parse the exec time
        let exec_time_s: f64 = match time_match.as_str().parse() {
            Ok(t) => t,
            Err(e) => return Err(RoutineError::InvalidTimestamp(format!("{}", e))),
        };

        // Parse the command from the payload. Routines contain JSON only.
        let value: serde_json::Value = match serde_json::from_str(body_match.as_str()) {
            Ok(v) => v,
            Err(e) => return Err(RoutineError::InvalidCommand(exec_time_s, e)),
        };

        let command: CommandPayload = match validate::typed(&value) {
            Ok(c) => c,
            Err(e) => return Err(RoutineError::CommandRejected(exec_time_s, e)),
        };

        // Check the parameters against the records documented for the
        // endpoint
        if let Err(e) = command.validate() {
            return Err(RoutineError::CommandRejected(exec_time_s, e));
        }

        queue.push_back(TimedCommand {
            exec_time_s,
            command,
        });
    }

    if queue.is_empty() {
        return Err(RoutineError::Empty);
    }

    Ok(queue)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::session;
    use ric_if::api::Endpoint;

    const GOOD_ROUTINE: &str = r#"
# Warm up, walk, stand back up
0.0:  {"endpoint": "traj/getReady"};
2.5:  {"endpoint": "traj/step", "params": {"numSteps": 4, "turn": 10}};
10.0: {"endpoint": "traj/standStraight"};
"#;

    #[test]
    fn routines_parse_in_order() {
        let queue = parse(GOOD_ROUTINE).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.front().unwrap().exec_time_s, 0.0);
        assert_eq!(queue.back().unwrap().exec_time_s, 10.0);
        assert_eq!(queue[1].command.endpoint, Endpoint::TrajStep);
    }

    #[test]
    fn commands_spanning_lines_parse() {
        let queue = parse(
            r#"1.0: {"endpoint": "traj/lean",
                     "params": {"direction": "left"}};"#,
        )
        .unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].command.endpoint, Endpoint::TrajLean);
    }

    #[test]
    fn bad_json_is_an_invalid_command() {
        let err = parse("1.0: {endpoint: nope};").unwrap_err();
        assert!(matches!(err, RoutineError::InvalidCommand(t, _) if t == 1.0));
    }

    #[test]
    fn out_of_range_parameters_are_rejected_at_load() {
        let err =
            parse(r#"3.0: {"endpoint": "traj/step", "params": {"turn": 500}};"#).unwrap_err();

        match err {
            RoutineError::CommandRejected(t, ValidateError::OutOfRange { field, .. }) => {
                assert_eq!(t, 3.0);
                assert_eq!(field, "turn");
            }
            other => panic!("expected CommandRejected, got {:?}", other),
        }
    }

    #[test]
    fn unknown_endpoints_are_rejected_at_load() {
        let err = parse(r#"0.5: {"endpoint": "warp/engage"};"#).unwrap_err();
        assert!(matches!(
            err,
            RoutineError::CommandRejected(_, ValidateError::UnknownLiteral { .. })
        ));
    }

    #[test]
    fn text_without_entries_is_empty() {
        assert!(matches!(parse("# nothing here\n"), Err(RoutineError::Empty)));
        assert!(matches!(parse(""), Err(RoutineError::Empty)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Routine::new("/definitely/not/a/routine.mrt").unwrap_err();
        assert!(matches!(err, RoutineError::NotFound(_)));
    }

    #[test]
    fn pending_commands_follow_elapsed_time() {
        session::init_epoch();

        let mut routine = Routine {
            _routine_path: PathBuf::from("test.mrt"),
            queue: parse(GOOD_ROUTINE).unwrap(),
        };

        assert_eq!(routine.num_commands(), 3);
        assert_eq!(routine.duration_s(), 10.0);

        // The 0.0 s command is due immediately, the rest lie in the future
        match routine.get_pending_commands() {
            PendingCommands::Some(cmds) => {
                assert_eq!(cmds.len(), 1);
                assert_eq!(cmds[0].endpoint, Endpoint::TrajGetReady);
            }
            _ => panic!("expected a pending command"),
        }

        assert!(matches!(
            routine.get_pending_commands(),
            PendingCommands::None
        ));
        assert_eq!(routine.num_commands(), 2);

        // Drain the queue to see the end of the routine
        routine.queue.clear();
        assert!(matches!(
            routine.get_pending_commands(),
            PendingCommands::EndOfRoutine
        ));
    }

    #[test]
    fn summaries_list_endpoints_in_schedule_order() {
        let routine = Routine {
            _routine_path: PathBuf::from("test.mrt"),
            queue: parse(GOOD_ROUTINE).unwrap(),
        };

        let summary = routine.summary();
        assert_eq!(summary.num_commands, 3);
        assert_eq!(
            summary.endpoints,
            vec!["traj/getReady", "traj/step", "traj/standStraight"]
        );
    }
}
