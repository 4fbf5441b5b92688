//! # Marty command line console
//!
//! Interactive console for the Marty V2 command catalogue. Trajectory and
//! LED commands are built from typed parameter records, validated against
//! their documented ranges, and echoed as the REST query and WebSocket
//! envelope they would travel as. Routine files can be checked ahead of a
//! simulation run with `check`, and raw JSON can be held against any
//! catalogue schema with `validate`.
//!
//! Run with no arguments for the interactive console, or pass a single
//! command (`command_line_marty traj walk -n 4`) for one-shot use.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod repl;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{info, warn};
use serde::Deserialize;
use structopt::StructOpt;

// Internal
use repl::ReplCmd;
use util::logger::{console_logger_init, logger_init, LevelFilter};
use util::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "command_line_marty",
    about = "Console for the Marty V2 command catalogue"
)]
struct Opt {
    /// Log debug and trace lines as well
    #[structopt(short, long)]
    verbose: bool,

    /// One-shot command to run instead of opening the console
    #[structopt(subcommand)]
    command: Option<ReplCmd>,
}

/// Console parameters, loaded from `marty_cli.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliParams {
    /// Prompt shown at the start of each console line
    pub prompt: String,

    /// Directory sessions are created under, relative to the software root
    pub sessions_dir: String,

    /// When true, commands that fail validation are not echoed
    pub strict: bool,
}

impl Default for CliParams {
    fn default() -> Self {
        CliParams {
            prompt: String::from("Marty $ "),
            sessions_dir: String::from("sessions"),
            strict: true,
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    let min_level = if opt.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };

    // One-shot commands log to the console alone, no session directory on
    // disk
    if let Some(cmd) = opt.command {
        console_logger_init(min_level).wrap_err("Failed to initialise logging")?;

        repl::exec(&cmd, true);

        return Ok(());
    }

    // ---- EARLY INITIALISATION ----

    // Console parameters have to be read before the session exists, so hold
    // any load error until the logger is up
    let (params, params_err) = util::params::load_or_default::<CliParams>("marty_cli.toml");

    // Initialise session
    let session = Session::new("command_line_marty", &params.sessions_dir)
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(min_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Marty Command Line Console\n");
    info!("Session directory: {:?}\n", session.session_root);

    if let Some(e) = params_err {
        warn!("Using default console parameters: {}", e);
    }

    // ---- CONSOLE ----

    repl::run(&session, &params)?;

    info!("Console closed");

    session.exit();

    Ok(())
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn console_params_fall_back_to_defaults() {
        let params: CliParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.prompt, "Marty $ ");
        assert_eq!(params.sessions_dir, "sessions");
        assert!(params.strict);

        let params: CliParams = serde_json::from_str(r#"{"strict": false}"#).unwrap();
        assert_eq!(params.prompt, "Marty $ ");
        assert!(!params.strict);
    }

    #[test]
    fn one_shot_commands_parse_from_argv() {
        let opt = Opt::from_iter_safe(vec!["command_line_marty", "traj", "get-ready"]).unwrap();
        assert!(opt.command.is_some());
        assert!(!opt.verbose);

        let opt = Opt::from_iter_safe(vec!["command_line_marty", "-v"]).unwrap();
        assert!(opt.command.is_none());
        assert!(opt.verbose);
    }
}
