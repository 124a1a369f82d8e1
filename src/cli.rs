//! Command line surface
//!
//! Windows-style `/opt` spellings are rewritten to clap's `-o`/`--opt` form
//! by [`normalize_args`] before parsing. Option names are case-insensitive,
//! values are passed through untouched.

use crate::core::platform::Platform;
use crate::core::types::{AddressingMode, Namespace, SignalOperation};
use crate::event::{signal_event, SignalRequest};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

const EXAMPLES: &str = "\
Examples:
  SignalAnyEvent /n MyEvent
  SignalAnyEvent /n MyEvent /global /pulse
  SignalAnyEvent /p 234 /h 0x124 /reset
  SignalAnyEvent /pn python.exe /h 0x124
  SignalAnyEvent /pn C:\\Python\\python.exe /h 292 /pulse /reset";

/// Options that consume the following token as their value
const VALUE_OPTIONS: [&str; 10] = [
    "n",
    "name",
    "p",
    "pid",
    "pn",
    "process_name",
    "process-name",
    "h",
    "handle",
    "config",
];

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "SignalAnyEvent")]
#[command(about = "Set, pulse or reset an event by name or by a handle inside another process")]
#[command(disable_help_flag = true, args_override_self = true)]
#[command(arg_required_else_help = true, after_help = EXAMPLES)]
pub struct Cli {
    /// Name of the event to open
    #[arg(short = 'n', long = "name", value_name = "EVENT", allow_hyphen_values = true)]
    #[arg(overrides_with_all = ["pid", "process_name"])]
    pub name: Option<String>,

    /// Id of the process owning the handle
    #[arg(short = 'p', long = "pid", value_name = "PID", allow_hyphen_values = true)]
    #[arg(overrides_with_all = ["name", "process_name"])]
    pub pid: Option<String>,

    /// Executable name or full path of the process owning the handle
    #[arg(long = "pn", aliases = ["process_name", "process-name"], value_name = "PROCESS")]
    #[arg(allow_hyphen_values = true, overrides_with_all = ["name", "pid"])]
    pub process_name: Option<String>,

    /// Handle value inside the owning process (decimal, 0x hex or 0 octal)
    #[arg(short = 'h', long = "handle", value_name = "HANDLE", allow_hyphen_values = true)]
    pub handle: Option<String>,

    /// Look the name up in the Global\ namespace
    #[arg(long, overrides_with = "local")]
    pub global: bool,

    /// Look the name up in the Local\ namespace
    #[arg(long, overrides_with = "global")]
    pub local: bool,

    /// Pulse instead of set
    #[arg(long)]
    pub pulse: bool,

    /// Reset instead of set; combined with /pulse, reset and then set
    #[arg(long)]
    pub reset: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print help
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    /// Namespace chosen on the command line, if any
    pub fn namespace(&self) -> Option<Namespace> {
        if self.global {
            Some(Namespace::Global)
        } else if self.local {
            Some(Namespace::Local)
        } else {
            None
        }
    }

    /// The selected addressing mode
    pub fn mode(&self, default_namespace: Namespace) -> AddressingMode {
        if let Some(name) = &self.name {
            AddressingMode::ByName {
                name: name.clone(),
                namespace: self.namespace().unwrap_or(default_namespace),
            }
        } else if let Some(pid) = &self.pid {
            AddressingMode::ByProcessIdAndHandle {
                pid: pid.clone(),
                handle: self.handle.clone(),
            }
        } else if let Some(process) = &self.process_name {
            AddressingMode::ByProcessNameAndHandle {
                process: process.clone(),
                handle: self.handle.clone(),
            }
        } else {
            AddressingMode::Unselected
        }
    }

    pub fn operation(&self) -> SignalOperation {
        SignalOperation::from_flags(self.pulse, self.reset)
    }

    /// Build the request, using `default_namespace` when neither /global nor /local was given
    pub fn request(&self, default_namespace: Namespace) -> SignalRequest {
        SignalRequest::new(self.mode(default_namespace), self.operation())
    }
}

/// Why the command line did not produce a runnable [`Cli`]
#[derive(Debug, Error)]
pub enum CliError {
    /// Usage was requested or no arguments were given
    #[error("{0}")]
    Help(String),

    #[error("Unsupported option '{0}'")]
    Unsupported(String),

    #[error("{0}")]
    Invalid(String),
}

impl CliError {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Help(_) => 1,
            CliError::Unsupported(_) | CliError::Invalid(_) => 2,
        }
    }

    /// Help goes to stdout, everything else to stderr
    pub fn print(&self) {
        match self {
            CliError::Help(text) => print!("{}", text),
            other => eprintln!("{}", other),
        }
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                CliError::Help(err.render().to_string())
            }
            ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => CliError::Unsupported(arg.clone()),
                _ => CliError::Invalid(err.render().to_string()),
            },
            _ => CliError::Invalid(err.render().to_string()),
        }
    }
}

/// Normalize and parse a full argument vector, program name first
pub fn parse_args<I, S>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let as_typed: Vec<String> = args.into_iter().map(Into::into).collect();
    let normalized = normalize_args(as_typed.iter().cloned());

    Cli::try_parse_from(&normalized).map_err(|err| match CliError::from(err) {
        // Report the option the way it was typed
        CliError::Unsupported(arg) => {
            let typed = normalized
                .iter()
                .position(|token| *token == arg)
                .and_then(|index| as_typed.get(index))
                .cloned()
                .unwrap_or(arg);
            CliError::Unsupported(typed)
        }
        other => other,
    })
}

/// Carry out `request` and return the process exit status
///
/// Prints `Done.` on success. On failure the stage and OS error go to stderr
/// and the OS error code becomes the status.
pub fn execute<P: Platform>(platform: &P, request: &SignalRequest) -> i32 {
    match signal_event(platform, request) {
        Ok(()) => {
            println!("Done.");
            0
        }
        Err(err) => {
            eprintln!("{}", err.report());
            err.os_code() as i32
        }
    }
}

/// Rewrite `/opt`, `-OPT` and `--Opt` spellings to the lowercase form clap expects
///
/// Single-character names become `-x`, longer ones `--name`. The token after
/// a value-taking option is left alone so values such as `/tmp/x` or `-1`
/// reach the parser intact.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut normalized: Vec<String> = iter.next().into_iter().collect();
    let mut value_pending = false;

    for arg in iter {
        if value_pending {
            value_pending = false;
            normalized.push(arg);
            continue;
        }
        match normalize_option(&arg) {
            Some((token, takes_value)) => {
                value_pending = takes_value;
                normalized.push(token);
            }
            None => normalized.push(arg),
        }
    }
    normalized
}

/// Returns the rewritten token and whether the next token is its value
fn normalize_option(arg: &str) -> Option<(String, bool)> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .or_else(|| arg.strip_prefix('/'))?;
    if body.is_empty() {
        return None;
    }

    let (name, inline_value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    let name = name.to_lowercase();
    let dashes = if name.chars().count() == 1 { "-" } else { "--" };

    match inline_value {
        Some(value) => Some((format!("{}{}={}", dashes, name, value), false)),
        None => {
            let takes_value = VALUE_OPTIONS.contains(&name.as_str());
            Some((format!("{}{}", dashes, name), takes_value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SignalStep;
    use crate::testing::MockPlatform;
    use crate::windows::utils::ErrorCode;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, CliError> {
        parse_args(std::iter::once("SignalAnyEvent").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_normalize_slash_options() {
        assert_eq!(
            normalize_args(["prog", "/N", "MyEvent", "/GLOBAL", "/Pulse"]),
            vec!["prog", "-n", "MyEvent", "--global", "--pulse"]
        );
        assert_eq!(
            normalize_args(["prog", "/pn", "/opt/App.exe", "/h", "-1", "/?"]),
            vec!["prog", "--pn", "/opt/App.exe", "-h", "-1", "-?"]
        );
        assert_eq!(
            normalize_args(["prog", "--Name=MixedCase"]),
            vec!["prog", "--name=MixedCase"]
        );
    }

    #[test]
    fn test_named_mode() {
        let cli = parse(&["/n", "MyEvent"]).unwrap();
        assert_eq!(
            cli.request(Namespace::Default),
            SignalRequest::new(
                AddressingMode::ByName {
                    name: "MyEvent".to_string(),
                    namespace: Namespace::Default,
                },
                SignalOperation::Set,
            )
        );
    }

    #[test]
    fn test_last_locator_wins() {
        let cli = parse(&["/n", "MyEvent", "/p", "234", "/h", "0x10"]).unwrap();
        assert_eq!(
            cli.mode(Namespace::Default),
            AddressingMode::ByProcessIdAndHandle {
                pid: "234".to_string(),
                handle: Some("0x10".to_string()),
            }
        );

        let cli = parse(&["/p", "234", "/pn", "python.exe", "/n", "Evt"]).unwrap();
        assert!(matches!(cli.mode(Namespace::Default), AddressingMode::ByName { .. }));

        let cli = parse(&["/n", "First", "/n", "Second"]).unwrap();
        assert_eq!(cli.name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_namespace_last_wins() {
        let cli = parse(&["/n", "E", "/global", "/local"]).unwrap();
        assert_eq!(cli.namespace(), Some(Namespace::Local));

        let cli = parse(&["/n", "E", "/local", "/global"]).unwrap();
        assert_eq!(cli.namespace(), Some(Namespace::Global));
    }

    #[test]
    fn test_configured_namespace_applies_without_flag() {
        let cli = parse(&["/n", "E"]).unwrap();
        assert_eq!(
            cli.mode(Namespace::Global),
            AddressingMode::ByName {
                name: "E".to_string(),
                namespace: Namespace::Global,
            }
        );
    }

    #[test]
    fn test_operation_flags() {
        assert_eq!(parse(&["/n", "E"]).unwrap().operation(), SignalOperation::Set);
        assert_eq!(
            parse(&["/n", "E", "/PULSE"]).unwrap().operation(),
            SignalOperation::Pulse
        );
        assert_eq!(
            parse(&["/n", "E", "-reset"]).unwrap().operation(),
            SignalOperation::Reset
        );
        assert_eq!(
            parse(&["/reset", "/n", "E", "/pulse"]).unwrap().operation(),
            SignalOperation::ResetThenSet
        );
    }

    #[test]
    fn test_process_name_aliases() {
        for option in ["/pn", "/process_name", "--process-name", "/PN"] {
            let cli = parse(&[option, "python.exe", "/handle", "5"]).unwrap();
            assert_eq!(
                cli.mode(Namespace::Default),
                AddressingMode::ByProcessNameAndHandle {
                    process: "python.exe".to_string(),
                    handle: Some("5".to_string()),
                }
            );
        }
    }

    #[test]
    fn test_handle_without_locator_is_unselected() {
        let cli = parse(&["/h", "5"]).unwrap();
        assert_eq!(cli.mode(Namespace::Default), AddressingMode::Unselected);
    }

    #[test]
    fn test_unknown_option() {
        let err = parse(&["/n", "E", "/bogus"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Unsupported option '/bogus'");

        let err = parse(&["/n", "E", "stray"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_help() {
        let cases: [&[&str]; 4] = [&["/?"], &["--help"], &["/HELP"], &[]];
        for args in cases {
            let err = parse(args).unwrap_err();
            assert_eq!(err.exit_code(), 1);
            assert!(err.to_string().contains("Examples:"));
        }
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&["/n"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_execute_exit_status() {
        let mut platform = MockPlatform::new();
        let event = platform.add_named_event("MyEvent");
        platform.add_process(700, "python.exe");

        let status = |args: &[&str]| {
            let request = parse(args).unwrap().request(Namespace::Default);
            execute(&platform, &request)
        };

        assert_eq!(status(&["/n", "MyEvent"]), 0);
        assert!(event.is_signaled());
        assert_eq!(status(&["/n", "MyEvent", "/global"]), 2);
        assert_eq!(status(&["/p", "999999", "/h", "0x10"]), 87);
        assert_eq!(status(&["/pn", "notarealprocess.exe", "/h", "5"]), 1168);
        assert_eq!(status(&["/p", "700", "/h", "0x10"]), 6);
        assert_eq!(status(&["/p", "700"]), 87);
        assert_eq!(status(&["/h", "5"]), 120);
    }

    #[test]
    fn test_execute_reports_signal_failure_code() {
        let mut platform = MockPlatform::new();
        let event = platform.add_named_event("MyEvent");
        event.fail_step(SignalStep::Reset, ErrorCode::AccessDenied);

        let request = parse(&["/n", "MyEvent", "/reset"])
            .unwrap()
            .request(Namespace::Default);
        assert_eq!(execute(&platform, &request), 5);
    }

    #[test]
    fn test_config_and_verbose() {
        let cli = parse(&["/n", "E", "/config", "C:/cfg/Signal.toml", "/V"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("C:/cfg/Signal.toml")));
        assert!(cli.verbose);
    }
}
