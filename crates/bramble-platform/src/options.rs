//! Command-line options of the platform

use crate::keys;
use bramble_core::ConfigLayer;
use clap::{CommandFactory, Parser};

/// Options the platform recognizes on the command line.
///
/// Everything that is not an option is passed to the application.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct PlatformArgs {
    /// print this help text
    #[arg(short = 'h', long)]
    pub help: bool,

    /// cleans the plugin cache
    #[arg(long)]
    pub clean: bool,

    /// the id of the application extension to be executed
    #[arg(long, value_name = "id")]
    pub application: Option<String>,

    /// log messages to the console
    #[arg(long)]
    pub consolelog: bool,

    /// the plug-in to be tested
    #[arg(long, value_name = "id")]
    pub testplugin: Option<String>,

    /// the application to be tested
    #[arg(long, value_name = "id")]
    pub testapplication: Option<String>,

    /// arguments handed to the application
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Long options that take a value
const VALUE_OPTIONS: [&str; 3] = ["application", "testplugin", "testapplication"];
/// Flags without a value
const FLAG_OPTIONS: [&str; 3] = ["help", "clean", "consolelog"];

/// Result of [`PlatformArgs::parse_lenient`]
#[derive(Debug, Clone, Default)]
pub struct ParsedOptions {
    pub args: PlatformArgs,
    /// Options that were not recognized and were dropped
    pub ignored: Vec<String>,
}

impl PlatformArgs {
    /// Parse `argv` (including argv[0]) without ever failing.
    ///
    /// Unknown options are dropped with a warning. A malformed known option
    /// (a missing value) is dropped the same way; an option following it is
    /// still parsed on its own.
    pub fn parse_lenient<S: AsRef<str>>(argv: &[S]) -> ParsedOptions {
        let mut kept: Vec<String> = Vec::with_capacity(argv.len());
        let mut ignored = Vec::new();

        let mut iter = argv.iter().map(|s| s.as_ref()).peekable();
        kept.push(iter.next().unwrap_or("bramble").to_string());

        let mut positional_only = false;
        while let Some(arg) = iter.next() {
            if positional_only || arg == "-" || !arg.starts_with('-') {
                kept.push(arg.to_string());
                continue;
            }
            if arg == "--" {
                positional_only = true;
                kept.push(arg.to_string());
                continue;
            }

            if arg == "-h" {
                kept.push(arg.to_string());
                continue;
            }
            let Some(long) = arg.strip_prefix("--") else {
                tracing::warn!(option = arg, "unknown option, ignored");
                ignored.push(arg.to_string());
                continue;
            };

            let (name, inline_value) = match long.split_once('=') {
                Some((n, v)) => (n, Some(v)),
                None => (long, None),
            };

            if FLAG_OPTIONS.contains(&name) && inline_value.is_none() {
                kept.push(arg.to_string());
            } else if VALUE_OPTIONS.contains(&name) {
                match inline_value {
                    Some(_) => kept.push(arg.to_string()),
                    // The next option is never taken as the value.
                    None => match iter.next_if(|v| *v == "-" || !v.starts_with('-')) {
                        Some(value) => {
                            kept.push(arg.to_string());
                            kept.push(value.to_string());
                        }
                        None => {
                            tracing::warn!(option = arg, "option requires a value, ignored");
                            ignored.push(arg.to_string());
                        }
                    },
                }
            } else {
                tracing::warn!(option = arg, "unknown option, ignored");
                ignored.push(arg.to_string());
            }
        }

        let args = match PlatformArgs::try_parse_from(&kept) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!(error = %e, "command line not understood, using defaults");
                PlatformArgs::default()
            }
        };

        ParsedOptions { args, ignored }
    }

    /// Help text for the given command name
    pub fn help_text(command: &str) -> String {
        PlatformArgs::command()
            .bin_name(command.to_string())
            .render_help()
            .to_string()
    }

    /// Configuration layer holding the options that were given
    pub fn to_config_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::new();
        if self.clean {
            layer.set(keys::CLEAN, "true");
        }
        if self.consolelog {
            layer.set(keys::CONSOLELOG, "true");
        }
        if let Some(id) = &self.application {
            layer.set(keys::APPLICATION, id.as_str());
        }
        if let Some(id) = &self.testplugin {
            layer.set(keys::TESTPLUGIN, id.as_str());
        }
        if let Some(id) = &self.testapplication {
            layer.set(keys::TESTAPPLICATION, id.as_str());
        }
        layer
    }
}
