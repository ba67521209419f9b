use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for starpass
/// Turn calendar events into volunteer shifts and submit them in bulk
#[derive(Parser)]
#[command(
    name = "starpass",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn practice, scrimmage and game calendar events into volunteer shifts",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the template catalog path
    #[arg(global = true, long = "catalog", value_name = "FILE")]
    pub catalog: Option<String>,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and a starter template catalog
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect the template catalog
    Catalog {
        #[arg(long, help = "Calendar to use (required when the catalog has several)")]
        calendar: Option<String>,

        #[arg(long = "list", help = "List keywords and their needs in match order")]
        list: bool,

        #[arg(
            long = "match",
            value_name = "TITLE",
            help = "Show which template an event title resolves to"
        )]
        title: Option<String>,
    },

    /// Build shifts from calendar events and write them for review
    Collect {
        #[arg(long, help = "Calendar to use (required when the catalog has several)")]
        calendar: Option<String>,

        /// Read events from a JSON file instead of Google Calendar
        #[arg(long = "events", value_name = "FILE")]
        events: Option<String>,

        /// First day to collect (YYYY-MM-DD)
        #[arg(long = "from", value_name = "DATE", required_unless_present = "events")]
        from: Option<String>,

        /// Last day to collect (YYYY-MM-DD)
        #[arg(long = "to", value_name = "DATE", required_unless_present = "events")]
        to: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Validate a review file and submit its shifts
    Submit {
        /// Review CSV produced by `collect`
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "check", help = "Dry run: build the requests but do not send them")]
        check: bool,

        #[arg(
            long = "payload",
            value_name = "FILE",
            help = "Also write the request bodies as JSON"
        )]
        payload: Option<String>,

        #[arg(long = "dedupe", help = "Drop rows identical to an earlier row")]
        dedupe: bool,

        #[arg(long, short = 'f', help = "Overwrite the payload file without asking")]
        force: bool,
    },
}
