use crate::export::ExportFormat;
use crate::models::AfflictionKind;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for plantcare:
/// care schedules and reminders for house plants, stored in SQLite
#[derive(Parser)]
#[command(
    name = "plantcare",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plant care tracker: care events, reminders and notes on top of SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage plants
    Plant {
        #[command(subcommand)]
        action: PlantAction,
    },

    /// Manage care events and their reminders
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Inspect and deliver pending reminders
    Remind {
        #[command(subcommand)]
        action: RemindAction,
    },

    /// List open care events by next due date
    Due,

    /// Manage free-form notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Browse the reference plant catalogue
    Reference {
        #[command(subcommand)]
        action: ReferenceAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Export care events
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum PlantAction {
    /// Add a plant
    Add {
        name: String,

        #[arg(long = "type", default_value = "")]
        plant_type: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Edit a plant
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        plant_type: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a plant with all its care events
    Del { id: i64 },

    /// List plants
    List,
}

/// Fields shared by `event add` and `event edit`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EventFields {
    /// Care type: watering (w), fertilizing (f), spraying (s), repotting (r)
    #[arg(long)]
    pub kind: Option<String>,

    /// Repeat interval in days (fractions allowed: 0.25 = 6 h)
    #[arg(long)]
    pub interval: Option<f64>,

    /// Last time the care was done (YYYY-MM-DD [HH:MM])
    #[arg(long)]
    pub last: Option<String>,

    /// Next planned date, repotting only (YYYY-MM-DD [HH:MM])
    #[arg(long)]
    pub next: Option<String>,

    /// Fertilizer label, fertilizing only
    #[arg(long)]
    pub fertilizer: Option<String>,

    /// Reminder time (YYYY-MM-DD [HH:MM]); enables the reminder
    #[arg(long, value_name = "DATETIME")]
    pub remind: Option<String>,
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a care event to a plant
    Add {
        #[arg(long)]
        plant: i64,

        #[command(flatten)]
        fields: EventFields,
    },

    /// Edit a care event
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EventFields,

        #[arg(long = "no-remind", conflicts_with = "remind", help = "Disable the reminder")]
        no_remind: bool,

        #[arg(long = "undone", help = "Mark the event as not done")]
        undone: bool,
    },

    /// Delete a care event
    Del { id: i64 },

    /// Mark a care event as done now
    Done { id: i64 },

    /// List the care events of a plant
    List {
        #[arg(long)]
        plant: i64,

        #[arg(long, help = "Keep listing whenever the events change")]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum RemindAction {
    /// List pending reminders
    List,

    /// Deliver the reminders that are due
    Run {
        #[arg(long, help = "Keep running, polling every poll_interval_secs")]
        watch: bool,

        #[arg(long, value_name = "DATETIME", conflicts_with = "watch", help = "Pretend the current time is DATETIME")]
        at: Option<String>,
    },

    /// Cancel the pending reminder of a care event
    Cancel { event_id: i64 },
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note, optionally linked to a plant
    Add {
        text: String,

        #[arg(long)]
        plant: Option<i64>,
    },

    /// Edit a note
    Edit {
        id: i64,

        #[arg(long)]
        text: Option<String>,

        #[arg(long, conflicts_with = "general")]
        plant: Option<i64>,

        #[arg(long, help = "Unlink the note from its plant")]
        general: bool,
    },

    /// Delete a note
    Del { id: i64 },

    /// Toggle the done flag of a note
    Done { id: i64 },

    /// List notes (all, or those of one plant)
    List {
        #[arg(long)]
        plant: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum ReferenceAction {
    /// Replace a catalogue with a JSON file
    Import {
        file: String,

        #[arg(long, short = 'c', value_enum, default_value = "plants")]
        catalogue: Catalogue,
    },

    /// Search a catalogue by name
    Search {
        #[arg(default_value = "")]
        query: String,

        #[arg(long, short = 'c', value_enum, default_value = "plants")]
        catalogue: Catalogue,

        #[arg(long, help = "Only favorites")]
        favorites: bool,
    },

    /// Toggle the favorite flag of a catalogue entry
    Fav {
        id: i64,

        #[arg(long, short = 'c', value_enum, default_value = "plants")]
        catalogue: Catalogue,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Catalogue {
    Plants,
    Diseases,
    Pests,
}

impl Catalogue {
    /// `None` for the plant catalogue.
    pub fn affliction_kind(&self) -> Option<AfflictionKind> {
        match self {
            Catalogue::Plants => None,
            Catalogue::Diseases => Some(AfflictionKind::Disease),
            Catalogue::Pests => Some(AfflictionKind::Pest),
        }
    }
}
