use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "binder", bin_name = "binder", version)]
#[command(about = "Keep collectible cards organized in binder pages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding binder data and binder.toml
    #[arg(
        long,
        global = true,
        env = "BINDER_DATA_DIR",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new binder
    #[command(alias = "new", display_order = 1)]
    Create {
        /// Binder name
        name: String,

        /// Rows per page
        #[arg(long, short)]
        rows: Option<usize>,

        /// Columns per page
        #[arg(long, short)]
        columns: Option<usize>,

        /// Number of pages
        #[arg(long, short)]
        pages: Option<usize>,
    },

    /// List binders
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Show a binder's pages
    #[command(alias = "v", display_order = 3)]
    View {
        /// Binder number or name
        binder: String,

        /// Only this page
        #[arg(long, short)]
        page: Option<String>,
    },

    /// Rename a binder
    #[command(display_order = 4)]
    Rename { binder: String, name: String },

    /// Delete a binder and every card in it
    #[command(display_order = 5)]
    Delete { binder: String },

    /// Put a new card into a binder
    #[command(alias = "add", display_order = 10)]
    Place {
        /// Binder number or name
        binder: String,

        /// Card name
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,

        /// Slot to use (N or PAGE:SLOT); first free slot if omitted
        #[arg(long, short)]
        at: Option<String>,

        /// Set code printed on the card
        #[arg(long)]
        set: Option<String>,

        /// Collector number printed on the card
        #[arg(long)]
        number: Option<String>,
    },

    /// Move a card to another slot, swapping if the slot is taken
    #[command(name = "move", alias = "mv", display_order = 11)]
    Move {
        binder: String,
        /// Slot of the card (N or PAGE:SLOT)
        from: String,
        /// Destination slot (N or PAGE:SLOT)
        to: String,
    },

    /// Take a card out of a binder
    #[command(alias = "rm", display_order = 12)]
    Remove {
        binder: String,
        /// Slot of the card (N or PAGE:SLOT)
        at: String,

        /// Pull later cards back so no gap is left
        #[arg(long)]
        shift: bool,
    },

    /// Open an empty slot, pushing later cards forward
    #[command(display_order = 13)]
    InsertSlot { binder: String, at: String },

    /// Close an empty slot, pulling later cards back
    #[command(display_order = 14)]
    CloseSlot { binder: String, at: String },

    /// Move one page so it sits before another page
    #[command(display_order = 20)]
    MovePage {
        binder: String,
        /// Page to move
        source: String,
        /// Page it should end up in front of
        target: String,
    },

    /// Insert a blank page
    #[command(display_order = 21)]
    InsertPage {
        binder: String,
        page: String,

        /// Insert after PAGE instead of before it
        #[arg(long)]
        after: bool,
    },

    /// Delete a page and the cards on it
    #[command(display_order = 22)]
    DeletePage { binder: String, page: String },

    /// Add blank pages at the end of a binder
    #[command(display_order = 23)]
    AddPages {
        binder: String,
        #[arg(default_value_t = 1)]
        count: usize,
    },

    /// Check and repair slot consistency
    #[command(display_order = 30)]
    Doctor,

    /// Show configuration
    #[command(display_order = 31)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective values
    Show,
    /// Print where binder keeps its data
    Path,
    /// Print a commented binder.toml
    Template,
}
