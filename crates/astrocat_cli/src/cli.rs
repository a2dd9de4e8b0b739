use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "astrocat",
    about = "Astrocat: edit the astro catalog stored in data.json",
    version
)]
pub struct Cli {
    /// Application directory holding data.json and media/
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Absolute directory for rolling log files (logging is off when omitted)
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List astros grouped by category
    List,

    /// Show one astro with its sections, system and moons
    Show {
        /// Exact astro name
        name: String,
    },

    /// Create a new astro
    Add {
        #[arg(long)]
        name: String,

        /// Star system name
        #[arg(long)]
        star: String,

        /// Category label, e.g. "Astros Habitáveis"
        #[arg(long, default_value = "")]
        category: String,

        /// Short description
        #[arg(long, default_value = "")]
        short: String,
    },

    /// Rename an astro, keeping every other field
    Rename { from: String, to: String },

    /// Delete an astro by name
    Delete { name: String },

    /// Copy an image or video into the media directory
    ImportMedia {
        /// Source file path
        path: String,

        /// Attach the imported file to this astro
        #[arg(long)]
        astro: Option<String>,
    },
}
