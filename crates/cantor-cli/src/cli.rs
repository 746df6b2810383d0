use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cantor",
    about = "Cantor: partition refinement and point encoding over cut fixtures",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build one partition level of the fixture space
    Partition {
        /// Path to the space fixture JSON
        fixture: String,

        /// Refinement depth (defaults to consuming every listed cut)
        #[arg(long)]
        depth: Option<u32>,

        /// List every address slot instead of only the nonempty cells
        #[arg(long)]
        slots: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode fixture points as Cantor code prefixes
    Encode {
        /// Path to the space fixture JSON
        fixture: String,

        /// Code prefix length in bits (defaults to the listed cut count)
        #[arg(long)]
        depth: Option<u32>,

        /// Point to encode (repeatable; defaults to every point)
        #[arg(long = "point")]
        points: Vec<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the cuts separate the fixture points
    Separation {
        /// Path to the space fixture JSON
        fixture: String,

        /// Highest cut index consulted (defaults to the last listed cut)
        #[arg(long)]
        depth: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Audit the partition invariants over the fixture
    Check {
        /// Path to the space fixture JSON
        fixture: String,

        /// Audited depth (defaults to consuming every listed cut)
        #[arg(long)]
        depth: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
