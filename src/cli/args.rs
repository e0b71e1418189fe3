//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::PersonId;

/// Organizational hierarchy explorer
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory containing employees.json and employers.json
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Employee records (JSON array)
    #[arg(long, global = true, requires = "employers", value_hint = ValueHint::FilePath)]
    pub employees: Option<PathBuf>,

    /// Employer records (JSON array)
    #[arg(long, global = true, requires = "employees", value_hint = ValueHint::FilePath)]
    pub employers: Option<PathBuf>,

    /// Combined snapshot: {"employees": [...], "employers": [...]}
    #[arg(
        long,
        global = true,
        conflicts_with_all = ["employees", "employers"],
        value_hint = ValueHint::FilePath
    )]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full hierarchy
    Tree {
        /// Start at this person instead of the root
        #[arg(long)]
        from: Option<PersonId>,
    },

    /// List departments with head and member count
    Departments,

    /// Find a person by name or position and show the drill-down view
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// Drill into the subtree of a department head
    Open {
        /// Id of the department head
        head_id: PersonId,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
}
