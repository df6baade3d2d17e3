//! Clap derive structures for the `keeplink` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// keeplink -- CLI for Keeplink web-managed switches
#[derive(Debug, Parser)]
#[command(
    name = "keeplink",
    version,
    about = "Manage Keeplink switches from the command line",
    long_about = "A CLI for Keeplink web-managed Ethernet switches.\n\n\
        Talks to the switch's embedded web interface over plain HTTP,\n\
        scraping its management pages for state and submitting its\n\
        forms for control.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch host (IP or hostname, optionally host:port)
    #[arg(long, short = 'H', env = "KEEPLINK_HOST", global = true)]
    pub host: Option<String>,

    /// Login username
    #[arg(long, short = 'u', env = "KEEPLINK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "KEEPLINK_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Path to the config file
    #[arg(long, env = "KEEPLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "KEEPLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "KEEPLINK_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,

    /// Overall deadline for one full sync cycle in seconds
    #[arg(
        long,
        env = "KEEPLINK_CYCLE_TIMEOUT",
        default_value = "20",
        global = true
    )]
    pub cycle_timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show device identity and system state
    #[command(alias = "info")]
    Status,

    /// List all ports with link, config, and traffic state
    #[command(alias = "p")]
    Ports,

    /// View and control PoE power delivery
    Poe(PoeArgs),

    /// Change port link settings
    Port(PortArgs),

    /// Clear all port traffic counters
    ClearStats,

    /// Reboot the switch
    Reboot,

    /// Poll the switch and redraw the port table on an interval
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── PoE ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PoeArgs {
    #[command(subcommand)]
    pub command: PoeCommand,
}

#[derive(Debug, Subcommand)]
pub enum PoeCommand {
    /// Show per-port PoE delivery state
    #[command(alias = "ls")]
    Show,

    /// Enable PoE power delivery on a port
    On {
        /// Port number (1-based)
        port: u16,
    },

    /// Disable PoE power delivery on a port
    Off {
        /// Port number (1-based)
        port: u16,
    },
}

// ── Port settings ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PortArgs {
    #[command(subcommand)]
    pub command: PortCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortCommand {
    /// Administratively enable a port
    Enable {
        /// Port number (1-based)
        port: u16,
    },

    /// Administratively disable a port
    Disable {
        /// Port number (1-based)
        port: u16,
    },

    /// Set a port's speed/duplex
    Speed {
        /// Port number (1-based)
        port: u16,
        /// Speed label ("Auto", "100M Full", "1000M Full", ...) or raw form code
        speed: String,
    },

    /// Set a port's flow control
    Flow {
        /// Port number (1-based)
        port: u16,
        /// Flow control state
        state: FlowState,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FlowState {
    On,
    Off,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds
    #[arg(long, short = 'n', default_value = "5")]
    pub interval: u64,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
