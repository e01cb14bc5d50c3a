use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, FormCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, register, sign out, inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Submit a point to the backend and record the result.
    Check(CheckArgs),
    /// Fetch and show the checked-point history.
    History,
    /// Delete the whole history on the backend.
    Clear,
    /// Follow the history live until the session ends or Ctrl-C.
    Watch(WatchArgs),
    /// Evaluate membership locally, without the backend.
    Contains(ContainsArgs),
    /// Render the region and the history as an SVG document.
    Plot(PlotArgs),
    /// Saved form input.
    Form {
        #[command(subcommand)]
        action: FormCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// X coordinate in [-3, 3].
    #[arg(allow_negative_numbers = true, required_unless_present = "at_svg", requires = "y")]
    pub x: Option<f64>,
    /// Y coordinate in [-5, 3].
    #[arg(allow_negative_numbers = true, required_unless_present = "at_svg")]
    pub y: Option<f64>,
    /// Pick the point by its position on the plot, in the SVG units
    /// `pcheck plot` draws with. Rounded and clamped to the input bounds.
    #[arg(
        long,
        num_args = 2,
        value_names = ["SX", "SY"],
        allow_negative_numbers = true,
        conflicts_with_all = ["x", "y"]
    )]
    pub at_svg: Option<Vec<f64>>,
    /// Radius in (0, 3]. Defaults to the saved form value.
    #[arg(long, allow_negative_numbers = true)]
    pub r: Option<f64>,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in milliseconds (defaults to history.poll_interval_ms).
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct ContainsArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: f64,
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    #[arg(allow_negative_numbers = true)]
    pub r: f64,
}

#[derive(Clone, Debug, Args)]
pub struct PlotArgs {
    /// Radius of the region to draw. Defaults to the saved form value.
    #[arg(long, allow_negative_numbers = true)]
    pub r: Option<f64>,
    /// Skip the history fetch and draw the region only.
    #[arg(long)]
    pub no_points: bool,
    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
