use clap::{Args, Subcommand};

/// Saved form input commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FormCommands {
    /// Show the saved input (defaults when none is saved).
    Show,
    /// Validate and save an input.
    Set(FormSetArgs),
    /// Forget the saved input.
    Clear,
}

#[derive(Clone, Debug, Args)]
pub struct FormSetArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: f64,
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
    #[arg(allow_negative_numbers = true)]
    pub r: f64,
}
