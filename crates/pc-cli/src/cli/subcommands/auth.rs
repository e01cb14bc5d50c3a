use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with username and password.
    Login(AuthCredentialsArgs),
    /// Create an account and sign in.
    Register(AuthCredentialsArgs),
    /// Sign out and remove the stored token.
    Logout(AuthLogoutArgs),
    /// Show current session status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthCredentialsArgs {
    /// Username (at least 3 characters).
    pub username: String,
    /// Password (at least 6 characters).
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLogoutArgs {
    /// Notice to show with the logout.
    #[arg(long)]
    pub message: Option<String>,
}
