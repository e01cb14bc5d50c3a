use std::path::Path;

use anyhow::Context;

const PROJECT_DOTENV: &str = ".pointcheck/.env";

/// Load dotenv files and the layered configuration.
///
/// `.pointcheck/.env` wins over a plain `.env`: dotenvy never overrides a
/// variable that is already set.
pub fn load_config() -> anyhow::Result<pc_config::PointcheckConfig> {
    load_project_dotenv()?;
    pc_config::PointcheckConfig::load_with_dotenv().context("failed to load configuration")
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let path = Path::new(PROJECT_DOTENV);
    if path.exists() {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load dotenv file at {}", path.display()))?;
    }
    Ok(())
}
