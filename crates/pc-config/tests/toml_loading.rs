//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pc_config::PointcheckConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://lab.example.edu"
timeout_secs = 4

[session]
check_interval_ms = 250
storage_dir = "/var/tmp/pc"

[history]
poll_interval_ms = 5000
"#,
        )?;

        let config: PointcheckConfig = Figment::from(Serialized::defaults(PointcheckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://lab.example.edu");
        assert_eq!(config.api.timeout_secs, 4);
        assert_eq!(config.session.check_interval_ms, 250);
        assert_eq!(config.session.storage_dir, "/var/tmp/pc");
        assert_eq!(config.history.poll_interval_ms, 5000);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[history]\npoll_interval_ms = 100\n")?;

        let config: PointcheckConfig = Figment::from(Serialized::defaults(PointcheckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.history.poll_interval_ms, 100);
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.session.check_interval_ms, 1_000);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pointcheck")?;
        jail.create_file(
            ".pointcheck/config.toml",
            "[api]\nbase_url = \"http://project.local:9000\"\n",
        )?;

        let config = PointcheckConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://project.local:9000");
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn project_file_overrides_user_file() {
    Jail::expect_with(|jail| {
        let home = jail.directory().join("xdg");
        jail.create_dir("xdg/pointcheck")?;
        jail.create_file(
            "xdg/pointcheck/config.toml",
            "[api]\nbase_url = \"http://user.local\"\ntimeout_secs = 30\n",
        )?;
        jail.create_dir(".pointcheck")?;
        jail.create_file(
            ".pointcheck/config.toml",
            "[api]\nbase_url = \"http://project.local\"\n",
        )?;
        jail.set_env("XDG_CONFIG_HOME", home.display());

        let config = PointcheckConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://project.local");
        assert_eq!(config.api.timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn invalid_toml_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pointcheck")?;
        jail.create_file(".pointcheck/config.toml", "[api]\ntimeout_secs = 0\n")?;

        let err = PointcheckConfig::load().expect_err("zero timeout");
        assert!(err.to_string().contains("api.timeout_secs"));
        Ok(())
    });
}
