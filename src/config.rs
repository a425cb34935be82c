use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Repository all comments are posted to. The upstream workflow only ever
/// targets pull requests in this one repository.
pub const REPO_PATH: &str = "deploymenttheory/terraform-demo-jamfpro-v2";

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ARTIFACT_PATH_VAR: &str = "ARTIFACT_PATH";
pub const RUN_TYPE_VAR: &str = "RUN_TYPE";

/// Run type that triggers the extra plan-output comment.
pub const PLAN_RUN_TYPE: &str = "plan";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub artifact_dir: PathBuf,
    pub run_type: String,
    pub repo: String,
    pub dry_run: bool,
}

impl Config {
    /// Build the config from CLI flags and the process environment.
    /// CLI values win; the token comes from the environment only.
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::from_env(cli, |name| std::env::var(name).ok())
    }

    fn from_env(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = require(env(TOKEN_VAR), TOKEN_VAR)?;

        let artifact_dir = match &cli.artifact_dir {
            Some(dir) => dir.clone(),
            None => PathBuf::from(require(env(ARTIFACT_PATH_VAR), ARTIFACT_PATH_VAR)?),
        };
        if artifact_dir.as_os_str().is_empty() {
            return Err(Error::ConfigValidation(
                "artifact directory must not be empty".to_string(),
            ));
        }

        let run_type = match &cli.run_type {
            Some(t) => t.clone(),
            None => require(env(RUN_TYPE_VAR), RUN_TYPE_VAR)?,
        };
        if run_type.is_empty() {
            return Err(Error::ConfigValidation(
                "run type must not be empty".to_string(),
            ));
        }

        Ok(Self {
            token,
            artifact_dir,
            run_type,
            repo: REPO_PATH.to_string(),
            dry_run: cli.dry_run,
        })
    }

    /// Plan runs post the `plan_output` value as a separate first comment.
    pub fn is_plan_run(&self) -> bool {
        self.run_type == PLAN_RUN_TYPE
    }
}

fn require(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::ConfigValidation(format!(
            "{name} is not set or empty"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load_with(cli: &Cli, env: &HashMap<String, String>) -> Result<Config> {
        Config::from_env(cli, |name| env.get(name).cloned())
    }

    #[test]
    fn test_all_vars_present() {
        let env = env_of(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("ARTIFACT_PATH", "/tmp/artifacts"),
            ("RUN_TYPE", "plan"),
        ]);
        let cli = Cli::parse_from(["prnote"]);
        let config = load_with(&cli, &env).unwrap();
        assert_eq!(config.token, "ghp_test");
        assert_eq!(config.artifact_dir, PathBuf::from("/tmp/artifacts"));
        assert_eq!(config.run_type, "plan");
        assert_eq!(config.repo, REPO_PATH);
        assert!(config.is_plan_run());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_missing_token_rejected() {
        let env = env_of(&[("ARTIFACT_PATH", "/tmp/artifacts"), ("RUN_TYPE", "apply")]);
        let cli = Cli::parse_from(["prnote"]);
        let err = load_with(&cli, &env).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN is not set or empty"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let env = env_of(&[
            ("GITHUB_TOKEN", ""),
            ("ARTIFACT_PATH", "/tmp/artifacts"),
            ("RUN_TYPE", "apply"),
        ]);
        let cli = Cli::parse_from(["prnote"]);
        let err = load_with(&cli, &env).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_missing_artifact_path_rejected() {
        let env = env_of(&[("GITHUB_TOKEN", "ghp_test"), ("RUN_TYPE", "apply")]);
        let cli = Cli::parse_from(["prnote"]);
        let err = load_with(&cli, &env).unwrap_err();
        assert!(err.to_string().contains("ARTIFACT_PATH"));
    }

    #[test]
    fn test_missing_run_type_rejected() {
        let env = env_of(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("ARTIFACT_PATH", "/tmp/artifacts"),
        ]);
        let cli = Cli::parse_from(["prnote"]);
        let err = load_with(&cli, &env).unwrap_err();
        assert!(err.to_string().contains("RUN_TYPE"));
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_of(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("ARTIFACT_PATH", "/from/env"),
            ("RUN_TYPE", "apply"),
        ]);
        let cli = Cli::parse_from([
            "prnote",
            "--artifact-dir",
            "/from/cli",
            "--run-type",
            "plan",
        ]);
        let config = load_with(&cli, &env).unwrap();
        assert_eq!(config.artifact_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.run_type, "plan");
    }

    #[test]
    fn test_cli_satisfies_missing_env() {
        let env = env_of(&[("GITHUB_TOKEN", "ghp_test")]);
        let cli = Cli::parse_from([
            "prnote",
            "--artifact-dir",
            "/tmp/artifacts",
            "--run-type",
            "destroy",
        ]);
        let config = load_with(&cli, &env).unwrap();
        assert_eq!(config.run_type, "destroy");
        assert!(!config.is_plan_run());
    }

    #[test]
    fn test_empty_cli_run_type_rejected() {
        let env = env_of(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("ARTIFACT_PATH", "/tmp/artifacts"),
        ]);
        let cli = Cli::parse_from(["prnote", "--run-type", ""]);
        let err = load_with(&cli, &env).unwrap_err();
        assert!(err.to_string().contains("run type must not be empty"));
    }

    #[test]
    fn test_dry_run_carried_through() {
        let env = env_of(&[
            ("GITHUB_TOKEN", "ghp_test"),
            ("ARTIFACT_PATH", "/tmp/artifacts"),
            ("RUN_TYPE", "plan"),
        ]);
        let cli = Cli::parse_from(["prnote", "--dry-run"]);
        let config = load_with(&cli, &env).unwrap();
        assert!(config.dry_run);
    }
}
