use std::path::PathBuf;

use clap::Parser;

/// prnote — post workflow artifact JSON as pull request comments
#[derive(Parser, Debug, Clone)]
#[command(name = "prnote", version, about)]
pub struct Cli {
    /// Directory containing outputs.json (overrides $ARTIFACT_PATH)
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,

    /// Run type; "plan" posts the plan output as an extra comment (overrides $RUN_TYPE)
    #[arg(long)]
    pub run_type: Option<String>,

    /// Go through the full flow without posting any comments
    #[arg(long)]
    pub dry_run: bool,
}
