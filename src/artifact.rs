use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// File name of the artifact dropped by the upstream workflow step.
pub const ARTIFACT_FILE_NAME: &str = "outputs.json";

/// The parsed `outputs.json` document.
///
/// No schema is enforced beyond the keys the annotator reads: `pr_number`
/// always, `plan_output` on plan runs. Any other keys ride along into the
/// full-dump comment untouched.
#[derive(Debug, Clone)]
pub struct Artifact {
    data: Value,
}

impl Artifact {
    /// Read and parse `outputs.json` from the given directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(ARTIFACT_FILE_NAME);
        if !path.exists() {
            return Err(Error::ArtifactNotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        let data: Value = serde_json::from_str(&content)
            .map_err(|e| Error::ArtifactDecode(format!("{}: {e}", path.display())))?;
        Ok(Self { data })
    }

    #[cfg(test)]
    pub(crate) fn from_value(data: Value) -> Self {
        Self { data }
    }

    /// The pull request number the artifact points at.
    ///
    /// Accepts an integer or a numeric string; anything else is a lookup
    /// fault naming the offending value.
    pub fn pr_number(&self) -> Result<u64> {
        let value = self
            .data
            .get("pr_number")
            .ok_or_else(|| Error::Lookup("artifact is missing the pr_number key".to_string()))?;

        match value {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| Error::Lookup(format!("pr_number is not a positive integer: {n}"))),
            Value::String(s) => s.trim().parse::<u64>().map_err(|_| {
                Error::Lookup(format!("pr_number is not coercible to an integer: {s:?}"))
            }),
            other => Err(Error::Lookup(format!(
                "pr_number must be an integer or numeric string, got: {other}"
            ))),
        }
    }

    /// The plan output value, required on plan runs.
    pub fn plan_output(&self) -> Result<&Value> {
        self.data.get("plan_output").ok_or_else(|| {
            Error::Lookup("artifact is missing the plan_output key required for plan runs".to_string())
        })
    }

    /// Fenced pretty-printed serialization of the plan output.
    pub fn plan_output_markdown(&self) -> Result<String> {
        Ok(wrap_json_markdown(&serde_json::to_string_pretty(
            self.plan_output()?,
        )?))
    }

    /// Fenced pretty-printed serialization of the whole document.
    pub fn to_markdown(&self) -> Result<String> {
        Ok(wrap_json_markdown(&serde_json::to_string_pretty(
            &self.data,
        )?))
    }
}

/// Wrap JSON text in a fenced Markdown code block tagged `json`.
pub fn wrap_json_markdown(json: &str) -> String {
    format!("```json\n{json}\n```")
}
