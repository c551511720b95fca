use super::CommandHandler;
use crate::workbench::{CustomEditorDiscretion, Workbench};
use crate::{Result, TrustgateError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Handler for the `contributions` command
pub struct ContributionsCommand {
    pub manifests: Vec<PathBuf>,
}

impl ContributionsCommand {
    pub fn new(manifests: Vec<PathBuf>) -> Self {
        Self { manifests }
    }
}

/// `publisher.name` from the manifest, else the manifest's directory name
pub fn extension_id(manifest: &Value, path: &Path) -> String {
    let field = |key: &str| manifest.get(key).and_then(Value::as_str);
    match (field("publisher"), field("name")) {
        (Some(publisher), Some(name)) => format!("{publisher}.{name}"),
        (None, Some(name)) => name.to_string(),
        _ => path
            .parent()
            .and_then(Path::file_name)
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    }
}

#[async_trait]
impl CommandHandler for ContributionsCommand {
    async fn execute(&self, workbench: &mut Workbench) -> Result<()> {
        for path in &self.manifests {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                TrustgateError::Contribution(format!("cannot read {}: {}", path.display(), e))
            })?;
            let manifest: Value = serde_json::from_str(&content)?;
            let id = extension_id(&manifest, path);

            let report = workbench.add_extension(&id, &manifest);
            info!(
                extension = %id,
                accepted = report.accepted,
                issues = report.issues.len(),
                "Collected manifest"
            );
            for issue in &report.issues {
                println!("⚠️  {} [{}]: {}", issue.extension_id, issue.index, issue.message);
            }
        }

        let mut any = false;
        for editor in workbench.custom_editors().editors() {
            any = true;
            let discretion = match editor.discretion {
                CustomEditorDiscretion::Default => "default",
                CustomEditorDiscretion::Option => "option",
            };
            println!(
                "{} ({}) from {} [{}]",
                editor.view_type, editor.display_name, editor.extension_id, discretion
            );
            for pattern in &editor.filename_patterns {
                println!("  {pattern}");
            }
        }
        if !any {
            println!("No custom editors contributed.");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "contributions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extension_id_prefers_publisher_and_name() {
        let path = Path::new("/ext/markdown/package.json");

        assert_eq!(
            extension_id(&json!({"publisher": "acme", "name": "md"}), path),
            "acme.md"
        );
        assert_eq!(extension_id(&json!({"name": "md"}), path), "md");
        assert_eq!(extension_id(&json!({}), path), "markdown");
    }
}
