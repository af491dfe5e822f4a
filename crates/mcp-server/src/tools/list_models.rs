use anyhow::{Context as AnyhowContext, Result};
use recordbridge_query::camelize;
use std::path::Path;

use super::schemas::ModelEntry;

/// Base class every application model inherits from; not queryable itself.
const ABSTRACT_BASE_FILE: &str = "application_record.rb";

/// Model files directly under `models_dir`, as entity names sorted by name.
pub(super) async fn compute_models(models_dir: &Path) -> Result<Vec<ModelEntry>> {
    let mut entries = tokio::fs::read_dir(models_dir)
        .await
        .with_context(|| format!("Failed to read models directory {}", models_dir.display()))?;

    let mut models = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rb") {
            continue;
        }
        let Some(file) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if file == ABSTRACT_BASE_FILE {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        models.push(ModelEntry {
            name: camelize(stem),
            file: file.to_string(),
        });
    }

    models.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(models)
}
