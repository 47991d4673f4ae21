/*!
 * One-time model selection at startup.
 *
 * The first model in listing order that advertises `generateContent` wins.
 * There is no preference ordering and no re-selection after a failed
 * request.
 */

use log::{debug, info};

use crate::errors::StartupError;
use crate::providers::{ModelCatalog, ModelInfo};

/// Pick the first generation-capable model in listing order
pub fn select_generation_model(models: &[ModelInfo]) -> Option<&ModelInfo> {
    models.iter().find(|model| model.supports_generation())
}

/// List the catalog and return the name of the selected model
pub async fn discover_model<C: ModelCatalog + ?Sized>(catalog: &C) -> Result<String, StartupError> {
    let models = catalog.list_models().await
        .map_err(StartupError::ModelListing)?;
    debug!("Model catalog returned {} entries", models.len());

    let selected = select_generation_model(&models)
        .ok_or(StartupError::NoCapableModel)?;
    info!("Selected model: {}", selected.name);

    Ok(selected.name.clone())
}

/// Use the configured model if any, otherwise discover one
pub async fn resolve_model<C: ModelCatalog + ?Sized>(configured: Option<&str>, catalog: &C) -> Result<String, StartupError> {
    match configured.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => {
            info!("Using configured model: {}", name);
            Ok(name.to_string())
        }
        None => discover_model(catalog).await,
    }
}
