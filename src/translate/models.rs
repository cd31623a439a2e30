//! Map the upstream model registry onto the `OpenAI` `/v1/models` listing.

use chrono::Utc;

use super::llama_types::LlamaModel;
use super::openai_types::{Model, ModelList};
use crate::error::{Result, ShimError};

pub const DEFAULT_OWNER: &str = "openai";

/// Translate one upstream model record. `created` is the translation time;
/// the upstream does not report one.
pub fn to_client_model(model: &LlamaModel) -> Result<Model> {
    let id = model
        .identifier
        .clone()
        .ok_or_else(|| ShimError::mapping("missing identifier"))?;

    let owned_by = model
        .provider_id
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_OWNER.to_string());

    Ok(Model {
        id,
        object: "model".to_string(),
        created: Utc::now().timestamp(),
        owned_by,
    })
}

/// Translate the whole upstream listing, one output entry per input entry.
pub fn to_client_model_list(models: &[LlamaModel]) -> Result<ModelList> {
    let data = models
        .iter()
        .map(to_client_model)
        .collect::<Result<Vec<_>>>()?;

    Ok(ModelList {
        data,
        object: "list".to_string(),
    })
}
