//! Pipeline configuration operations: validated reads and merge patching.
//!
//! A pipeline is an arbitrary JSON document owned by the gate service and
//! identified by an `(application, name)` pair. Patching fetches the current
//! document, overlays an RFC 7386 merge patch, and returns the merged result
//! without writing anything back.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::gate::PipelineConfigSource;

/// Inputs for a pipeline patch, one field per flag.
#[derive(Debug, Clone, Default)]
pub struct PatchRequest {
    pub application: String,
    pub name: String,
    /// Raw JSON merge-patch body. May be empty when a toggle flag is set.
    pub patch: String,
    pub enable: bool,
    pub disable: bool,
}

impl PatchRequest {
    fn validate(&self) -> Result<()> {
        validate_identifiers(&self.application, &self.name)?;

        if self.patch.is_empty() && !self.enable && !self.disable {
            return Err(Error::validation_invalid_argument(
                "patch",
                "No patch value given and neither --enable nor --disable set",
                None,
            ));
        }

        Ok(())
    }

    /// Ordered patch fragments assembled from the flags.
    ///
    /// The toggle fragment is ordered first so that `--disable`/`--enable`
    /// wins over a custom `--patch` body, `--disable` winning over `--enable`
    /// when both are set. The pipeline's `disabled` field is set to the
    /// strings `"true"`/`"false"`, matching what the gate stores.
    fn fragments(&self) -> Result<Vec<Value>> {
        let mut fragments = Vec::new();

        if self.disable {
            fragments.push(json!({"disabled": "true"}));
        } else if self.enable {
            fragments.push(json!({"disabled": "false"}));
        }

        if !self.patch.is_empty() {
            let parsed: Value = serde_json::from_str(&self.patch).map_err(|e| {
                Error::validation_invalid_json(e, Some("parse --patch value".to_string()))
            })?;
            fragments.push(parsed);
        }

        Ok(fragments)
    }
}

/// Fetch a pipeline configuration after validating its identifiers.
pub fn get(source: &dyn PipelineConfigSource, application: &str, name: &str) -> Result<Value> {
    validate_identifiers(application, name)?;
    source.pipeline_config(application, name)
}

/// Fetch the named pipeline and apply the request's merge patch to it.
///
/// Only the first fragment from [`PatchRequest::fragments`] is applied; a
/// custom `--patch` supplied alongside a toggle flag is ignored. Callers
/// wanting both must run the command twice.
pub fn patch(source: &dyn PipelineConfigSource, request: &PatchRequest) -> Result<Value> {
    request.validate()?;
    let fragments = request.fragments()?;

    let Some(fragment) = fragments.first() else {
        return Err(Error::internal_unexpected(
            "no patch fragments assembled after validation",
        ));
    };

    let mut pipeline = source.pipeline_config(&request.application, &request.name)?;
    json_patch::merge(&mut pipeline, fragment);

    Ok(pipeline)
}

fn validate_identifiers(application: &str, name: &str) -> Result<()> {
    let mut missing = Vec::new();
    if application.is_empty() {
        missing.push("application".to_string());
    }
    if name.is_empty() {
        missing.push("name".to_string());
    }
    if !missing.is_empty() {
        return Err(Error::validation_missing_argument(missing));
    }
    Ok(())
}
