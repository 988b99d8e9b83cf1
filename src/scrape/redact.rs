//! Secret redaction applied to every scrape before it leaves the server
//!
//! Helm v3 keeps release state in secrets named `sh.helm.release.*`; those are
//! dropped entirely. Every other secret keeps its keys but loses its values.

use kube::api::DynamicObject;
use serde_json::Value;

/// Placeholder written over every sensitive value
pub const REDACTED: &str = "__VALUE REDACTED__";

/// `REDACTED` in the base64 form the API uses for secret `data` values
pub const REDACTED_BASE64: &str = "X19WQUxVRSBSRURBQ1RFRF9f";

/// Name prefix of Helm release storage secrets
pub const HELM_RELEASE_PREFIX: &str = "sh.helm.release";

/// Annotation kubectl uses to store the full applied manifest, values included
pub const LAST_APPLIED_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

pub fn is_helm_release(secret: &DynamicObject) -> bool {
    secret
        .metadata
        .name
        .as_deref()
        .is_some_and(|name| name.starts_with(HELM_RELEASE_PREFIX))
}

/// Drop Helm release secrets and redact the rest, keeping list order
pub fn redact_secrets(secrets: Vec<DynamicObject>) -> Vec<DynamicObject> {
    secrets
        .into_iter()
        .filter(|secret| !is_helm_release(secret))
        .map(redact_secret)
        .collect()
}

pub fn redact_secret(mut secret: DynamicObject) -> DynamicObject {
    if let Some(annotations) = secret.metadata.annotations.as_mut() {
        if let Some(applied) = annotations.get_mut(LAST_APPLIED_ANNOTATION) {
            if !applied.is_empty() {
                *applied = REDACTED.to_string();
            }
        }
    }

    if let Some(Value::Object(data)) = secret.data.get_mut("data") {
        for value in data.values_mut() {
            *value = Value::String(REDACTED_BASE64.to_string());
        }
    }

    // Write-only on the API side, but never pass it through if present
    if let Some(Value::Object(data)) = secret.data.get_mut("stringData") {
        for value in data.values_mut() {
            *value = Value::String(REDACTED.to_string());
        }
    }

    secret
}
