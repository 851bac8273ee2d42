//! Checks that hold across fields once every source has been merged.

use crate::Config;
use crate::error::{ErrorKind, Result};

pub(crate) fn validate(config: &Config) -> Result<()> {
    validate_namespaces(&config.decode.namespaces)?;
    if let Some(endpoint) = &config.indexer.endpoint
        && !matches!(endpoint.scheme(), "http" | "https")
    {
        exn::bail!(ErrorKind::Invalid {
            field: "indexer.endpoint",
            reason: format!("unsupported scheme '{}'", endpoint.scheme()),
        });
    }
    if config.indexer.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
        exn::bail!(ErrorKind::Invalid {
            field: "indexer.api_key",
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

fn validate_namespaces(namespaces: &[String]) -> Result<()> {
    if namespaces.is_empty() {
        exn::bail!(ErrorKind::Invalid {
            field: "decode.namespaces",
            reason: "at least one namespace is required".to_string(),
        });
    }
    for namespace in namespaces {
        if namespace.is_empty() || namespace.contains([':', ' ', '<', '>']) {
            exn::bail!(ErrorKind::Invalid {
                field: "decode.namespaces",
                reason: format!("'{namespace}' is not a valid namespace prefix"),
            });
        }
    }
    Ok(())
}
