use thiserror::Error;

/// Errors raised while turning a bridged payload into typed records.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A text payload was not valid JSON.
    #[error("malformed JSON payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The payload decoded, but a field carried the wrong kind of value.
    #[error("payload does not fit {shape}: {source}")]
    Shape {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl BindingError {
    pub(crate) fn shape<T>(source: serde_json::Error) -> Self {
        BindingError::Shape {
            shape: short_type_name::<T>(),
            source,
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
