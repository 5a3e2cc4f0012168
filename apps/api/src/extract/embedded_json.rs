use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::{ExtractError, ResponseParser};

/// Extracts a JSON document embedded in free text.
///
/// The candidate document is everything from the first `{` to the last `}`
/// inclusive, so prose or markdown fences around it are ignored. Whatever sits
/// between those braces must parse as `T` in full; a partially valid document
/// is rejected.
pub struct EmbeddedJson<T> {
    _output: PhantomData<fn() -> T>,
}

impl<T> EmbeddedJson<T> {
    pub const fn new() -> Self {
        Self {
            _output: PhantomData,
        }
    }
}

impl<T> Default for EmbeddedJson<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> ResponseParser for EmbeddedJson<T> {
    type Output = T;

    fn parse(&self, raw: &str) -> Result<T, ExtractError> {
        let candidate = json_span(raw).ok_or_else(|| ExtractError::NoJsonFound {
            raw: raw.to_string(),
        })?;

        serde_json::from_str(candidate).map_err(|e| ExtractError::UnparsableModelOutput {
            reason: e.to_string(),
            raw: raw.to_string(),
        })
    }
}

/// Returns the span from the first `{` to the last `}`, if the braces exist in
/// that order.
fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
