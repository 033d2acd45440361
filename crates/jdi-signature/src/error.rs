use thiserror::Error;

/// A descriptor or generic signature that does not follow the JVM grammar
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("malformed signature {signature:?}: {reason}")]
pub struct MalformedSignature {
    signature: String,
    reason: String,
}

impl MalformedSignature {
    /// Creates a new error for the given input
    pub fn new(signature: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            reason: reason.into(),
        }
    }

    /// Wraps a parser failure
    pub(crate) fn from_nom(signature: &str, err: nom::Err<nom::error::Error<&str>>) -> Self {
        let reason = match err {
            nom::Err::Incomplete(_) => "unexpected end of input".to_string(),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let offset = signature.len().saturating_sub(e.input.len());
                format!("unexpected {:?} at offset {offset}", e.code)
            }
        };
        Self::new(signature, reason)
    }

    /// The rejected input
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Why it was rejected
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
