//! Websafe entity keys of the form `<kind>:<id>`.

use crate::safe_nanoid;
use std::borrow::Cow;

#[confhub_derive::confhub_error]
pub enum KeyError {
    #[error("Invalid key{}: {message}", format_context(context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Generation and validation of client-visible entity keys.
#[derive(Debug)]
pub struct EntityKey;

impl EntityKey {
    /// Generates a fresh key such as `conference:V1StGXR8Z5jd`.
    #[must_use]
    pub fn generate(kind: &str) -> String {
        format!("{kind}:{}", safe_nanoid!())
    }

    /// Validates a client-supplied key against the expected entity `kind`.
    ///
    /// A bare id is prefixed with `kind`; a key of another kind is rejected so that, for
    /// example, a session key cannot be used where a conference key is expected.
    ///
    /// # Errors
    /// Returns [`KeyError::Invalid`] for empty ids or a kind mismatch.
    pub fn verify(raw: impl AsRef<str>, kind: &str) -> Result<String, KeyError> {
        let raw = raw.as_ref().trim();

        let (found, id) = raw.split_once(':').unwrap_or((kind, raw));
        if found != kind {
            return Err(KeyError::Invalid {
                message: format!("Expected a '{kind}' key, got '{found}'").into(),
                context: Some(raw.to_owned().into()),
            });
        }
        if id.is_empty() || id.contains(':') {
            return Err(KeyError::Invalid {
                message: format!("Malformed '{kind}' key").into(),
                context: Some(raw.to_owned().into()),
            });
        }

        Ok(format!("{kind}:{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_verification() {
        assert_eq!(EntityKey::verify("session:123", "session").unwrap(), "session:123");
        assert_eq!(EntityKey::verify("123", "session").unwrap(), "session:123");
        assert!(EntityKey::verify("conference:123", "session").is_err());
        assert!(EntityKey::verify("session:", "session").is_err());
        assert!(EntityKey::verify("", "session").is_err());
    }
}
