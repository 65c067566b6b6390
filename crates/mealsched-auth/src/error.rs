//! Error types for token operations.

use thiserror::Error;

/// Result alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors raised while minting, decoding, or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A required signing setting was unset or blank.
    #[error("signing configuration missing")]
    Configuration {
        /// Name of the missing setting.
        field: &'static str,
    },
    /// The requested token lifetime was zero, negative, or out of range.
    #[error("token lifetime out of range")]
    InvalidLifetime,
    /// The payload segment was not valid base64url.
    #[error("token payload is not valid base64url")]
    MalformedToken {
        /// Underlying base64 decode error.
        source: base64::DecodeError,
    },
    /// Encoding the signed token failed.
    #[cfg(feature = "signing")]
    #[error("token encoding failed")]
    Encode {
        /// Underlying JWT error.
        source: jsonwebtoken::errors::Error,
    },
    /// Signature, issuer, audience, or lifetime validation failed.
    #[cfg(feature = "signing")]
    #[error("token rejected")]
    Rejected {
        /// Coarse classification of the rejection.
        reason: RejectionReason,
        /// Underlying JWT error.
        source: jsonwebtoken::errors::Error,
    },
}

impl TokenError {
    /// Whether the failure stems from server configuration rather than the token.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Why a token failed verification.
#[cfg(feature = "signing")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    /// `exp` is in the past.
    Expired,
    /// Signature did not match the signing key.
    InvalidSignature,
    /// `iss` did not match.
    InvalidIssuer,
    /// `aud` did not match.
    InvalidAudience,
    /// A required registered claim was absent.
    MissingClaim,
    /// Structure, encoding, or algorithm problems.
    Malformed,
}

#[cfg(feature = "signing")]
impl RejectionReason {
    /// Stable label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidIssuer => "invalid_issuer",
            Self::InvalidAudience => "invalid_audience",
            Self::MissingClaim => "missing_claim",
            Self::Malformed => "malformed",
        }
    }

    pub(crate) fn from_kind(kind: &jsonwebtoken::errors::ErrorKind) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match kind {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidIssuer => Self::InvalidIssuer,
            ErrorKind::InvalidAudience => Self::InvalidAudience,
            ErrorKind::MissingRequiredClaim(_) => Self::MissingClaim,
            _ => Self::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use std::error::Error as _;

    #[test]
    fn messages_are_constant_and_sources_preserved() {
        let decode_error = base64::engine::general_purpose::STANDARD
            .decode("***")
            .expect_err("invalid base64");
        let malformed = TokenError::MalformedToken {
            source: decode_error,
        };
        assert_eq!(malformed.to_string(), "token payload is not valid base64url");
        assert!(malformed.source().is_some());

        let config = TokenError::Configuration { field: "key" };
        assert_eq!(config.to_string(), "signing configuration missing");
        assert!(config.is_configuration());
        assert!(!TokenError::InvalidLifetime.is_configuration());
    }
}
