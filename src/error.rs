use {
    crate::constants::*,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when an attempt at signing, presigning, or verifying an AWS SigV4 request fails.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SignatureError {
    /// A `%` escape in the input was followed by a byte that is not a hex digit.
    InvalidEscape(/* offending byte */ u8),

    /// The input ended in the middle of a `%` escape sequence.
    TruncatedEscape,

    /// A credential scope (`access/date/region/service/aws4_request`) could not be parsed.
    CredentialScope(CredentialScopeParseError),

    /// An `Authorization` header value could not be parsed.
    AuthorizationHeader(AuthorizationHeaderParseError),

    /// The output buffer passed to `presign` is too small. `required_bytes` is the exact size of the output;
    /// retrying with a buffer of at least this size succeeds.
    Capacity {
        /// The number of bytes the full output requires.
        required_bytes: usize,
    },

    /// The hash provider failed, usually because it does not support the requested algorithm.
    HashProvider(/* message */ String),
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidEscape(c) => write!(f, "{}{}", ERR_MSG_ILLEGAL_HEX_CHAR, c.escape_ascii()),
            Self::TruncatedEscape => f.write_str(ERR_MSG_INCOMPLETE_TRAILING_ESCAPE),
            Self::CredentialScope(e) => Display::fmt(e, f),
            Self::AuthorizationHeader(e) => Display::fmt(e, f),
            Self::Capacity {
                required_bytes,
            } => write!(f, "{}{}", ERR_MSG_INSUFFICIENT_CAPACITY, required_bytes),
            Self::HashProvider(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignatureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CredentialScope(ref e) => Some(e),
            Self::AuthorizationHeader(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<CredentialScopeParseError> for SignatureError {
    fn from(e: CredentialScopeParseError) -> SignatureError {
        SignatureError::CredentialScope(e)
    }
}

impl From<AuthorizationHeaderParseError> for SignatureError {
    fn from(e: AuthorizationHeaderParseError) -> SignatureError {
        SignatureError::AuthorizationHeader(e)
    }
}

/// The reason a credential scope failed to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CredentialScopeErrorKind {
    /// No `/` follows the access key id.
    NoSlashAfterAccessKeyId,
    /// The access key id is empty.
    EmptyAccessKeyId,
    /// No `/` follows the date.
    NoSlashAfterDate,
    /// The date is empty.
    EmptyDate,
    /// No `/` follows the region.
    NoSlashAfterRegion,
    /// The region is empty.
    EmptyRegion,
    /// No `/` follows the service.
    NoSlashAfterService,
    /// The service is empty.
    EmptyService,
    /// The trailing request terminator (normally `aws4_request`) is empty.
    EmptyRequest,
}

impl Display for CredentialScopeErrorKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(match self {
            Self::NoSlashAfterAccessKeyId => ERR_MSG_NO_SLASH_AFTER_ACCESS_KEY_ID,
            Self::EmptyAccessKeyId => ERR_MSG_EMPTY_ACCESS_KEY_ID,
            Self::NoSlashAfterDate => ERR_MSG_NO_SLASH_AFTER_DATE,
            Self::EmptyDate => ERR_MSG_EMPTY_DATE,
            Self::NoSlashAfterRegion => ERR_MSG_NO_SLASH_AFTER_REGION,
            Self::EmptyRegion => ERR_MSG_EMPTY_REGION,
            Self::NoSlashAfterService => ERR_MSG_NO_SLASH_AFTER_SERVICE,
            Self::EmptyService => ERR_MSG_EMPTY_SERVICE,
            Self::EmptyRequest => ERR_MSG_EMPTY_REQUEST,
        })
    }
}

/// Error returned by [`CredentialScope::parse`][crate::CredentialScope::parse].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CredentialScopeParseError {
    /// What went wrong.
    pub kind: CredentialScopeErrorKind,

    /// Byte offset into the input where the failure was detected.
    pub offset: usize,
}

impl Display for CredentialScopeParseError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl Error for CredentialScopeParseError {}

/// The reason an `Authorization` header value failed to parse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthorizationHeaderErrorKind {
    /// The algorithm is not followed by whitespace.
    NoSpaceAfterAlgorithm,
    /// The algorithm is empty.
    EmptyAlgorithm,
    /// The `Credential=` field is missing.
    NoCredential,
    /// No `,` follows the credential.
    NoCommaAfterCredential,
    /// The credential scope failed to parse.
    BadCredential(CredentialScopeErrorKind),
    /// The `SignedHeaders=` field is missing.
    NoSignedHeaders,
    /// No `,` follows the signed headers.
    NoCommaAfterSignedHeaders,
    /// The `Signature=` field is missing.
    NoSignature,
    /// The signature is empty.
    EmptySignature,
}

impl Display for AuthorizationHeaderErrorKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::NoSpaceAfterAlgorithm => f.write_str(ERR_MSG_NO_SPACE_AFTER_ALGORITHM),
            Self::EmptyAlgorithm => f.write_str(ERR_MSG_EMPTY_ALGORITHM),
            Self::NoCredential => f.write_str(ERR_MSG_NO_CREDENTIAL),
            Self::NoCommaAfterCredential => f.write_str(ERR_MSG_NO_COMMA_AFTER_CREDENTIAL),
            Self::BadCredential(inner) => write!(f, "{}{}", ERR_MSG_INVALID_CREDENTIAL, inner),
            Self::NoSignedHeaders => f.write_str(ERR_MSG_NO_SIGNED_HEADERS),
            Self::NoCommaAfterSignedHeaders => f.write_str(ERR_MSG_NO_COMMA_AFTER_SIGNED_HEADERS),
            Self::NoSignature => f.write_str(ERR_MSG_NO_SIGNATURE),
            Self::EmptySignature => f.write_str(ERR_MSG_EMPTY_SIGNATURE),
        }
    }
}

/// Error returned by [`AuthorizationHeader::parse`][crate::AuthorizationHeader::parse].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthorizationHeaderParseError {
    /// What went wrong.
    pub kind: AuthorizationHeaderErrorKind,

    /// Byte offset into the header value where the failure was detected.
    pub offset: usize,
}

impl Display for AuthorizationHeaderParseError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl Error for AuthorizationHeaderParseError {}

#[cfg(test)]
mod tests {
    use {
        crate::{
            AuthorizationHeaderErrorKind, AuthorizationHeaderParseError, CredentialScopeErrorKind,
            CredentialScopeParseError, SignatureError,
        },
        std::error::Error,
    };

    #[test_log::test]
    fn test_display() {
        assert_eq!(SignatureError::InvalidEscape(b'!').to_string(), "Illegal hex character in escape % pattern: !");
        assert_eq!(SignatureError::InvalidEscape(0x80).to_string(), "Illegal hex character in escape % pattern: \\x80");
        assert_eq!(SignatureError::TruncatedEscape.to_string(), "Incomplete trailing escape % sequence");
        assert_eq!(
            SignatureError::Capacity {
                required_bytes: 42
            }
            .to_string(),
            "Insufficient query string capacity; bytes required: 42"
        );
        assert_eq!(SignatureError::HashProvider("boom".to_string()).to_string(), "boom");
    }

    #[test_log::test]
    fn test_from() {
        let cred = CredentialScopeParseError {
            kind: CredentialScopeErrorKind::EmptyRegion,
            offset: 9,
        };
        let e: SignatureError = cred.into();
        assert_eq!(e.to_string(), "Region is empty at offset 9");
        assert!(e.source().is_some());

        let auth = AuthorizationHeaderParseError {
            kind: AuthorizationHeaderErrorKind::BadCredential(CredentialScopeErrorKind::EmptyDate),
            offset: 40,
        };
        let e: SignatureError = auth.into();
        assert_eq!(e.to_string(), "Invalid credential scope: Date is empty at offset 40");
        assert!(SignatureError::TruncatedEscape.source().is_none());
    }
}
