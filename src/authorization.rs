use {
    crate::{
        constants::{CREDENTIAL_PREFIX, HEADER_FIELD_SEPARATORS, SIGNATURE_PREFIX, SIGNED_HEADERS_PREFIX},
        credential::CredentialScope,
        error::{AuthorizationHeaderErrorKind, AuthorizationHeaderParseError},
    },
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// A parsed SigV4 `Authorization` header value:
///
/// ```text
/// AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, SignedHeaders=host;x-amz-date,
/// Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuthorizationHeader<'a> {
    /// The full algorithm, e.g. `AWS4-HMAC-SHA256`.
    pub algorithm: &'a str,

    /// The credential scope.
    pub credential: CredentialScope<'a>,

    /// The `;`-separated signed header names.
    pub signed_headers: &'a str,

    /// The hex signature.
    pub signature: &'a str,
}

#[inline]
fn is_separator(c: u8) -> bool {
    HEADER_FIELD_SEPARATORS.contains(&c)
}

/// Offset of the first byte at or after `from` that is not a field separator.
fn skip_separators(value: &str, from: usize) -> Option<usize> {
    value.as_bytes()[from..].iter().position(|&c| !is_separator(c)).map(|pos| from + pos)
}

fn fail(kind: AuthorizationHeaderErrorKind, offset: usize) -> AuthorizationHeaderParseError {
    AuthorizationHeaderParseError {
        kind,
        offset,
    }
}

impl<'a> AuthorizationHeader<'a> {
    /// Parse `<algorithm> Credential=<scope>, SignedHeaders=<names>, Signature=<hex>`.
    ///
    /// The algorithm ends at the first space, tab, or newline; any run of those may precede each field after
    /// a comma. Parsing stops at the first problem and reports its byte offset. A credential scope that fails
    /// to parse is reported as [`BadCredential`][AuthorizationHeaderErrorKind::BadCredential] at the offset of
    /// the failure within the whole header.
    pub fn parse(value: &'a str) -> Result<Self, AuthorizationHeaderParseError> {
        use AuthorizationHeaderErrorKind::*;

        let bytes = value.as_bytes();

        let algorithm_end = bytes.iter().position(|&c| is_separator(c)).ok_or(fail(NoSpaceAfterAlgorithm, 0))?;
        if algorithm_end == 0 {
            return Err(fail(EmptyAlgorithm, 0));
        }
        let algorithm = &value[..algorithm_end];

        let credential_field = skip_separators(value, algorithm_end).ok_or(fail(NoCredential, algorithm_end))?;
        if !value[credential_field..].starts_with(CREDENTIAL_PREFIX) {
            return Err(fail(NoCredential, credential_field));
        }
        let credential_start = credential_field + CREDENTIAL_PREFIX.len();
        let credential_end = value[credential_start..]
            .find(',')
            .map(|pos| credential_start + pos)
            .ok_or(fail(NoCommaAfterCredential, credential_start))?;
        let credential = CredentialScope::parse(&value[credential_start..credential_end])
            .map_err(|e| fail(BadCredential(e.kind), credential_start + e.offset))?;

        let after_comma = credential_end + 1;
        let signed_headers_field = skip_separators(value, after_comma).ok_or(fail(NoSignedHeaders, after_comma))?;
        if !value[signed_headers_field..].starts_with(SIGNED_HEADERS_PREFIX) {
            return Err(fail(NoSignedHeaders, signed_headers_field));
        }
        let signed_headers_start = signed_headers_field + SIGNED_HEADERS_PREFIX.len();
        let signed_headers_end = value[signed_headers_start..]
            .find(',')
            .map(|pos| signed_headers_start + pos)
            .ok_or(fail(NoCommaAfterSignedHeaders, signed_headers_start))?;
        let signed_headers = &value[signed_headers_start..signed_headers_end];

        let after_comma = signed_headers_end + 1;
        let signature_field = skip_separators(value, after_comma).ok_or(fail(NoSignature, after_comma))?;
        if !value[signature_field..].starts_with(SIGNATURE_PREFIX) {
            return Err(fail(NoSignature, signature_field));
        }
        let signature_start = signature_field + SIGNATURE_PREFIX.len();
        let signature = &value[signature_start..];
        if signature.is_empty() {
            return Err(fail(EmptySignature, signature_start));
        }

        Ok(Self {
            algorithm,
            credential,
            signed_headers,
            signature,
        })
    }
}

impl Display for AuthorizationHeader<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "{} {}{}, {}{}, {}{}",
            self.algorithm,
            CREDENTIAL_PREFIX,
            self.credential,
            SIGNED_HEADERS_PREFIX,
            self.signed_headers,
            SIGNATURE_PREFIX,
            self.signature
        )
    }
}
