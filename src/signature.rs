//! Signing parameters shared by signing, presigning, and verification.

use {
    crate::{
        canonical::CanonicalParts,
        chronoutil::{date_part, format_iso8601_compact, ParseISO8601Compact},
        constants::DEFAULT_HASH_ALGORITHM,
        crypto::HashProvider,
        signing_key::SigningKey,
        string_to_sign::compute_signature,
        SignatureError,
    },
    chrono::{DateTime, Utc},
    derive_builder::Builder,
    qualifier_attr::qualifiers,
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// Who is signing, when, and for which region and service.
///
/// Construct one with [`SigningParams::builder`]:
///
/// ```rust
/// use aws_sigv4_sign::SigningParams;
///
/// let params = SigningParams::builder()
///     .access_key_id("AKIDEXAMPLE")
///     .secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
///     .timestamp("20150830T123600Z")
///     .region("us-east-1")
///     .service("iam")
///     .build()
///     .unwrap();
/// assert_eq!(params.hash_algorithm(), "SHA256");
/// assert_eq!(params.date(), "20150830");
/// ```
#[derive(Builder, Clone, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SigningParams {
    /// The hash algorithm name, e.g. `SHA256`. The SigV4 algorithm is `AWS4-HMAC-` followed by this name.
    #[builder(setter(into), default = "DEFAULT_HASH_ALGORITHM.to_string()")]
    hash_algorithm: String,

    /// The access key id placed in the credential scope. Verification never reads it, so it defaults to empty;
    /// set it whenever signing.
    #[builder(setter(into), default)]
    access_key_id: String,

    /// The secret access key the signing key is derived from.
    #[builder(setter(into))]
    secret_access_key: String,

    /// The request timestamp, `YYYYMMDD'T'HHMMSS'Z'`.
    #[builder(setter(into))]
    timestamp: String,

    /// The region, e.g. `us-east-1`.
    #[builder(setter(into))]
    region: String,

    /// The service, e.g. `iam`. `s3` selects S3 path canonicalization.
    #[builder(setter(into))]
    service: String,
}

impl SigningParamsBuilder {
    /// Set the timestamp from a date and time.
    pub fn date_time(&mut self, date_time: DateTime<Utc>) -> &mut Self {
        self.timestamp = Some(format_iso8601_compact(&date_time));
        self
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(timestamp) = &self.timestamp {
            if let Err(e) = DateTime::<Utc>::parse_from_iso8601_compact(timestamp) {
                return Err(format!("Invalid timestamp {:?}: {}", timestamp, e));
            }
        }

        Ok(())
    }
}

impl SigningParams {
    /// Create a [SigningParamsBuilder] to construct a [SigningParams].
    #[inline]
    pub fn builder() -> SigningParamsBuilder {
        SigningParamsBuilder::default()
    }

    /// Build parameters without validating the timestamp. Used for inbound requests, whose timestamps are
    /// checked against the credential scope instead.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn unchecked(
        hash_algorithm: &str,
        access_key_id: &str,
        secret_access_key: &str,
        timestamp: &str,
        region: &str,
        service: &str,
    ) -> Self {
        Self {
            hash_algorithm: hash_algorithm.to_string(),
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            timestamp: timestamp.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// Retrieve the hash algorithm name.
    #[inline]
    pub fn hash_algorithm(&self) -> &str {
        &self.hash_algorithm
    }

    /// Retrieve the access key id.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Retrieve the timestamp.
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Retrieve the `YYYYMMDD` date portion of the timestamp.
    #[inline]
    pub fn date(&self) -> &str {
        date_part(&self.timestamp)
    }

    /// Retrieve the region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Retrieve the service.
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Derive the signing key for these parameters.
    pub fn signing_key<P: HashProvider>(&self, provider: &P) -> Result<SigningKey, SignatureError> {
        SigningKey::derive(
            provider,
            &self.hash_algorithm,
            &self.secret_access_key,
            self.date(),
            &self.region,
            &self.service,
        )
    }

    /// Hash the canonical request and sign it with an already-derived key.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn signature_with_key<P: HashProvider>(
        &self,
        provider: &P,
        signing_key: &SigningKey,
        parts: &CanonicalParts,
    ) -> Result<String, SignatureError> {
        let canonical_request_hash = parts.hash(provider, &self.hash_algorithm, &self.service)?.to_hex();
        compute_signature(
            provider,
            &self.hash_algorithm,
            signing_key,
            &self.timestamp,
            &self.region,
            &self.service,
            &canonical_request_hash,
        )
    }

    /// Compute the hex signature of a canonical request.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn signature<P: HashProvider>(&self, provider: &P, parts: &CanonicalParts) -> Result<String, SignatureError> {
        let signing_key = self.signing_key(provider)?;
        self.signature_with_key(provider, &signing_key, parts)
    }
}

impl Debug for SigningParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SigningParams")
            .field("hash_algorithm", &self.hash_algorithm)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"*****")
            .field("timestamp", &self.timestamp)
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}
