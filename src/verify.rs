//! Verifying the signature on an inbound request.

use {
    crate::{
        authorization::AuthorizationHeader,
        canonical::{CanonicalParts, Request},
        chronoutil::date_part,
        constants::{AWS4_HMAC_PREFIX, AWS4_REQUEST},
        crypto::{HashProvider, Sha2HashProvider},
        headers::{filter_signed_headers, sorted_canonical_headers, Header},
        signature::SigningParams,
        SignatureError,
    },
    log::{debug, trace},
    subtle::ConstantTimeEq,
};

/// Check `signature` against the one computed for `request` under `params`, using `provider`.
///
/// Only the headers named in `signed_headers` (a `;`-separated list, compared without regard to case) take part
/// in the canonical request; any others on the request, such as `Authorization` itself, are ignored.
///
/// Returns `Ok(false)` for a signature mismatch. Errors are reserved for requests that cannot be canonicalized
/// and for unsupported hash algorithms.
pub fn verify_with<P: HashProvider, H: Header>(
    provider: &P,
    params: &SigningParams,
    signed_headers: &str,
    request: &Request<H>,
    signature: &str,
) -> Result<bool, SignatureError> {
    let headers = filter_signed_headers(sorted_canonical_headers(request.headers), signed_headers);
    let expected = params.signature(provider, &CanonicalParts::from_request(request, &headers))?;

    let matched: bool = expected.as_bytes().ct_eq(signature.as_bytes()).into();
    if matched {
        trace!("Signature matched for {} {}", request.method, request.uri_path);
    } else {
        trace!("Signature mismatch for {} {}: expected {}, got {}", request.method, request.uri_path, expected, signature);
    }

    Ok(matched)
}

/// Verify a signature with the SHA-2 hash provider. See [`verify_with`].
pub fn verify<H: Header>(
    params: &SigningParams,
    signed_headers: &str,
    request: &Request<H>,
    signature: &str,
) -> Result<bool, SignatureError> {
    verify_with(&Sha2HashProvider, params, signed_headers, request, signature)
}

/// Verify a request from its `Authorization` header value, using `provider`.
///
/// The header supplies the hash algorithm, access key, credential scope, signed header list, and signature;
/// the caller supplies the secret key for that access key and the request timestamp (normally the
/// `X-Amz-Date` header).
///
/// A header that does not parse is an error. A header that parses but cannot be valid returns `Ok(false)`:
/// an algorithm without the `AWS4-HMAC-` prefix, a scope terminator other than `aws4_request`, or a scope date
/// that differs from the date of `timestamp`.
pub fn verify_authorization_with<P: HashProvider, H: Header>(
    provider: &P,
    authorization: &str,
    secret_access_key: &str,
    timestamp: &str,
    request: &Request<H>,
) -> Result<bool, SignatureError> {
    let auth = AuthorizationHeader::parse(authorization)?;
    let credential = &auth.credential;

    let hash_algorithm = match auth.algorithm.strip_prefix(AWS4_HMAC_PREFIX) {
        Some(hash_algorithm) => hash_algorithm,
        None => {
            debug!("Unsupported signature algorithm: {}", auth.algorithm);
            return Ok(false);
        }
    };

    if credential.terminator != AWS4_REQUEST {
        debug!("Credential scope does not end with {}: {}", AWS4_REQUEST, credential);
        return Ok(false);
    }

    if credential.date != date_part(timestamp) {
        debug!("Credential scope date {} does not match timestamp {}", credential.date, timestamp);
        return Ok(false);
    }

    let params = SigningParams::unchecked(
        hash_algorithm,
        credential.access_key_id,
        secret_access_key,
        timestamp,
        credential.region,
        credential.service,
    );
    verify_with(provider, &params, auth.signed_headers, request, auth.signature)
}

/// Verify a request from its `Authorization` header value with the SHA-2 hash provider. See
/// [`verify_authorization_with`].
pub fn verify_authorization<H: Header>(
    authorization: &str,
    secret_access_key: &str,
    timestamp: &str,
    request: &Request<H>,
) -> Result<bool, SignatureError> {
    verify_authorization_with(&Sha2HashProvider, authorization, secret_access_key, timestamp, request)
}
