//! Signing a request with an `Authorization` header.

use {
    crate::{
        canonical::{CanonicalParts, Request},
        constants::{AWS4_HMAC_PREFIX, CREDENTIAL_PREFIX, SIGNATURE_PREFIX, SIGNED_HEADERS_PREFIX},
        crypto::{HashProvider, Sha2HashProvider},
        headers::{sorted_canonical_headers, write_signed_headers, Header},
        signature::SigningParams,
        sink::Sink,
        string_to_sign::write_scope,
        SignatureError,
    },
    log::debug,
};

/// Sign `request`, writing the `Authorization` header value to `out`:
///
/// ```text
/// AWS4-HMAC-SHA256 Credential=<access key>/<scope>, SignedHeaders=<names>, Signature=<hex>
/// ```
///
/// Every header in `request` is signed.
pub fn sign_to<P, H, S>(
    provider: &P,
    params: &SigningParams,
    request: &Request<H>,
    out: &mut S,
) -> Result<(), SignatureError>
where
    P: HashProvider,
    H: Header,
    S: Sink + ?Sized,
{
    let headers = sorted_canonical_headers(request.headers);
    let signature = params.signature(provider, &CanonicalParts::from_request(request, &headers))?;

    out.write_str(AWS4_HMAC_PREFIX);
    out.write_str(params.hash_algorithm());
    out.write_byte(b' ');
    out.write_str(CREDENTIAL_PREFIX);
    out.write_str(params.access_key_id());
    out.write_byte(b'/');
    write_scope(params.date(), params.region(), params.service(), out);
    out.write_str(", ");
    out.write_str(SIGNED_HEADERS_PREFIX);
    write_signed_headers(&headers, out);
    out.write_str(", ");
    out.write_str(SIGNATURE_PREFIX);
    out.write_str(&signature);
    Ok(())
}

/// Sign `request` using `provider`, returning the `Authorization` header value.
pub fn sign_with<P: HashProvider, H: Header>(
    provider: &P,
    params: &SigningParams,
    request: &Request<H>,
) -> Result<String, SignatureError> {
    let mut out = Vec::with_capacity(256);
    sign_to(provider, params, request, &mut out)?;
    let authorization = String::from_utf8_lossy(&out).into_owned();
    debug!("Signed {} {}: {}", request.method, request.uri_path, authorization);
    Ok(authorization)
}

/// Sign `request` with the SHA-2 hash provider, returning the `Authorization` header value.
pub fn sign<H: Header>(params: &SigningParams, request: &Request<H>) -> Result<String, SignatureError> {
    sign_with(&Sha2HashProvider, params, request)
}
