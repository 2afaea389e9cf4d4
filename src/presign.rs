//! Presigning: carrying the signature in the query string instead of an `Authorization` header.

use {
    crate::{
        canonical::{CanonicalParts, Request},
        constants::{
            AWS4_HMAC_PREFIX, X_AMZ_ALGORITHM, X_AMZ_CREDENTIAL, X_AMZ_DATE, X_AMZ_EXPIRES, X_AMZ_SIGNATURE,
            X_AMZ_SIGNED_HEADERS,
        },
        crypto::{HashProvider, Sha2HashProvider},
        headers::{sorted_canonical_headers, write_signed_headers, CanonicalHeader, Header},
        query::QueryEncoder,
        signature::SigningParams,
        sink::{Counter, Sink},
        string_to_sign::write_scope,
        SignatureError,
    },
    log::{debug, trace},
};

/// Writes into a fixed buffer, counting every byte offered even once the buffer is full.
struct QueryWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl<'b> QueryWriter<'b> {
    fn new(buf: &'b mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
        }
    }
}

impl Sink for QueryWriter<'_> {
    fn write(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        if end <= self.buf.len() {
            self.buf[self.len..end].copy_from_slice(bytes);
        }
        self.len = end;
    }
}

/// Write the presigning parameters, in the order they appear in the final query string:
///
/// ```text
/// X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Credential=<access key>/<scope>&X-Amz-Date=<timestamp>
/// &X-Amz-Expires=<seconds>&X-Amz-SignedHeaders=<names>
/// ```
///
/// The credential and signed header values are percent-encoded only if `encode` is set.
fn write_signed_params(
    params: &SigningParams,
    expiration: &str,
    headers: &[CanonicalHeader],
    encode: bool,
    out: &mut dyn Sink,
) {
    fn write_value(encode: bool, out: &mut dyn Sink, f: impl FnOnce(&mut dyn Sink)) {
        if encode {
            f(&mut QueryEncoder::new(out, false));
        } else {
            f(out);
        }
    }

    out.write_str(X_AMZ_ALGORITHM);
    out.write_byte(b'=');
    out.write_str(AWS4_HMAC_PREFIX);
    out.write_str(params.hash_algorithm());

    out.write_byte(b'&');
    out.write_str(X_AMZ_CREDENTIAL);
    out.write_byte(b'=');
    write_value(encode, out, |out| {
        out.write_str(params.access_key_id());
        out.write_byte(b'/');
        write_scope(params.date(), params.region(), params.service(), out);
    });

    out.write_byte(b'&');
    out.write_str(X_AMZ_DATE);
    out.write_byte(b'=');
    out.write_str(params.timestamp());

    out.write_byte(b'&');
    out.write_str(X_AMZ_EXPIRES);
    out.write_byte(b'=');
    out.write_str(expiration);

    out.write_byte(b'&');
    out.write_str(X_AMZ_SIGNED_HEADERS);
    out.write_byte(b'=');
    write_value(encode, out, |out| write_signed_headers(headers, out));
}

/// Presign `request` using `provider`, writing the complete query string into `out` and returning its length.
///
/// The output starts with `?`, followed by the request's existing query parameters (if any), the presigning
/// parameters, and finally `X-Amz-Signature`. `out` is never grown: if it is too small, nothing is written and
/// [`SignatureError::Capacity`] reports the exact length required.
pub fn presign_with<P: HashProvider, H: Header>(
    provider: &P,
    params: &SigningParams,
    expiration_seconds: u64,
    request: &Request<H>,
    out: &mut [u8],
) -> Result<usize, SignatureError> {
    let headers = sorted_canonical_headers(request.headers);
    let expiration = expiration_seconds.to_string();
    let existing = request.query.strip_prefix('?').unwrap_or(request.query);
    let separator: &[u8] = if existing.is_empty() || existing.ends_with('&') {
        b""
    } else {
        b"&"
    };

    let signing_key = params.signing_key(provider)?;
    let signature_len = 2 * signing_key.as_bytes().len();

    let mut counter = Counter::default();
    write_signed_params(params, &expiration, &headers, true, &mut counter);
    let required_bytes = 1
        + existing.len()
        + separator.len()
        + counter.count()
        + 1
        + X_AMZ_SIGNATURE.len()
        + 1
        + signature_len;
    if required_bytes > out.len() {
        debug!("Presign buffer too small: {} bytes available, {} required", out.len(), required_bytes);
        return Err(SignatureError::Capacity {
            required_bytes,
        });
    }

    // Pass 1: the canonical query string encodes the parameters itself, so they are hashed unencoded.
    let mut query: Vec<u8> = Vec::with_capacity(required_bytes);
    query.write(existing.as_bytes());
    query.write(separator);
    write_signed_params(params, &expiration, &headers, false, &mut query);
    let query = String::from_utf8_lossy(&query);
    trace!("Presign query before signing: {}", query);

    let parts = CanonicalParts::from_request(request, &headers).with_query(&query);
    let signature = params.signature_with_key(provider, &signing_key, &parts)?;

    // Pass 2: the parameters again, encoded, followed by the signature.
    let mut writer = QueryWriter::new(out);
    writer.write_byte(b'?');
    writer.write(existing.as_bytes());
    writer.write(separator);
    write_signed_params(params, &expiration, &headers, true, &mut writer);
    writer.write_byte(b'&');
    writer.write_str(X_AMZ_SIGNATURE);
    writer.write_byte(b'=');
    writer.write_str(&signature);

    debug_assert_eq!(writer.len, required_bytes);
    Ok(writer.len)
}

/// Presign `request` with the SHA-2 hash provider. See [`presign_with`].
pub fn presign<H: Header>(
    params: &SigningParams,
    expiration_seconds: u64,
    request: &Request<H>,
    out: &mut [u8],
) -> Result<usize, SignatureError> {
    presign_with(&Sha2HashProvider, params, expiration_seconds, request, out)
}

/// Presign `request` with the SHA-2 hash provider, returning the query string in a newly allocated `String`.
pub fn presign_to_string<H: Header>(
    params: &SigningParams,
    expiration_seconds: u64,
    request: &Request<H>,
) -> Result<String, SignatureError> {
    let mut out = vec![0; 512];
    let len = match presign(params, expiration_seconds, request, &mut out) {
        Err(SignatureError::Capacity {
            required_bytes,
        }) => {
            out.resize(required_bytes, 0);
            presign(params, expiration_seconds, request, &mut out)?
        }
        result => result?,
    };
    out.truncate(len);
    Ok(String::from_utf8_lossy(&out).into_owned())
}
