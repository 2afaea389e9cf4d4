//! Canonical request assembly.
//!
//! The canonical request is never built as a whole: its parts are streamed, in order, into a [`Sink`], which
//! is normally a hasher.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.

use {
    crate::{
        crypto::{DigestOutput, HashProvider, Hasher},
        headers::{sorted_canonical_headers, write_canonical_headers, write_signed_headers, CanonicalHeader, Header},
        query::write_canonical_query,
        sink::{BufferedSink, Sink},
        uri::write_canonical_uri_for_service,
        SignatureError,
    },
    log::{log_enabled, trace, Level},
    qualifier_attr::qualifiers,
};

/// The parts of an HTTP request that are signed.
#[derive(Clone, Copy, Debug)]
pub struct Request<'a, H> {
    /// The HTTP method, e.g. `GET`.
    pub method: &'a str,

    /// The URI path, not yet canonicalized.
    pub uri_path: &'a str,

    /// The query string, with or without its leading `?`.
    pub query: &'a str,

    /// The request headers, in any order.
    pub headers: &'a [H],

    /// Hex-encoded hash of the payload, or [`UNSIGNED_PAYLOAD`][crate::UNSIGNED_PAYLOAD] /
    /// [`STREAMING_PAYLOAD`][crate::STREAMING_PAYLOAD].
    pub payload_hash: &'a str,
}

impl<'a, H: Header> Request<'a, H> {
    /// Create a new request view.
    pub fn new(method: &'a str, uri_path: &'a str, query: &'a str, headers: &'a [H], payload_hash: &'a str) -> Self {
        Self {
            method,
            uri_path,
            query,
            headers,
            payload_hash,
        }
    }
}

/// A request whose headers have already been trimmed and sorted, ready to be written out canonically.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct CanonicalParts<'a> {
    method: &'a str,
    uri_path: &'a str,
    query: &'a str,
    headers: &'a [CanonicalHeader<'a>],
    payload_hash: &'a str,
}

impl<'a> CanonicalParts<'a> {
    /// Take everything but the headers from `request`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn from_request<H>(request: &Request<'a, H>, headers: &'a [CanonicalHeader<'a>]) -> Self {
        Self {
            method: request.method,
            uri_path: request.uri_path,
            query: request.query,
            headers,
            payload_hash: request.payload_hash,
        }
    }

    /// Replace the query string.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn with_query(self, query: &'a str) -> Self {
        Self {
            query,
            ..self
        }
    }

    /// Write the canonical request:
    ///
    /// ```text
    /// method
    /// canonical URI
    /// canonical query string
    /// canonical headers (one `name:value` line each)
    ///
    /// signed headers
    /// payload hash
    /// ```
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn write<S: Sink + ?Sized>(&self, service: &str, out: &mut S) -> Result<(), SignatureError> {
        out.write_str(self.method);
        out.write_byte(b'\n');
        write_canonical_uri_for_service(service, self.uri_path, out);
        out.write_byte(b'\n');
        write_canonical_query(self.query, out)?;
        out.write_byte(b'\n');
        write_canonical_headers(self.headers, out);
        out.write_byte(b'\n');
        write_signed_headers(self.headers, out);
        out.write_byte(b'\n');
        out.write_str(self.payload_hash);
        Ok(())
    }

    /// Hash the canonical request with the named algorithm.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn hash<P: HashProvider>(
        &self,
        provider: &P,
        algorithm: &str,
        service: &str,
    ) -> Result<DigestOutput, SignatureError> {
        if log_enabled!(Level::Trace) {
            let mut text = Vec::new();
            self.write(service, &mut text)?;
            trace!("Canonical request:\n{}", String::from_utf8_lossy(&text));
        }

        let mut hasher = BufferedSink::<_, 256>::new(provider.digest(algorithm)?);
        self.write(service, &mut hasher)?;
        Ok(hasher.finish().finish())
    }
}

/// Stream the canonical request for `request` into `out`. Every header in `request` is included.
pub fn write_canonical_request<H: Header, S: Sink + ?Sized>(
    service: &str,
    request: &Request<H>,
    out: &mut S,
) -> Result<(), SignatureError> {
    let headers = sorted_canonical_headers(request.headers);
    CanonicalParts::from_request(request, &headers).write(service, out)
}

/// Return the canonical request for `request` as text. Useful for comparing against a server's error response
/// when a signature does not match.
///
/// Header values that are not valid UTF-8 are shown with U+FFFD in their place, so the text may not hash to what
/// was signed. Use [`write_canonical_request`] for the exact bytes.
pub fn canonical_request<H: Header>(service: &str, request: &Request<H>) -> Result<String, SignatureError> {
    let mut out = Vec::new();
    write_canonical_request(service, request, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use {
        super::{canonical_request, write_canonical_request, CanonicalParts, Request},
        crate::{
            crypto::{sha256_hex, Sha2HashProvider},
            headers::sorted_canonical_headers,
            SignatureError, SHA256_EMPTY, UNSIGNED_PAYLOAD,
        },
    };

    const DUPLICATE_HEADERS: [(&str, &str); 5] = [
        ("Host", "example.amazonaws.com"),
        ("My-Header1", "value2"),
        ("My-Header1", "value2"),
        ("My-Header1", "value1"),
        ("X-Amz-Date", "20150830T123600Z"),
    ];

    #[test_log::test]
    fn header_key_duplicate() {
        let request = Request::new("GET", "/", "", &DUPLICATE_HEADERS, SHA256_EMPTY);
        assert_eq!(
            canonical_request("service", &request).unwrap(),
            "GET\n/\n\nhost:example.amazonaws.com\nmy-header1:value2,value2,value1\nx-amz-date:20150830T123600Z\n\n\
             host;my-header1;x-amz-date\ne3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test_log::test]
    fn s3_path_and_query() {
        let headers = [("Host", "examplebucket.s3.amazonaws.com")];
        let request = Request::new("GET", "/my photo+1.jpg", "b=2&a=1", &headers, UNSIGNED_PAYLOAD);
        assert_eq!(
            canonical_request("s3", &request).unwrap(),
            "GET\n/my%20photo%201.jpg\na=1&b=2\nhost:examplebucket.s3.amazonaws.com\n\nhost\nUNSIGNED-PAYLOAD"
        );
    }

    #[test_log::test]
    fn hash_matches_text() {
        let request = Request::new("POST", "/a/./b/../c", "x=%20", &DUPLICATE_HEADERS, SHA256_EMPTY);
        let text = canonical_request("iam", &request).unwrap();
        let headers = sorted_canonical_headers(request.headers);
        let parts = CanonicalParts::from_request(&request, &headers);
        let digest = parts.hash(&Sha2HashProvider, "SHA256", "iam").unwrap();
        assert_eq!(digest.to_hex(), sha256_hex(text.as_bytes()));
    }

    #[test_log::test]
    fn obs_text_header_value() {
        let headers: [(&str, &[u8]); 2] = [("Host", &b"example.amazonaws.com"[..]), ("X-Latin1", &b"caf\xe9 \xff"[..])];
        let request = Request::new("GET", "/", "", &headers, SHA256_EMPTY);

        let mut exact: Vec<u8> = Vec::new();
        write_canonical_request("service", &request, &mut exact).unwrap();
        let line = b"x-latin1:caf\xe9 \xff\n";
        assert!(exact.windows(line.len()).any(|w| w == line));

        let sorted = sorted_canonical_headers(request.headers);
        let digest = CanonicalParts::from_request(&request, &sorted).hash(&Sha2HashProvider, "SHA256", "service").unwrap();
        assert_eq!(digest.to_hex(), sha256_hex(&exact));

        let text = canonical_request("service", &request).unwrap();
        assert!(text.contains("x-latin1:caf\u{fffd} \u{fffd}"), "{}", text);
        assert_ne!(sha256_hex(text.as_bytes()), digest.to_hex());
    }

    #[test_log::test]
    fn bad_query() {
        let request = Request::new("GET", "/", "a=%G0", &DUPLICATE_HEADERS, SHA256_EMPTY);
        assert_eq!(canonical_request("service", &request), Err(SignatureError::InvalidEscape(b'G')));
    }
}
