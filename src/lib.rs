//! The `aws_sigv4_sign` crate signs, presigns, and verifies HTTP requests with
//! [AWS Signature Version 4](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html).
//!
//! It works on a borrowed view of a request ([`Request`]): the method, the URI path, the query string, the headers,
//! and the hex-encoded hash of the payload. The crate never reads a request body; hashing the payload is up to the
//! caller (or use [`UNSIGNED_PAYLOAD`] where the service allows it).
//!
//! # Workflow
//! 1. Build [`SigningParams`] with the credentials, timestamp, region, and service.
//! 2. Wrap the request parts in a [`Request`].
//! 3. Call [`sign`] for an `Authorization` header value, or [`presign`] for a query string carrying the signature.
//!
//! On the receiving end, [`verify_authorization`] checks an `Authorization` header against the caller's secret key,
//! and [`verify`] checks a bare signature when the scope and signed header list are already known.
//!
//! ## Example
//! ```rust
//! use aws_sigv4_sign::{sign, verify_authorization, Request, SigningParams, SHA256_EMPTY};
//!
//! let params = SigningParams::builder()
//!     .access_key_id("AKIDEXAMPLE")
//!     .secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
//!     .timestamp("20150830T123600Z")
//!     .region("us-east-1")
//!     .service("service")
//!     .build()
//!     .unwrap();
//!
//! let headers = [
//!     ("Host", "example.amazonaws.com"),
//!     ("My-Header1", "value2"),
//!     ("My-Header1", "value2"),
//!     ("My-Header1", "value1"),
//!     ("X-Amz-Date", "20150830T123600Z"),
//! ];
//! let request = Request::new("GET", "/", "", &headers, SHA256_EMPTY);
//!
//! let authorization = sign(&params, &request).unwrap();
//! assert_eq!(
//!     authorization,
//!     "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
//!      SignedHeaders=host;my-header1;x-amz-date, \
//!      Signature=c9d5ea9f3f72853aea855b47ea873832890dbdd183b4468f858259531a5138ea"
//! );
//!
//! let secret = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
//! assert!(verify_authorization(&authorization, secret, "20150830T123600Z", &request).unwrap());
//! ```
//!
//! # Hash algorithms
//! Hashing and HMAC go through the [`HashProvider`] trait. The `*_with` variants of each operation take a provider;
//! the plain variants use [`Sha2HashProvider`], which supports SHA-224, SHA-256, SHA-384, and SHA-512.
//!
//! # Unstable API
//! The building blocks (sinks, percent coding, and the individual canonicalizers) are public only with the
//! `unstable` feature. Items re-exported at the crate root are stable.
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

mod authorization;
mod chronoutil;
mod constants;
mod credential;
mod crypto;
mod error;
mod presign;
mod sign;
mod signature;
mod signing_key;
mod string_to_sign;
mod verify;

#[cfg(any(doc, feature = "unstable"))]
pub mod canonical;
#[cfg(not(any(doc, feature = "unstable")))]
mod canonical;

#[cfg(any(doc, feature = "unstable"))]
pub mod headers;
#[cfg(not(any(doc, feature = "unstable")))]
mod headers;

#[cfg(any(doc, feature = "unstable"))]
pub mod percent;
#[cfg(not(any(doc, feature = "unstable")))]
mod percent;

#[cfg(any(doc, feature = "unstable"))]
pub mod query;
#[cfg(not(any(doc, feature = "unstable")))]
mod query;

#[cfg(any(doc, feature = "unstable"))]
pub mod sink;
#[cfg(not(any(doc, feature = "unstable")))]
mod sink;

#[cfg(any(doc, feature = "unstable"))]
pub mod uri;
#[cfg(not(any(doc, feature = "unstable")))]
mod uri;

pub use crate::{
    authorization::AuthorizationHeader,
    canonical::{canonical_request, write_canonical_request, Request},
    chronoutil::ParseISO8601Compact,
    constants::{MAX_DIGEST_LEN, SHA256_EMPTY, STREAMING_PAYLOAD, UNSIGNED_PAYLOAD},
    credential::CredentialScope,
    crypto::{hex_digest, sha256_hex, DigestOutput, HashProvider, Hasher, Sha2HashProvider, Sha2Hasher},
    error::{
        AuthorizationHeaderErrorKind, AuthorizationHeaderParseError, CredentialScopeErrorKind,
        CredentialScopeParseError, SignatureError,
    },
    headers::{canonical_headers, fold_header_value, folded_header_value, Header},
    presign::{presign, presign_to_string, presign_with},
    query::canonical_query_string,
    sign::{sign, sign_to, sign_with},
    signature::{SigningParams, SigningParamsBuilder, SigningParamsBuilderError},
    signing_key::{derive_signing_key, SigningKey},
    sink::Sink,
    string_to_sign::{string_to_sign, write_string_to_sign},
    uri::{write_canonical_uri, write_s3_canonical_uri},
    verify::{verify, verify_authorization, verify_authorization_with, verify_with},
};
