//! Common constants used throughout the crate.
//!
//! Protocol literals and error messages live here so every module spells them the same way.
//!
//! Tests that are testing the content of an error message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically.

/// Prefix of every SigV4 algorithm name; the hash algorithm name follows it.
pub(crate) const AWS4_HMAC_PREFIX: &str = "AWS4-HMAC-";

/// Prefix prepended to the secret access key to form the first HMAC key.
pub(crate) const AWS4_KEY_PREFIX: &str = "AWS4";

/// String included at the end of the AWS SigV4 credential scope
pub(crate) const AWS4_REQUEST: &str = "aws4_request";

/// Authorization header field for the credential scope.
pub(crate) const CREDENTIAL_PREFIX: &str = "Credential=";

/// Hash algorithm used when none is specified.
pub(crate) const DEFAULT_HASH_ALGORITHM: &str = "SHA256";

/// Error message: `"Access key id is empty"`
pub(crate) const ERR_MSG_EMPTY_ACCESS_KEY_ID: &str = "Access key id is empty";

/// Error message: `"Algorithm is empty"`
pub(crate) const ERR_MSG_EMPTY_ALGORITHM: &str = "Algorithm is empty";

/// Error message: `"Date is empty"`
pub(crate) const ERR_MSG_EMPTY_DATE: &str = "Date is empty";

/// Error message: `"Region is empty"`
pub(crate) const ERR_MSG_EMPTY_REGION: &str = "Region is empty";

/// Error message: `"Request terminator is empty"`
pub(crate) const ERR_MSG_EMPTY_REQUEST: &str = "Request terminator is empty";

/// Error message: `"Service is empty"`
pub(crate) const ERR_MSG_EMPTY_SERVICE: &str = "Service is empty";

/// Error message: `"Signature is empty"`
pub(crate) const ERR_MSG_EMPTY_SIGNATURE: &str = "Signature is empty";

/// Error message: `"Illegal hex character in escape % pattern: "`
pub(crate) const ERR_MSG_ILLEGAL_HEX_CHAR: &str = "Illegal hex character in escape % pattern: ";

/// Error message: `"Incomplete trailing escape % sequence"`
pub(crate) const ERR_MSG_INCOMPLETE_TRAILING_ESCAPE: &str = "Incomplete trailing escape % sequence";

/// Error message: `"Insufficient query string capacity; bytes required: "`
pub(crate) const ERR_MSG_INSUFFICIENT_CAPACITY: &str = "Insufficient query string capacity; bytes required: ";

/// Error message: `"Invalid credential scope: "`
pub(crate) const ERR_MSG_INVALID_CREDENTIAL: &str = "Invalid credential scope: ";

/// Error message: `"Missing ',' after credential"`
pub(crate) const ERR_MSG_NO_COMMA_AFTER_CREDENTIAL: &str = "Missing ',' after credential";

/// Error message: `"Missing ',' after signed headers"`
pub(crate) const ERR_MSG_NO_COMMA_AFTER_SIGNED_HEADERS: &str = "Missing ',' after signed headers";

/// Error message: `"Authorization header requires 'Credential' parameter"`
pub(crate) const ERR_MSG_NO_CREDENTIAL: &str = "Authorization header requires 'Credential' parameter";

/// Error message: `"Authorization header requires 'Signature' parameter"`
pub(crate) const ERR_MSG_NO_SIGNATURE: &str = "Authorization header requires 'Signature' parameter";

/// Error message: `"Authorization header requires 'SignedHeaders' parameter"`
pub(crate) const ERR_MSG_NO_SIGNED_HEADERS: &str = "Authorization header requires 'SignedHeaders' parameter";

/// Error message: `"Missing '/' after access key id"`
pub(crate) const ERR_MSG_NO_SLASH_AFTER_ACCESS_KEY_ID: &str = "Missing '/' after access key id";

/// Error message: `"Missing '/' after date"`
pub(crate) const ERR_MSG_NO_SLASH_AFTER_DATE: &str = "Missing '/' after date";

/// Error message: `"Missing '/' after region"`
pub(crate) const ERR_MSG_NO_SLASH_AFTER_REGION: &str = "Missing '/' after region";

/// Error message: `"Missing '/' after service"`
pub(crate) const ERR_MSG_NO_SLASH_AFTER_SERVICE: &str = "Missing '/' after service";

/// Error message: `"Missing whitespace after algorithm"`
pub(crate) const ERR_MSG_NO_SPACE_AFTER_ALGORITHM: &str = "Missing whitespace after algorithm";

/// Error message: `"Unsupported hash algorithm: "`
pub(crate) const ERR_MSG_UNSUPPORTED_HASH_ALGORITHM: &str = "Unsupported hash algorithm: ";

/// Characters separating the fields of an Authorization header.
pub(crate) const HEADER_FIELD_SEPARATORS: &[u8] = b" \t\n";

/// Uppercase hex digits.
pub(crate) const HEX_DIGITS_UPPER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F'];

/// Largest digest or HMAC output supported by any hash algorithm (SHA-512).
pub const MAX_DIGEST_LEN: usize = 64;

/// Service name that selects S3 URI canonicalization.
pub(crate) const S3_SERVICE: &str = "s3";

/// Hex-encoded SHA-256 digest of an empty payload.
pub const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Authorization header field for the signature.
pub(crate) const SIGNATURE_PREFIX: &str = "Signature=";

/// Authorization header field for the signed headers.
pub(crate) const SIGNED_HEADERS_PREFIX: &str = "SignedHeaders=";

/// Payload hash literal for chunked uploads signed per chunk.
pub const STREAMING_PAYLOAD: &str = "STREAMING-AWS4-HMAC-SHA256-PAYLOAD";

/// Payload hash literal for requests whose body is not signed.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Query parameter for the signature algorithm
pub(crate) const X_AMZ_ALGORITHM: &str = "X-Amz-Algorithm";

/// Query parameter for delivering the access key
pub(crate) const X_AMZ_CREDENTIAL: &str = "X-Amz-Credential";

/// Query parameter for delivering the date
pub(crate) const X_AMZ_DATE: &str = "X-Amz-Date";

/// Query parameter for the presigned URL lifetime in seconds
pub(crate) const X_AMZ_EXPIRES: &str = "X-Amz-Expires";

/// Query parameter for delivering the signature
pub(crate) const X_AMZ_SIGNATURE: &str = "X-Amz-Signature";

/// Query parameter specifying the signed headers
pub(crate) const X_AMZ_SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
