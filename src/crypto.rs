//! Hash and HMAC providers.
//!
//! The signing pipeline never calls a hash implementation directly. It asks a [`HashProvider`] for a
//! [`Hasher`] by algorithm name, streams bytes into it through the [`Sink`] trait, and collects a
//! [`DigestOutput`]. [`Sha2HashProvider`] is the provider backed by the RustCrypto `sha2` and `hmac` crates.

use {
    crate::{
        constants::{ERR_MSG_UNSUPPORTED_HASH_ALGORITHM, MAX_DIGEST_LEN},
        sink::Sink,
        SignatureError,
    },
    hmac::{Hmac, Mac},
    sha2::{Digest, Sha224, Sha256, Sha384, Sha512},
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// The raw output of a digest or HMAC computation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DigestOutput {
    bytes: [u8; MAX_DIGEST_LEN],
    len: usize,
}

impl DigestOutput {
    /// Copy a digest into a new `DigestOutput`. Returns `None` if the digest is longer than [`MAX_DIGEST_LEN`].
    pub fn from_slice(digest: &[u8]) -> Option<Self> {
        if digest.len() > MAX_DIGEST_LEN {
            return None;
        }

        let mut bytes = [0; MAX_DIGEST_LEN];
        bytes[..digest.len()].copy_from_slice(digest);
        Some(Self {
            bytes,
            len: digest.len(),
        })
    }

    /// The digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The digest length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Indicates whether the digest is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl AsRef<[u8]> for DigestOutput {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for DigestOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "DigestOutput({})", self.to_hex())
    }
}

/// A digest or HMAC computation in progress. Bytes are fed in through [`Sink::write`].
pub trait Hasher: Sink {
    /// Consume the hasher and return the final digest.
    fn finish(self) -> DigestOutput;
}

/// Creates [`Hasher`] instances by algorithm name.
///
/// Algorithm names are the suffix of the SigV4 algorithm, e.g. `SHA256` for `AWS4-HMAC-SHA256`.
pub trait HashProvider {
    /// The hasher type this provider creates.
    type Hasher: Hasher;

    /// Start a plain digest computation.
    fn digest(&self, algorithm: &str) -> Result<Self::Hasher, SignatureError>;

    /// Start an HMAC computation keyed with `key`.
    fn hmac(&self, algorithm: &str, key: &[u8]) -> Result<Self::Hasher, SignatureError>;
}

/// SHA-2 variants supported by [`Sha2HashProvider`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Sha2Algorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Sha2Algorithm {
    /// Accepts `SHA256`, `sha256`, `SHA-256` and so on.
    fn from_name(name: &str) -> Result<Self, SignatureError> {
        const NAMES: [(&str, &str, Sha2Algorithm); 4] = [
            ("SHA224", "SHA-224", Sha2Algorithm::Sha224),
            ("SHA256", "SHA-256", Sha2Algorithm::Sha256),
            ("SHA384", "SHA-384", Sha2Algorithm::Sha384),
            ("SHA512", "SHA-512", Sha2Algorithm::Sha512),
        ];

        for (plain, hyphenated, algorithm) in NAMES {
            if name.eq_ignore_ascii_case(plain) || name.eq_ignore_ascii_case(hyphenated) {
                return Ok(algorithm);
            }
        }

        Err(SignatureError::HashProvider(format!("{}{}", ERR_MSG_UNSUPPORTED_HASH_ALGORITHM, name)))
    }
}

/// A [`Hasher`] backed by the RustCrypto SHA-2 implementations.
#[derive(Clone)]
pub enum Sha2Hasher {
    /// SHA-224 digest.
    Sha224(Sha224),
    /// SHA-256 digest.
    Sha256(Sha256),
    /// SHA-384 digest.
    Sha384(Sha384),
    /// SHA-512 digest.
    Sha512(Sha512),
    /// HMAC-SHA-224.
    HmacSha224(Hmac<Sha224>),
    /// HMAC-SHA-256.
    HmacSha256(Hmac<Sha256>),
    /// HMAC-SHA-384.
    HmacSha384(Hmac<Sha384>),
    /// HMAC-SHA-512.
    HmacSha512(Hmac<Sha512>),
}

impl Debug for Sha2Hasher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Sha224(_) => "Sha2Hasher::Sha224",
            Self::Sha256(_) => "Sha2Hasher::Sha256",
            Self::Sha384(_) => "Sha2Hasher::Sha384",
            Self::Sha512(_) => "Sha2Hasher::Sha512",
            Self::HmacSha224(_) => "Sha2Hasher::HmacSha224",
            Self::HmacSha256(_) => "Sha2Hasher::HmacSha256",
            Self::HmacSha384(_) => "Sha2Hasher::HmacSha384",
            Self::HmacSha512(_) => "Sha2Hasher::HmacSha512",
        })
    }
}

impl Sink for Sha2Hasher {
    fn write(&mut self, bytes: &[u8]) {
        match self {
            Self::Sha224(h) => Digest::update(h, bytes),
            Self::Sha256(h) => Digest::update(h, bytes),
            Self::Sha384(h) => Digest::update(h, bytes),
            Self::Sha512(h) => Digest::update(h, bytes),
            Self::HmacSha224(h) => Mac::update(h, bytes),
            Self::HmacSha256(h) => Mac::update(h, bytes),
            Self::HmacSha384(h) => Mac::update(h, bytes),
            Self::HmacSha512(h) => Mac::update(h, bytes),
        }
    }
}

/// Copy a fixed-size RustCrypto output into a [`DigestOutput`]. SHA-2 outputs never exceed [`MAX_DIGEST_LEN`].
fn to_output(digest: &[u8]) -> DigestOutput {
    let mut bytes = [0; MAX_DIGEST_LEN];
    bytes[..digest.len()].copy_from_slice(digest);
    DigestOutput {
        bytes,
        len: digest.len(),
    }
}

impl Hasher for Sha2Hasher {
    fn finish(self) -> DigestOutput {
        match self {
            Self::Sha224(h) => to_output(&h.finalize()),
            Self::Sha256(h) => to_output(&h.finalize()),
            Self::Sha384(h) => to_output(&h.finalize()),
            Self::Sha512(h) => to_output(&h.finalize()),
            Self::HmacSha224(h) => to_output(&h.finalize().into_bytes()),
            Self::HmacSha256(h) => to_output(&h.finalize().into_bytes()),
            Self::HmacSha384(h) => to_output(&h.finalize().into_bytes()),
            Self::HmacSha512(h) => to_output(&h.finalize().into_bytes()),
        }
    }
}

/// The default [`HashProvider`], supporting SHA-224, SHA-256, SHA-384, and SHA-512.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha2HashProvider;

impl HashProvider for Sha2HashProvider {
    type Hasher = Sha2Hasher;

    fn digest(&self, algorithm: &str) -> Result<Sha2Hasher, SignatureError> {
        Ok(match Sha2Algorithm::from_name(algorithm)? {
            Sha2Algorithm::Sha224 => Sha2Hasher::Sha224(Sha224::new()),
            Sha2Algorithm::Sha256 => Sha2Hasher::Sha256(Sha256::new()),
            Sha2Algorithm::Sha384 => Sha2Hasher::Sha384(Sha384::new()),
            Sha2Algorithm::Sha512 => Sha2Hasher::Sha512(Sha512::new()),
        })
    }

    fn hmac(&self, algorithm: &str, key: &[u8]) -> Result<Sha2Hasher, SignatureError> {
        let invalid_key = |e: hmac::digest::InvalidLength| SignatureError::HashProvider(e.to_string());

        Ok(match Sha2Algorithm::from_name(algorithm)? {
            Sha2Algorithm::Sha224 => Sha2Hasher::HmacSha224(Hmac::new_from_slice(key).map_err(invalid_key)?),
            Sha2Algorithm::Sha256 => Sha2Hasher::HmacSha256(Hmac::new_from_slice(key).map_err(invalid_key)?),
            Sha2Algorithm::Sha384 => Sha2Hasher::HmacSha384(Hmac::new_from_slice(key).map_err(invalid_key)?),
            Sha2Algorithm::Sha512 => Sha2Hasher::HmacSha512(Hmac::new_from_slice(key).map_err(invalid_key)?),
        })
    }
}

/// Hash `value` with the named algorithm and return the lowercase hex digest. Suitable for computing the
/// payload hash of a request body.
pub fn hex_digest<P: HashProvider>(provider: &P, algorithm: &str, value: &[u8]) -> Result<String, SignatureError> {
    let mut hasher = provider.digest(algorithm)?;
    hasher.write(value);
    Ok(hasher.finish().to_hex())
}

/// Hash `value` with SHA-256 and return the lowercase hex digest.
pub fn sha256_hex(value: &[u8]) -> String {
    hex::encode(Sha256::digest(value))
}
