use {
    crate::{
        constants::{AWS4_KEY_PREFIX, AWS4_REQUEST},
        crypto::{DigestOutput, HashProvider, Hasher},
        sink::Sink,
        SignatureError,
    },
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// The `kSigning` key: the end of the HMAC chain
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
///
/// The key is derived for a single call and never cached. Its `Debug` and `Display` implementations do not
/// reveal the key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigningKey {
    /// The resulting raw signing key.
    key: DigestOutput,
}

impl SigningKey {
    /// Derive the signing key for a secret access key and scope.
    pub fn derive<P: HashProvider>(
        provider: &P,
        algorithm: &str,
        secret_access_key: &str,
        date: &str,
        region: &str,
        service: &str,
    ) -> Result<Self, SignatureError> {
        let mut ksecret = String::with_capacity(AWS4_KEY_PREFIX.len() + secret_access_key.len());
        ksecret.push_str(AWS4_KEY_PREFIX);
        ksecret.push_str(secret_access_key);

        let kdate = hmac(provider, algorithm, ksecret.as_bytes(), date)?;
        let kregion = hmac(provider, algorithm, kdate.as_bytes(), region)?;
        let kservice = hmac(provider, algorithm, kregion.as_bytes(), service)?;
        let key = hmac(provider, algorithm, kservice.as_bytes(), AWS4_REQUEST)?;

        Ok(Self {
            key,
        })
    }

    /// The raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl AsRef<[u8]> for SigningKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

impl Display for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

/// One link of the chain.
fn hmac<P: HashProvider>(provider: &P, algorithm: &str, key: &[u8], data: &str) -> Result<DigestOutput, SignatureError> {
    let mut hasher = provider.hmac(algorithm, key)?;
    hasher.write_str(data);
    Ok(hasher.finish())
}

/// Derive the signing key for a secret access key and scope. See [`SigningKey`].
pub fn derive_signing_key<P: HashProvider>(
    provider: &P,
    algorithm: &str,
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<SigningKey, SignatureError> {
    SigningKey::derive(provider, algorithm, secret_access_key, date, region, service)
}

#[cfg(test)]
mod tests {
    use {
        super::{derive_signing_key, hmac, SigningKey},
        crate::{crypto::Sha2HashProvider, SignatureError},
    };

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test_log::test]
    fn test_signing_key_derived() {
        let p = Sha2HashProvider;
        let key = derive_signing_key(&p, "SHA256", SECRET, "20150830", "us-east-1", "iam").unwrap();
        assert_eq!(hex::encode(key.as_bytes()), "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9");
        assert_eq!(key.as_ref().len(), 32);

        let example = SigningKey::derive(&p, "SHA256", SECRET, "20150830", "us-east-1", "example").unwrap();
        assert_eq!(hex::encode(example), "431cc9ef5876287dbb925d4ba4629f459002ad1d26b7c751601bb204e11718b8");
        assert_ne!(key, example);
        assert_eq!(key, key.clone());
    }

    #[test_log::test]
    fn test_kdate() {
        let kdate = hmac(&Sha2HashProvider, "SHA256", format!("AWS4{}", SECRET).as_bytes(), "20150830").unwrap();
        assert_eq!(kdate.to_hex(), "0138c7a6cbd60aa727b2f653a522567439dfb9f3e72b21f9b25941a42f04a7cd");
    }

    #[test_log::test]
    fn test_redacted() {
        let key = derive_signing_key(&Sha2HashProvider, "SHA256", SECRET, "20150830", "us-east-1", "iam").unwrap();
        assert_eq!(format!("{:?}", key).as_str(), "SigningKey");
        assert_eq!(format!("{}", key).as_str(), "SigningKey");
    }

    #[test_log::test]
    fn test_other_algorithms() {
        let p = Sha2HashProvider;
        let key = derive_signing_key(&p, "SHA512", SECRET, "20150830", "us-east-1", "iam").unwrap();
        assert_eq!(key.as_bytes().len(), 64);
        let key = derive_signing_key(&p, "SHA224", SECRET, "20150830", "us-east-1", "iam").unwrap();
        assert_eq!(key.as_bytes().len(), 28);

        assert!(matches!(
            derive_signing_key(&p, "MD5", SECRET, "20150830", "us-east-1", "iam"),
            Err(SignatureError::HashProvider(_))
        ));
    }
}
