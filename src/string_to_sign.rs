//! Credential scope, string to sign, and the final signature.

use {
    crate::{
        chronoutil::date_part,
        constants::{AWS4_HMAC_PREFIX, AWS4_REQUEST},
        crypto::{HashProvider, Hasher},
        signing_key::SigningKey,
        sink::{BufferedSink, Sink},
        SignatureError,
    },
    log::trace,
    qualifier_attr::qualifiers,
};

/// Write `date/region/service/aws4_request`.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn write_scope<S: Sink + ?Sized>(date: &str, region: &str, service: &str, out: &mut S) {
    out.write_str(date);
    out.write_byte(b'/');
    out.write_str(region);
    out.write_byte(b'/');
    out.write_str(service);
    out.write_byte(b'/');
    out.write_str(AWS4_REQUEST);
}

/// Write the string to sign:
///
/// ```text
/// AWS4-HMAC-<algorithm>
/// <timestamp>
/// <date>/<region>/<service>/aws4_request
/// <hex canonical request hash>
/// ```
///
/// The date is the first eight characters of the timestamp.
pub fn write_string_to_sign<S: Sink + ?Sized>(
    algorithm: &str,
    timestamp: &str,
    region: &str,
    service: &str,
    canonical_request_hash: &str,
    out: &mut S,
) {
    out.write_str(AWS4_HMAC_PREFIX);
    out.write_str(algorithm);
    out.write_byte(b'\n');
    out.write_str(timestamp);
    out.write_byte(b'\n');
    write_scope(date_part(timestamp), region, service, out);
    out.write_byte(b'\n');
    out.write_str(canonical_request_hash);
}

/// Return the string to sign. See [`write_string_to_sign`].
pub fn string_to_sign(
    algorithm: &str,
    timestamp: &str,
    region: &str,
    service: &str,
    canonical_request_hash: &str,
) -> String {
    let mut out = Vec::with_capacity(64 + region.len() + service.len() + canonical_request_hash.len());
    write_string_to_sign(algorithm, timestamp, region, service, canonical_request_hash, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// HMAC the string to sign with the signing key, returning the lowercase hex signature.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn compute_signature<P: HashProvider>(
    provider: &P,
    algorithm: &str,
    signing_key: &SigningKey,
    timestamp: &str,
    region: &str,
    service: &str,
    canonical_request_hash: &str,
) -> Result<String, SignatureError> {
    trace!(
        "String to sign:\n{}",
        string_to_sign(algorithm, timestamp, region, service, canonical_request_hash)
    );

    let mut hasher = BufferedSink::<_, 256>::new(provider.hmac(algorithm, signing_key.as_bytes())?);
    write_string_to_sign(algorithm, timestamp, region, service, canonical_request_hash, &mut hasher);
    let signature = hasher.finish().finish().to_hex();
    trace!("Signature: {}", signature);
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use {
        super::{compute_signature, string_to_sign, write_scope},
        crate::{crypto::Sha2HashProvider, signing_key::SigningKey},
    };

    #[test_log::test]
    fn scope() {
        let mut out = Vec::new();
        write_scope("20150830", "us-east-1", "iam", &mut out);
        assert_eq!(out, b"20150830/us-east-1/iam/aws4_request");
    }

    #[test_log::test]
    fn string_to_sign_layout() {
        assert_eq!(
            string_to_sign("SHA256", "20130524T000000Z", "us-east-1", "s3", "abcdefg"),
            "AWS4-HMAC-SHA256\n20130524T000000Z\n20130524/us-east-1/s3/aws4_request\nabcdefg"
        );
        assert_eq!(
            string_to_sign("SHA256", "", "us-east-1", "s3", "abcdefg"),
            "AWS4-HMAC-SHA256\n\n/us-east-1/s3/aws4_request\nabcdefg"
        );
    }

    #[test_log::test]
    fn aws_documentation_signature() {
        // https://docs.aws.amazon.com/general/latest/gr/sigv4-calculate-signature.html
        let p = Sha2HashProvider;
        let key = SigningKey::derive(
            &p,
            "SHA256",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20150830",
            "us-east-1",
            "iam",
        )
        .unwrap();
        let signature = compute_signature(
            &p,
            "SHA256",
            &key,
            "20150830T123600Z",
            "us-east-1",
            "iam",
            "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59",
        )
        .unwrap();
        assert_eq!(signature, "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7");
    }
}
