//! Query string canonicalization.
//!
//! Parameters are percent-decoded and re-encoded with the SigV4 rules, then sorted by their decoded bytes
//! (name first, then value) so that equivalent encodings of the same parameter sort together.

use {
    crate::{
        percent::{decode_all, encode, encode_twice, needs_encoding, PercentDecodeIter},
        sink::Sink,
        SignatureError,
    },
    qualifier_attr::qualifiers,
    std::cmp::Ordering,
};

/// A single `name=value` pair from a query string, as written (not decoded).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct QueryParameter<'a> {
    name: &'a [u8],
    value: Option<&'a [u8]>,
}

impl<'a> QueryParameter<'a> {
    /// Split a parameter on its first `=`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn parse(param: &'a [u8]) -> Self {
        match param.iter().position(|&c| c == b'=') {
            Some(eq) => Self {
                name: &param[..eq],
                value: Some(&param[eq + 1..]),
            },
            None => Self {
                name: param,
                value: None,
            },
        }
    }

    /// Order two parameters by their decoded names, then their decoded values.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn cmp_decoded(&self, other: &Self) -> Ordering {
        decoded(self.name)
            .cmp(decoded(other.name))
            .then_with(|| decoded(self.value.unwrap_or_default()).cmp(decoded(other.value.unwrap_or_default())))
    }
}

/// Decoded bytes of a query component, with `+` compared as a space.
fn decoded(raw: &[u8]) -> impl Iterator<Item = u8> + '_ {
    PercentDecodeIter::new(raw).map(plus_to_space)
}

#[inline(always)]
fn plus_to_space(c: u8) -> u8 {
    if c == b'+' {
        b' '
    } else {
        c
    }
}

/// Percent-encodes bytes on their way to the wrapped sink, with `+` encoded as a space. Inside a query value,
/// `=` is double-encoded.
pub(crate) struct QueryEncoder<'o, S: Sink + ?Sized> {
    out: &'o mut S,
    in_value: bool,
}

impl<'o, S: Sink + ?Sized> QueryEncoder<'o, S> {
    pub(crate) fn new(out: &'o mut S, in_value: bool) -> Self {
        Self {
            out,
            in_value,
        }
    }
}

impl<S: Sink + ?Sized> Sink for QueryEncoder<'_, S> {
    fn write(&mut self, bytes: &[u8]) {
        let mut literal_start = 0;
        for (i, &c) in bytes.iter().enumerate() {
            if needs_encoding(c) {
                self.out.write(&bytes[literal_start..i]);
                let c = plus_to_space(c);
                if self.in_value && c == b'=' {
                    encode_twice(c, self.out);
                } else {
                    encode(c, self.out);
                }
                literal_start = i + 1;
            }
        }
        self.out.write(&bytes[literal_start..]);
    }
}

/// Decode `raw` and write it back out with canonical encoding.
fn write_component<S: Sink + ?Sized>(raw: &[u8], in_value: bool, out: &mut S) -> Result<(), SignatureError> {
    decode_all(raw, &mut QueryEncoder::new(out, in_value))
}

/// Split a query string into its parameters. A leading `?` is ignored, and empty parameters (`a=1&&b=2`) are
/// skipped.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn parse_query_parameters(query: &str) -> Vec<QueryParameter<'_>> {
    let query = query.strip_prefix('?').unwrap_or(query).as_bytes();
    if query.is_empty() {
        return Vec::new();
    }

    let mut params = Vec::with_capacity(query.iter().filter(|&&c| c == b'&').count() + 1);
    params.extend(query.split(|&c| c == b'&').filter(|p| !p.is_empty()).map(QueryParameter::parse));
    params
}

/// Write the canonical query string for `query`.
///
/// Fails with [`SignatureError::InvalidEscape`] or [`SignatureError::TruncatedEscape`] if a parameter contains
/// a malformed `%` escape.
pub fn write_canonical_query<S: Sink + ?Sized>(query: &str, out: &mut S) -> Result<(), SignatureError> {
    let mut params = parse_query_parameters(query);
    params.sort_unstable_by(QueryParameter::cmp_decoded);

    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            out.write_byte(b'&');
        }
        write_component(param.name, false, out)?;
        out.write_byte(b'=');
        if let Some(value) = param.value {
            write_component(value, true, out)?;
        }
    }

    Ok(())
}

/// Return the canonical query string for `query`.
pub fn canonical_query_string(query: &str) -> Result<String, SignatureError> {
    let mut out = Vec::with_capacity(query.len() + query.len() / 2);
    write_canonical_query(query, &mut out)?;
    // Only unreserved ASCII and escapes are written.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use {
        super::{canonical_query_string, parse_query_parameters, QueryParameter},
        crate::SignatureError,
        std::cmp::Ordering,
    };

    #[test_log::test]
    fn double_encodes_equals_in_value() {
        assert_eq!(canonical_query_string("name=value=value!").unwrap(), "name=value%253Dvalue%21");
        assert_eq!(canonical_query_string("name=a%3Db").unwrap(), "name=a%253Db");
        // In a name the first `=` splits, so no name can contain one unless it is escaped.
        assert_eq!(canonical_query_string("na%3Dme=x").unwrap(), "na%3Dme=x");
    }

    #[test_log::test]
    fn sorting() {
        assert_eq!(canonical_query_string("name=value2&name=value1").unwrap(), "name=value1&name=value2");
        assert_eq!(canonical_query_string("b=1&a=2&c=0").unwrap(), "a=2&b=1&c=0");
        assert_eq!(canonical_query_string("Param2=value2&Param1=value1").unwrap(), "Param1=value1&Param2=value2");
        // Upper case sorts before lower case.
        assert_eq!(canonical_query_string("a=1&B=2").unwrap(), "B=2&a=1");
    }

    #[test_log::test]
    fn sorts_by_decoded_bytes() {
        assert_eq!(
            canonical_query_string("na*me=value1&na%2Ame=value2").unwrap(),
            "na%2Ame=value1&na%2Ame=value2"
        );
        assert_eq!(
            canonical_query_string("na%2Ame=value2&na*me=value1").unwrap(),
            "na%2Ame=value1&na%2Ame=value2"
        );
    }

    #[test_log::test]
    fn plus_is_space() {
        assert_eq!(canonical_query_string("na me=value2&na+me=value1").unwrap(), "na%20me=value1&na%20me=value2");
        assert_eq!(canonical_query_string("q=a+b").unwrap(), "q=a%20b");
    }

    #[test_log::test]
    fn empty_and_missing() {
        assert_eq!(canonical_query_string("").unwrap(), "");
        assert_eq!(canonical_query_string("?").unwrap(), "");
        assert_eq!(canonical_query_string("Param1").unwrap(), "Param1=");
        assert_eq!(canonical_query_string("Param1=").unwrap(), "Param1=");
        assert_eq!(canonical_query_string("a=1&&b=2&").unwrap(), "a=1&b=2");
        assert_eq!(canonical_query_string("?b=2&a").unwrap(), "a=&b=2");
    }

    #[test_log::test]
    fn encoding() {
        assert_eq!(canonical_query_string("\u{1234}=bar").unwrap(), "%E1%88%B4=bar");
        assert_eq!(canonical_query_string("%E1%88%B4=bar").unwrap(), "%E1%88%B4=bar");
        assert_eq!(canonical_query_string("%e1%88%b4=bar").unwrap(), "%E1%88%B4=bar");
        let unreserved = "-._~0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
        let q = format!("{}={}", unreserved, unreserved);
        assert_eq!(canonical_query_string(&q).unwrap(), q);
        assert_eq!(canonical_query_string("a=%7E%2D").unwrap(), "a=~-");
    }

    #[test_log::test]
    fn malformed_escapes() {
        assert_eq!(canonical_query_string("a=%zz"), Err(SignatureError::InvalidEscape(b'z')));
        // The name ends at the first `=`, so its escape is cut short.
        assert_eq!(canonical_query_string("a%4=1"), Err(SignatureError::TruncatedEscape));
        assert_eq!(canonical_query_string("a=%4"), Err(SignatureError::TruncatedEscape));
    }

    #[test_log::test]
    fn reorder_invariant() {
        let params = ["x=1", "a=%20", "a=+b", "m", "Z=z", "a=!"];
        let expected = canonical_query_string(&params.join("&")).unwrap();
        let mut reversed = params;
        reversed.reverse();
        assert_eq!(canonical_query_string(&reversed.join("&")).unwrap(), expected);
        let rotated: Vec<&str> = params.iter().cycle().skip(3).take(params.len()).copied().collect();
        assert_eq!(canonical_query_string(&rotated.join("&")).unwrap(), expected);
    }

    #[test_log::test]
    fn parameter_parse() {
        let params = parse_query_parameters("?a=1=2&b");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, b"a");
        assert_eq!(params[0].value, Some(&b"1=2"[..]));
        assert_eq!(params[1].value, None);

        let a = QueryParameter::parse(b"a+b=1");
        let b = QueryParameter::parse(b"a%20b=2");
        assert_eq!(a.cmp_decoded(&b), Ordering::Less);
    }
}
