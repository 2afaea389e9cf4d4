//! Header canonicalization.
//!
//! Headers are trimmed and stably sorted by case-insensitive name. Same-named headers are merged into one
//! line with their folded values comma-separated in sorted order. The canonical header block and the signed
//! header list are both written from the same sorted sequence.

use {
    crate::sink::{LowerCaseSink, Sink},
    http::{HeaderName, HeaderValue},
    qualifier_attr::qualifiers,
    std::cmp::Ordering,
};

/// A header name and value pair supplied by the caller. Names may be in any case and both parts may carry
/// surrounding whitespace.
pub trait Header {
    /// The header name.
    fn name(&self) -> &str;

    /// The raw header value.
    fn value(&self) -> &[u8];
}

impl Header for (&str, &str) {
    fn name(&self) -> &str {
        self.0
    }

    fn value(&self) -> &[u8] {
        self.1.as_bytes()
    }
}

impl Header for (&str, &[u8]) {
    fn name(&self) -> &str {
        self.0
    }

    fn value(&self) -> &[u8] {
        self.1
    }
}

impl Header for (String, String) {
    fn name(&self) -> &str {
        &self.0
    }

    fn value(&self) -> &[u8] {
        self.1.as_bytes()
    }
}

impl Header for (&HeaderName, &HeaderValue) {
    fn name(&self) -> &str {
        self.0.as_str()
    }

    fn value(&self) -> &[u8] {
        self.1.as_bytes()
    }
}

impl Header for (HeaderName, HeaderValue) {
    fn name(&self) -> &str {
        self.0.as_str()
    }

    fn value(&self) -> &[u8] {
        self.1.as_bytes()
    }
}

/// A header with its name trimmed. The name is lower-cased and the value folded when written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct CanonicalHeader<'a> {
    name: &'a str,
    value: &'a [u8],
}

/// Whitespace as far as header canonicalization is concerned. Unlike [`u8::is_ascii_whitespace`], this
/// includes vertical tab.
#[inline(always)]
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn trim(value: &[u8]) -> &[u8] {
    let start = value.iter().position(|&c| !is_space(c)).unwrap_or(value.len());
    let end = value.iter().rposition(|&c| !is_space(c)).map_or(start, |i| i + 1);
    &value[start..end]
}

fn trim_name(name: &str) -> &str {
    name.trim_matches(|c: char| c.is_ascii() && is_space(c as u8))
}

/// Compare two header names ignoring ASCII case.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    let a = a.bytes().map(|c| c.to_ascii_lowercase());
    let b = b.bytes().map(|c| c.to_ascii_lowercase());
    a.cmp(b)
}

/// Write a header value with surrounding whitespace removed and each internal run of whitespace replaced by a
/// single space.
pub fn fold_header_value<S: Sink + ?Sized>(value: &[u8], out: &mut S) {
    let value = trim(value);
    let mut literal_start = 0;
    let mut in_space = false;

    for (i, &c) in value.iter().enumerate() {
        if is_space(c) {
            if !in_space {
                out.write(&value[literal_start..i]);
                out.write_byte(b' ');
                in_space = true;
            }
        } else if in_space {
            literal_start = i;
            in_space = false;
        }
    }

    out.write(&value[literal_start..]);
}

/// Return a folded copy of a header value. See [`fold_header_value`].
pub fn folded_header_value(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    fold_header_value(value, &mut out);
    out
}

/// Trim header names and stably sort the headers by case-insensitive name.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn sorted_canonical_headers<H: Header>(headers: &[H]) -> Vec<CanonicalHeader<'_>> {
    let mut result: Vec<CanonicalHeader> = headers
        .iter()
        .map(|h| CanonicalHeader {
            name: trim_name(h.name()),
            value: h.value(),
        })
        .collect();

    // sort_by is stable: same-named headers keep the caller's relative order.
    result.sort_by(|a, b| cmp_ignore_ascii_case(a.name, b.name));
    result
}

/// Keep only the headers named in a `;`-separated signed header list.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn filter_signed_headers<'a>(mut headers: Vec<CanonicalHeader<'a>>, signed_headers: &str) -> Vec<CanonicalHeader<'a>> {
    headers.retain(|h| signed_headers.split(';').any(|name| name.eq_ignore_ascii_case(h.name)));
    headers
}

/// Group sorted headers by case-insensitive name.
fn groups<'h, 'a>(headers: &'h [CanonicalHeader<'a>]) -> impl Iterator<Item = &'h [CanonicalHeader<'a>]> {
    headers.chunk_by(|a, b| a.name.eq_ignore_ascii_case(b.name))
}

/// Write the canonical header block: `name:value1,value2\n` for each distinct name.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn write_canonical_headers<S: Sink + ?Sized>(headers: &[CanonicalHeader], out: &mut S) {
    for group in groups(headers) {
        LowerCaseSink::new(&mut *out).write_str(group[0].name);
        out.write_byte(b':');
        for (i, header) in group.iter().enumerate() {
            if i > 0 {
                out.write_byte(b',');
            }
            fold_header_value(header.value, out);
        }
        out.write_byte(b'\n');
    }
}

/// Write the signed header list: the distinct lower-cased names joined by `;`.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn write_signed_headers<S: Sink + ?Sized>(headers: &[CanonicalHeader], out: &mut S) {
    for (i, group) in groups(headers).enumerate() {
        if i > 0 {
            out.write_byte(b';');
        }
        LowerCaseSink::new(&mut *out).write_str(group[0].name);
    }
}

/// Return the canonical header block and signed header list for a set of headers.
///
/// Header values that are not valid UTF-8 are shown with U+FFFD in their place in the returned block.
pub fn canonical_headers<H: Header>(headers: &[H]) -> (String, String) {
    let sorted = sorted_canonical_headers(headers);
    let mut block = Vec::new();
    let mut signed = Vec::new();
    write_canonical_headers(&sorted, &mut block);
    write_signed_headers(&sorted, &mut signed);
    (String::from_utf8_lossy(&block).into_owned(), String::from_utf8_lossy(&signed).into_owned())
}
