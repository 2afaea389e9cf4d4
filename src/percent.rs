//! Percent-encoding and decoding primitives.
//!
//! SigV4 encodes every byte outside the RFC 3986 unreserved set (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) as
//! `%XX` with uppercase hex digits. Some contexts require the escape itself to be escaped again (`%25XX`).

use {
    crate::{constants::HEX_DIGITS_UPPER, sink::Sink, SignatureError},
    qualifier_attr::qualifiers,
};

/// Marker for bytes that are not hex digits in [`HEX_DECODE`].
const NOT_HEX: u8 = 0xff;

/// Maps each byte to its hex nibble value, or [`NOT_HEX`].
static HEX_DECODE: [u8; 256] = {
    let mut table = [NOT_HEX; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'A' as usize + i] = 10 + i as u8;
        table[b'a' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

/// Indicates whether each byte must be percent-encoded.
static NEEDS_ENCODING: [bool; 256] = {
    let mut table = [true; 256];
    let mut c = 0;
    while c < 256 {
        let b = c as u8;
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'.' || b == b'_' || b == b'~' {
            table[c] = false;
        }
        c += 1;
    }
    table
};

/// Indicates whether the specified byte is outside the RFC 3986 unreserved set and must be percent-encoded.
#[inline(always)]
pub fn needs_encoding(c: u8) -> bool {
    NEEDS_ENCODING[c as usize]
}

/// Writes `%XX` for the byte.
#[inline]
pub fn encode<S: Sink + ?Sized>(c: u8, out: &mut S) {
    out.write(&[b'%', HEX_DIGITS_UPPER[(c >> 4) as usize], HEX_DIGITS_UPPER[(c & 0xf) as usize]]);
}

/// Writes `%25XX` for the byte: its escape, escaped again.
#[inline]
pub fn encode_twice<S: Sink + ?Sized>(c: u8, out: &mut S) {
    out.write(&[b'%', b'2', b'5', HEX_DIGITS_UPPER[(c >> 4) as usize], HEX_DIGITS_UPPER[(c & 0xf) as usize]]);
}

/// Returns the value of a hex digit, or `None` if the byte is not one.
#[inline(always)]
pub fn decode_nibble(c: u8) -> Option<u8> {
    match HEX_DECODE[c as usize] {
        NOT_HEX => None,
        n => Some(n),
    }
}

/// Where a [`PercentDecoder`] is within an escape sequence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum DecodeState {
    #[default]
    Normal,
    SeenPercent,
    SeenFirstHexDigit(u8),
}

/// Streaming percent-decoder.
///
/// Input may arrive in arbitrary chunks; an escape sequence split across chunks is carried over. Call
/// [`finish`][PercentDecoder::finish] at the end of input to detect a truncated escape.
#[derive(Clone, Copy, Debug, Default)]
pub struct PercentDecoder {
    state: DecodeState,
}

impl PercentDecoder {
    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `input`, writing decoded bytes to `out`.
    pub fn decode<S: Sink + ?Sized>(&mut self, input: &[u8], out: &mut S) -> Result<(), SignatureError> {
        let mut literal_start = 0;

        for (i, &c) in input.iter().enumerate() {
            match self.state {
                DecodeState::Normal => {
                    if c == b'%' {
                        out.write(&input[literal_start..i]);
                        self.state = DecodeState::SeenPercent;
                    }
                }
                DecodeState::SeenPercent => {
                    let hi = decode_nibble(c).ok_or(SignatureError::InvalidEscape(c))?;
                    self.state = DecodeState::SeenFirstHexDigit(hi);
                }
                DecodeState::SeenFirstHexDigit(hi) => {
                    let lo = decode_nibble(c).ok_or(SignatureError::InvalidEscape(c))?;
                    out.write_byte((hi << 4) | lo);
                    self.state = DecodeState::Normal;
                    literal_start = i + 1;
                }
            }
        }

        if self.state == DecodeState::Normal {
            out.write(&input[literal_start..]);
        }

        Ok(())
    }

    /// Signal the end of input. Fails if the input stopped inside an escape sequence.
    pub fn finish(self) -> Result<(), SignatureError> {
        match self.state {
            DecodeState::Normal => Ok(()),
            _ => Err(SignatureError::TruncatedEscape),
        }
    }
}

/// Decode an entire input in one call.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn decode_all<S: Sink + ?Sized>(input: &[u8], out: &mut S) -> Result<(), SignatureError> {
    let mut decoder = PercentDecoder::new();
    decoder.decode(input, out)?;
    decoder.finish()
}

/// Lazily yields the percent-decoded bytes of a slice.
///
/// Only used to order values, so malformed escapes are not errors here: a `%` that does not begin a valid
/// escape is yielded as itself. The encoding pass reports the error.
#[derive(Clone, Debug)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct PercentDecodeIter<'a> {
    input: &'a [u8],
}

impl<'a> PercentDecodeIter<'a> {
    /// Start decoding at the beginning of `input`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
        }
    }
}

impl Iterator for PercentDecodeIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let (&c, rest) = self.input.split_first()?;
        if c == b'%' {
            if let [hi, lo, tail @ ..] = rest {
                if let (Some(hi), Some(lo)) = (decode_nibble(*hi), decode_nibble(*lo)) {
                    self.input = tail;
                    return Some((hi << 4) | lo);
                }
            }
        }

        self.input = rest;
        Some(c)
    }
}
