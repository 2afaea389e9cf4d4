//! Byte sinks the canonicalization pipeline streams into.
//!
//! Every canonicalization step writes through the [`Sink`] trait rather than building strings, so the
//! canonical request can flow straight into a hash. Decorators such as [`BufferedSink`] and
//! [`LowerCaseSink`] wrap another sink and implement the same trait.

use qualifier_attr::qualifiers;

/// Accepts contiguous byte ranges. Writes cannot fail.
pub trait Sink {
    /// Append `bytes` to the sink.
    fn write(&mut self, bytes: &[u8]);

    /// Append a single byte to the sink.
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }

    /// Append a string to the sink.
    #[inline]
    fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

/// Collects small writes into a fixed buffer before passing them on.
///
/// The canonicalizers emit many one- and three-byte writes; batching them keeps hash updates coarse. Call
/// [`finish`][BufferedSink::finish] when done: bytes still in the buffer are lost otherwise.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct BufferedSink<S: Sink, const N: usize> {
    inner: S,
    buf: [u8; N],
    len: usize,
}

impl<S: Sink, const N: usize> BufferedSink<S, N> {
    /// Wrap `inner` with an empty buffer.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn new(inner: S) -> Self {
        Self {
            inner,
            buf: [0; N],
            len: 0,
        }
    }

    /// Pass any buffered bytes on to the wrapped sink.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn flush(&mut self) {
        if self.len > 0 {
            self.inner.write(&self.buf[..self.len]);
            self.len = 0;
        }
    }

    /// Flush and return the wrapped sink.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn finish(mut self) -> S {
        self.flush();
        self.inner
    }
}

impl<S: Sink, const N: usize> Sink for BufferedSink<S, N> {
    fn write(&mut self, bytes: &[u8]) {
        if bytes.len() > N - self.len {
            self.flush();
            if bytes.len() >= N {
                self.inner.write(bytes);
                return;
            }
        }

        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }
}

/// Lower-cases ASCII letters on their way to the wrapped sink.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct LowerCaseSink<S: Sink> {
    inner: S,
}

impl<S: Sink> LowerCaseSink<S> {
    /// Wrap `inner`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn new(inner: S) -> Self {
        Self {
            inner,
        }
    }
}

impl<S: Sink> Sink for LowerCaseSink<S> {
    fn write(&mut self, bytes: &[u8]) {
        let mut chunk = [0u8; 128];
        for part in bytes.chunks(chunk.len()) {
            let lowered = &mut chunk[..part.len()];
            lowered.copy_from_slice(part);
            lowered.make_ascii_lowercase();
            self.inner.write(lowered);
        }
    }
}

/// Discards bytes, keeping only a count of them. Used to size output before writing it.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
struct Counter {
    count: usize,
}

impl Counter {
    /// The number of bytes written so far.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn count(&self) -> usize {
        self.count
    }
}

impl Sink for Counter {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferedSink, Counter, LowerCaseSink, Sink};

    /// Records the size of every write it receives.
    #[derive(Default)]
    struct Recorder {
        bytes: Vec<u8>,
        writes: Vec<usize>,
    }

    impl Sink for Recorder {
        fn write(&mut self, bytes: &[u8]) {
            self.bytes.extend_from_slice(bytes);
            self.writes.push(bytes.len());
        }
    }

    #[test_log::test]
    fn buffered_batches_small_writes() {
        let mut sink = BufferedSink::<_, 4>::new(Recorder::default());
        sink.write(b"a");
        sink.write(b"bc");
        sink.write(b"d");
        sink.write(b"ef");
        let rec = sink.finish();
        assert_eq!(rec.bytes, b"abcdef");
        assert_eq!(rec.writes, vec![4, 2]);
    }

    #[test_log::test]
    fn buffered_passes_large_writes_through() {
        let mut sink = BufferedSink::<_, 4>::new(Recorder::default());
        sink.write(b"ab");
        sink.write(b"0123456789");
        sink.write_byte(b'z');
        let rec = sink.finish();
        assert_eq!(rec.bytes, b"ab0123456789z");
        assert_eq!(rec.writes, vec![2, 10, 1]);
    }

    #[test_log::test]
    fn lower_case() {
        let mut out = Vec::new();
        let long = "ABC-".repeat(100);
        {
            let mut sink = LowerCaseSink::new(&mut out);
            sink.write_str("My-Header1");
            sink.write_str(&long);
        }
        assert_eq!(&out[..10], b"my-header1");
        assert_eq!(&out[10..], "abc-".repeat(100).as_bytes());
    }

    #[test_log::test]
    fn counter() {
        let mut c = Counter::default();
        c.write_str("hello");
        c.write_byte(b'!');
        assert_eq!(c.count(), 6);
    }
}
