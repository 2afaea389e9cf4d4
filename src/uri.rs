//! URI path canonicalization.
//!
//! Most services normalize the path (dot segments, duplicate slashes) and double-encode each segment. S3
//! signs the path as given, encoded once.

use {
    crate::{
        constants::S3_SERVICE,
        percent::{encode, encode_twice, needs_encoding},
        sink::Sink,
    },
    log::trace,
};

/// Write the canonical form of `path` used by every service except S3.
///
/// Empty and `.` segments are dropped. A `..` segment removes the previous retained segment; at the root it
/// is ignored. Each remaining segment is written as `/` followed by its bytes double-encoded. A trailing `/`
/// is kept, and a path with no segments left becomes `/`.
pub fn write_canonical_uri<S: Sink + ?Sized>(path: &str, out: &mut S) {
    let path = path.as_bytes();
    let mut segments: Vec<&[u8]> = Vec::with_capacity(path.iter().filter(|&&c| c == b'/').count() + 1);

    for segment in path.split(|&c| c == b'/') {
        match segment {
            b"" | b"." => (),
            b".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    for segment in &segments {
        out.write_byte(b'/');
        write_encoded_twice(segment, out);
    }

    if segments.is_empty() || path.ends_with(b"/") {
        out.write_byte(b'/');
    }
}

/// Write the S3 canonical form of `path`: not normalized, with every byte except unreserved characters and `/`
/// percent-encoded. A `+` is treated as a space.
pub fn write_s3_canonical_uri<S: Sink + ?Sized>(path: &str, out: &mut S) {
    if path.is_empty() {
        out.write_byte(b'/');
        return;
    }

    let path = path.as_bytes();
    let mut literal_start = 0;
    for (i, &c) in path.iter().enumerate() {
        if c != b'/' && needs_encoding(c) {
            out.write(&path[literal_start..i]);
            encode(if c == b'+' { b' ' } else { c }, out);
            literal_start = i + 1;
        }
    }
    out.write(&path[literal_start..]);
}

/// Write the canonical URI for `path`, choosing the S3 form when `service` is `s3`.
pub fn write_canonical_uri_for_service<S: Sink + ?Sized>(service: &str, path: &str, out: &mut S) {
    if service == S3_SERVICE {
        trace!("Using S3 URI canonicalization for {:?}", path);
        write_s3_canonical_uri(path, out);
    } else {
        write_canonical_uri(path, out);
    }
}

fn write_encoded_twice<S: Sink + ?Sized>(segment: &[u8], out: &mut S) {
    let mut literal_start = 0;
    for (i, &c) in segment.iter().enumerate() {
        if needs_encoding(c) {
            out.write(&segment[literal_start..i]);
            encode_twice(c, out);
            literal_start = i + 1;
        }
    }
    out.write(&segment[literal_start..]);
}

#[cfg(test)]
mod tests {
    use super::{write_canonical_uri, write_canonical_uri_for_service, write_s3_canonical_uri};

    fn canonical(path: &str) -> String {
        let mut out = Vec::new();
        write_canonical_uri(path, &mut out);
        String::from_utf8(out).unwrap()
    }

    fn s3_canonical(path: &str) -> String {
        let mut out = Vec::new();
        write_s3_canonical_uri(path, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test_log::test]
    fn canonicalize_uri_path_empty() {
        assert_eq!(canonical(""), "/");
        assert_eq!(canonical("/"), "/");
        assert_eq!(canonical("//"), "/");
    }

    #[test_log::test]
    fn dot_segments() {
        assert_eq!(canonical("/./example"), "/example");
        assert_eq!(canonical("/./"), "/");
        assert_eq!(canonical("/example/.."), "/");
        assert_eq!(canonical("/example1/example2/../.."), "/");
        assert_eq!(canonical("/example1/example2/.."), "/example1");
        assert_eq!(canonical("/example1/example2/../"), "/example1/");
        assert_eq!(canonical("/../../example"), "/example");
        assert_eq!(canonical("/a/./b/../c/"), "/a/c/");
    }

    #[test_log::test]
    fn duplicate_slashes() {
        assert_eq!(canonical("//example//"), "/example/");
        assert_eq!(canonical("/a//b///c"), "/a/b/c");
    }

    #[test_log::test]
    fn double_encoding() {
        assert_eq!(canonical("/example space/"), "/example%2520space/");
        assert_eq!(canonical("/path with+spaces "), "/path%2520with%252Bspaces%2520");
        assert_eq!(canonical("/\u{1234}"), "/%25E1%2588%25B4");
        assert_eq!(canonical("/\u{0}"), "/%2500");
        assert_eq!(canonical("/-._~AZaz09"), "/-._~AZaz09");
        // A literal `%` is itself double-encoded.
        assert_eq!(canonical("/a%20b"), "/a%252520b");
    }

    #[test_log::test]
    fn s3() {
        assert_eq!(s3_canonical(""), "/");
        assert_eq!(s3_canonical("/"), "/");
        assert_eq!(s3_canonical("/composite/../path"), "/composite/../path");
        assert_eq!(s3_canonical("//double//"), "//double//");
        assert_eq!(s3_canonical("/\x2b"), "/%20");
        assert_eq!(s3_canonical("/path with+spaces "), "/path%20with%20spaces%20");
        assert_eq!(s3_canonical("/test.txt"), "/test.txt");
        assert_eq!(s3_canonical("/\u{1234}"), "/%E1%88%B4");
    }

    #[test_log::test]
    fn service_selection() {
        let mut out = Vec::new();
        write_canonical_uri_for_service("s3", "/a/../b", &mut out);
        assert_eq!(out, b"/a/../b");

        let mut out = Vec::new();
        write_canonical_uri_for_service("iam", "/a/../b", &mut out);
        assert_eq!(out, b"/b");
    }
}
