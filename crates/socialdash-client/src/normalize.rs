//! Dataset path normalization.
//!
//! Listings report `file_path` as the backend saw it on disk, which may be a
//! Windows path. The `/data/<path>` route wants a relative, slash-separated
//! path.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped within one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Normalizes a dataset path for the `/data/` route.
///
/// Backslashes become `/`, a leading drive letter (`C:/`) and a leading `/`
/// are removed, and each segment is percent-encoded.
#[must_use]
pub fn normalize_data_path(raw: &str) -> String {
    let slashed = raw.trim().replace('\\', "/");
    let without_drive = strip_drive_letter(&slashed);
    let relative = without_drive.strip_prefix('/').unwrap_or(without_drive);

    relative
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encodes a single path segment, including any `/`.
pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn strip_drive_letter(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    {
        &path[3..]
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_path_with_drive_letter() {
        assert_eq!(
            normalize_data_path(r"C:\data\youtube\chan.json"),
            "data/youtube/chan.json"
        );
    }

    #[test]
    fn leading_slash_removed() {
        assert_eq!(
            normalize_data_path("/data/instagram/brand.json"),
            "data/instagram/brand.json"
        );
    }

    #[test]
    fn relative_path_unchanged() {
        assert_eq!(
            normalize_data_path("data/youtube/chan.json"),
            "data/youtube/chan.json"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(
            normalize_data_path("data/youtube/my channel #1?.json"),
            "data/youtube/my%20channel%20%231%3F.json"
        );
    }

    #[test]
    fn only_one_leading_slash_removed() {
        assert_eq!(normalize_data_path("D:/x.json"), "x.json");
        assert_eq!(normalize_data_path("//x.json"), "/x.json");
    }
}
