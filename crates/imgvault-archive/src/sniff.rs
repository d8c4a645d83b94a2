//! Content-type sniffing from leading magic bytes.
//!
//! # Invariants
//! - Only the buffer is inspected; declared extensions and `Content-Type`
//!   headers are ignored.
//! - Unknown buffers map to [`FALLBACK_EXTENSION`] so every entry stays
//!   openable.
//!
//! # Design Notes
//! - ISO-BMFF images (AVIF, HEIC) share the `ftyp` box, so the major brand at
//!   offset 8 decides between them.
//! - Text formats such as SVG have no magic and fall back.

/// Extension used when the buffer matches no known signature.
pub const FALLBACK_EXTENSION: &str = "jpg";

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const JXL_CODESTREAM_MAGIC: &[u8] = &[0xFF, 0x0A];
const JXL_CONTAINER_MAGIC: &[u8] = &[
    0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', b' ', 0x0D, 0x0A, 0x87, 0x0A,
];
const TIFF_LE_MAGIC: &[u8] = b"II*\0";
const TIFF_BE_MAGIC: &[u8] = b"MM\0*";
const ICO_MAGIC: &[u8] = &[0x00, 0x00, 0x01, 0x00];

/// Sniff an image extension from magic bytes.
///
/// Returns None if no recognized signature matches.
pub fn sniff_extension(buf: &[u8]) -> Option<&'static str> {
    if buf.starts_with(PNG_MAGIC) {
        return Some("png");
    }
    if buf.starts_with(JPEG_MAGIC) {
        return Some("jpg");
    }
    if buf.starts_with(b"GIF87a") || buf.starts_with(b"GIF89a") {
        return Some("gif");
    }
    if is_webp(buf) {
        return Some("webp");
    }
    if let Some(ext) = sniff_iso_bmff(buf) {
        return Some(ext);
    }
    if buf.starts_with(TIFF_LE_MAGIC) || buf.starts_with(TIFF_BE_MAGIC) {
        return Some("tif");
    }
    if buf.starts_with(JXL_CONTAINER_MAGIC) || buf.starts_with(JXL_CODESTREAM_MAGIC) {
        return Some("jxl");
    }
    if buf.starts_with(b"8BPS") {
        return Some("psd");
    }
    if buf.starts_with(b"%PDF-") {
        return Some("pdf");
    }
    if buf.starts_with(ICO_MAGIC) {
        return Some("ico");
    }
    // Two-byte signature last: it is the most likely to collide.
    if buf.len() >= 14 && buf.starts_with(b"BM") {
        return Some("bmp");
    }
    None
}

/// Sniffed extension, or [`FALLBACK_EXTENSION`].
pub fn extension_or_fallback(buf: &[u8]) -> &'static str {
    sniff_extension(buf).unwrap_or(FALLBACK_EXTENSION)
}

fn is_webp(buf: &[u8]) -> bool {
    buf.len() >= 12 && &buf[0..4] == b"RIFF" && &buf[8..12] == b"WEBP"
}

fn sniff_iso_bmff(buf: &[u8]) -> Option<&'static str> {
    if buf.len() < 12 || &buf[4..8] != b"ftyp" {
        return None;
    }
    match &buf[8..12] {
        b"avif" | b"avis" => Some("avif"),
        b"heic" | b"heix" | b"heim" | b"heis" | b"hevc" | b"hevx" | b"mif1" | b"msf1" => {
            Some("heic")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut v = prefix.to_vec();
        v.resize(32, 0xAA);
        v
    }

    #[test]
    fn sniff_common_web_formats() {
        assert_eq!(sniff_extension(&padded(PNG_MAGIC)), Some("png"));
        assert_eq!(sniff_extension(&padded(&[0xFF, 0xD8, 0xFF, 0xE0])), Some("jpg"));
        assert_eq!(sniff_extension(&padded(b"GIF89a")), Some("gif"));
        assert_eq!(sniff_extension(&padded(b"RIFF\x10\0\0\0WEBPVP8 ")), Some("webp"));
    }

    #[test]
    fn sniff_iso_bmff_brands() {
        assert_eq!(sniff_extension(&padded(b"\0\0\0\x1cftypavif")), Some("avif"));
        assert_eq!(sniff_extension(&padded(b"\0\0\0\x18ftypheic")), Some("heic"));
        assert_eq!(sniff_extension(&padded(b"\0\0\0\x18ftypisom")), None);
    }

    #[test]
    fn sniff_less_common_formats() {
        assert_eq!(sniff_extension(&padded(b"II*\0")), Some("tif"));
        assert_eq!(sniff_extension(&padded(b"MM\0*")), Some("tif"));
        assert_eq!(sniff_extension(&padded(b"8BPS")), Some("psd"));
        assert_eq!(sniff_extension(&padded(b"%PDF-1.7")), Some("pdf"));
        assert_eq!(sniff_extension(&padded(ICO_MAGIC)), Some("ico"));
        assert_eq!(sniff_extension(&padded(b"BM")), Some("bmp"));
        assert_eq!(sniff_extension(&padded(JXL_CONTAINER_MAGIC)), Some("jxl"));
    }

    #[test]
    fn truncated_buffers_do_not_match() {
        assert_eq!(sniff_extension(&[]), None);
        assert_eq!(sniff_extension(&PNG_MAGIC[..4]), None);
        assert_eq!(sniff_extension(b"RIFF"), None);
        assert_eq!(sniff_extension(b"BM"), None);
    }

    #[test]
    fn unknown_and_text_fall_back_to_jpg() {
        assert_eq!(extension_or_fallback(b"hello world, not an image"), "jpg");
        assert_eq!(extension_or_fallback(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), "jpg");
        assert_eq!(extension_or_fallback(&[]), FALLBACK_EXTENSION);
    }
}
