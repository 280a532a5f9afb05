//! Output - PNG Encoding, Saving, Digests
//!
//! Encodes the rendered canvas to PNG, writes it, and reports a SHA-256
//! digest of the encoded bytes so runs can be compared byte-for-byte.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageOutputFormat, RgbImage};
use log::info;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("writing {path} failed: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Record of one written file.
#[derive(Debug, Clone, Serialize)]
pub struct SavedImage {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

/// Encode `img` as PNG in memory.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, OutputError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageOutputFormat::Png)?;
    Ok(buf.into_inner())
}

/// Encode and write `img` to `path`. Failures propagate; there is no
/// retry and no partial-output cleanup.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<SavedImage, OutputError> {
    let data = encode_png(img)?;
    fs::write(path, &data).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let saved = SavedImage {
        path: path.to_path_buf(),
        bytes: data.len(),
        sha256: sha256_hex(&data),
    };
    info!("wrote {} ({} bytes, sha256 {})", saved.path.display(), saved.bytes, saved.sha256);
    Ok(saved)
}

/// SHA-256 of bytes as a hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_png_signature() {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        let data = encode_png(&img).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(sha256_hex(b"abc"), sha256_hex(b"abc"));
        assert_ne!(sha256_hex(b"abc"), sha256_hex(b"abd"));
    }

    #[test]
    fn save_to_bad_path_is_an_error() {
        let img = RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]));
        let err = save_png(&img, Path::new("/no/such/dir/out.png")).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }
}
