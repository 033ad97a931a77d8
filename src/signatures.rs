//! Magic-number catalog and header matching.
//!
//! The catalog is a static, ordered table of file types and the byte
//! prefixes that identify them, plus a table mapping file extensions to the
//! type they should contain. Matching is first-match over catalog order:
//! the first type (in declaration order) with any pattern that prefixes the
//! header wins, even when a later type has a longer, more specific pattern.
//!
//! Known limitation: overlapping patterns are resolved purely by order. The
//! `MP4` entry is a bare three-zero-byte prefix and will also claim any other
//! header starting with `00 00 00` that no earlier entry recognized.

use crate::types::DetectedType;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Magic byte signatures used by the built-in catalog.
pub mod magic {
    /// JPEG SOI marker followed by the first marker prefix
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PNG file signature
    pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

    /// GIF 1987 revision
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF 1989 revision
    pub const GIF89A: &[u8] = b"GIF89a";

    /// PDF header
    pub const PDF: &[u8] = b"%PDF-";

    /// ZIP local file header
    pub const ZIP_LOCAL: &[u8] = &[b'P', b'K', 0x03, 0x04];

    /// ZIP end of central directory (empty archive)
    pub const ZIP_EMPTY: &[u8] = &[b'P', b'K', 0x05, 0x06];

    /// ZIP spanned archive marker
    pub const ZIP_SPANNED: &[u8] = &[b'P', b'K', 0x07, 0x08];

    /// gzip with deflate compression method
    pub const GZIP: &[u8] = &[0x1F, 0x8B, 0x08];

    /// RAR 1.5 - 4.x
    pub const RAR4: &[u8] = &[b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x00];

    /// RAR 5.0+
    pub const RAR5: &[u8] = &[b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x01, 0x00];

    /// 7-Zip archive
    pub const SEVEN_ZIP: &[u8] = &[b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C];

    /// Windows bitmap
    pub const BMP: &[u8] = b"BM";

    /// DOS/PE executable stub: 'M' 'Z'
    pub const MZ: &[u8] = b"MZ";

    /// ELF magic bytes: 0x7F 'E' 'L' 'F'
    pub const ELF: &[u8] = &[0x7F, b'E', b'L', b'F'];

    /// MP3 with an ID3v2 tag
    pub const MP3_ID3: &[u8] = b"ID3";

    /// MP3 MPEG-1 Layer III frame sync without a tag
    pub const MP3_FRAME: &[u8] = &[0xFF, 0xFB];

    /// RIFF container (WAV)
    pub const RIFF: &[u8] = b"RIFF";

    /// FLAC stream marker
    pub const FLAC: &[u8] = b"fLaC";

    /// Crude ISO BMFF check: leading zero bytes of the first box size
    pub const MP4: &[u8] = &[0x00, 0x00, 0x00];
}

/// A file type and the byte prefixes that identify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Type name reported on a match (e.g. "PNG")
    pub name: &'static str,
    /// Patterns tried in order
    pub patterns: &'static [&'static [u8]],
}

impl Signature {
    /// Returns `true` if any pattern is a prefix of `header`.
    pub fn matches(&self, header: &[u8]) -> bool {
        self.patterns.iter().any(|p| header.starts_with(p))
    }
}

/// Built-in signature table, in matching order.
pub static MAGIC_DATABASE: &[Signature] = &[
    Signature { name: "JPEG", patterns: &[magic::JPEG] },
    Signature { name: "PNG", patterns: &[magic::PNG] },
    Signature { name: "GIF", patterns: &[magic::GIF87A, magic::GIF89A] },
    Signature { name: "PDF", patterns: &[magic::PDF] },
    Signature {
        name: "ZIP",
        patterns: &[magic::ZIP_LOCAL, magic::ZIP_EMPTY, magic::ZIP_SPANNED],
    },
    Signature { name: "GZIP", patterns: &[magic::GZIP] },
    Signature { name: "RAR", patterns: &[magic::RAR4, magic::RAR5] },
    Signature { name: "7Z", patterns: &[magic::SEVEN_ZIP] },
    Signature { name: "BMP", patterns: &[magic::BMP] },
    Signature { name: "EXE", patterns: &[magic::MZ] },
    Signature { name: "ELF", patterns: &[magic::ELF] },
    Signature { name: "MP3", patterns: &[magic::MP3_ID3, magic::MP3_FRAME] },
    Signature { name: "WAV", patterns: &[magic::RIFF] },
    Signature { name: "FLAC", patterns: &[magic::FLAC] },
    Signature { name: "MP4", patterns: &[magic::MP4] },
];

/// Built-in extension table. Keys are lowercase and include the leading dot.
pub static EXTENSION_MAP: &[(&str, &str)] = &[
    (".jpg", "JPEG"),
    (".jpeg", "JPEG"),
    (".png", "PNG"),
    (".gif", "GIF"),
    (".pdf", "PDF"),
    (".zip", "ZIP"),
    (".gz", "GZIP"),
    (".rar", "RAR"),
    (".7z", "7Z"),
    (".bmp", "BMP"),
    (".exe", "EXE"),
    (".dll", "EXE"),
    (".elf", "ELF"),
    (".mp3", "MP3"),
    (".wav", "WAV"),
    (".flac", "FLAC"),
    (".mp4", "MP4"),
];

/// Return the first type whose pattern prefixes `header`.
///
/// Headers shorter than a pattern simply fail to match it.
pub fn detect(header: &[u8], signatures: &[Signature]) -> DetectedType {
    signatures
        .iter()
        .find(|sig| sig.matches(header))
        .map_or(DetectedType::Unknown, |sig| DetectedType::Known(sig.name))
}

/// Length of the longest pattern across the whole table.
pub fn longest_pattern_len(signatures: &[Signature]) -> usize {
    signatures
        .iter()
        .flat_map(|sig| sig.patterns.iter())
        .map(|p| p.len())
        .max()
        .unwrap_or(0)
}

/// Lowercased final suffix of `path`, including the leading dot.
///
/// Dotfiles such as `.bashrc` have no suffix.
pub fn extension_key(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// One line of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogEntry {
    /// Type name
    pub name: &'static str,
    /// Patterns rendered as uppercase hex, in matching order
    pub patterns: Vec<String>,
}

/// Signature table plus an extension index, built once.
#[derive(Debug, Clone)]
pub struct Catalog {
    signatures: &'static [Signature],
    extensions: HashMap<String, &'static str>,
    header_len: usize,
}

impl Catalog {
    /// Build a catalog from a signature table and an extension table.
    ///
    /// Extension keys are lowercased; a later duplicate key overrides an
    /// earlier one.
    pub fn new(
        signatures: &'static [Signature],
        extensions: &[(&str, &'static str)],
    ) -> Self {
        let extensions = extensions
            .iter()
            .map(|(ext, name)| (ext.to_lowercase(), *name))
            .collect();
        let header_len = longest_pattern_len(signatures);
        debug!(
            types = signatures.len(),
            header_len, "signature catalog built"
        );
        Self {
            signatures,
            extensions,
            header_len,
        }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog::new(MAGIC_DATABASE, EXTENSION_MAP))
    }

    /// Signature entries in matching order.
    pub fn signatures(&self) -> &'static [Signature] {
        self.signatures
    }

    /// Number of header bytes needed to test every pattern.
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Match `header` against this catalog.
    pub fn detect(&self, header: &[u8]) -> DetectedType {
        detect(header, self.signatures)
    }

    /// Type implied by the extension of `path`, compared case-insensitively.
    pub fn expected_type(&self, path: &Path) -> Option<&'static str> {
        let key = extension_key(path)?;
        self.extensions.get(&key).copied()
    }

    /// Catalog entries sorted by type name, patterns as uppercase hex.
    pub fn listing(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .signatures
            .iter()
            .map(|sig| CatalogEntry {
                name: sig.name,
                patterns: sig.patterns.iter().map(hex::encode_upper).collect(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(b.name));
        entries
    }
}
