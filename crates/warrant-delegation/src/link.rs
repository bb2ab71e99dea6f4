//! Content-addressed links over archive bytes.
//!
//! A link is the multiformats-style framing `[version][content
//! code][digest code][digest length][digest]` with every integer as an
//! unsigned LEB128 varint, rendered in multibase base64 (`m` prefix,
//! unpadded).
//!
//! Archives travel whole, so the digest function is **identity**: the
//! "digest" is the archive bytes verbatim and the rendered link carries
//! the full payload. Decoding a link therefore recovers the archive.

use std::fmt;

use crate::error::{DelegationError, DelegationResult};

/// Multicodec code for the identity digest (no hashing).
pub const IDENTITY_CODE: u64 = 0x00;

/// Link format version.
const LINK_VERSION: u64 = 0x01;

/// Multibase prefix for unpadded base64.
const BASE64_PREFIX: char = 'm';

/// A content-addressed link: a content format code plus a digest.
#[derive(Clone, PartialEq, Eq)]
pub struct Link {
    code: u64,
    digest: Vec<u8>,
}

impl Link {
    /// Create an identity-digest link over `content`, tagged with the
    /// content format `code`.
    #[must_use]
    pub fn identity(code: u64, content: &[u8]) -> Self {
        Self {
            code,
            digest: content.to_vec(),
        }
    }

    /// The content format code.
    #[must_use]
    pub fn code(&self) -> u64 {
        self.code
    }

    /// The digest bytes. For identity links this is the content itself.
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Binary form of the link.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.digest.len().saturating_add(12));
        varint::write(&mut bytes, LINK_VERSION);
        varint::write(&mut bytes, self.code);
        varint::write(&mut bytes, IDENTITY_CODE);
        varint::write(&mut bytes, self.digest.len() as u64);
        bytes.extend_from_slice(&self.digest);
        bytes
    }

    /// Parse a multibase base64 link string.
    ///
    /// # Errors
    ///
    /// Returns [`DelegationError::InvalidLink`] on a wrong multibase
    /// prefix, bad base64, an unknown version or digest function, or a
    /// digest length mismatch.
    pub fn parse(s: &str) -> DelegationResult<Self> {
        use base64::Engine;

        let body = s
            .strip_prefix(BASE64_PREFIX)
            .ok_or_else(|| DelegationError::InvalidLink("missing multibase prefix".into()))?;
        let bytes = base64::engine::general_purpose::STANDARD_NO_PAD
            .decode(body)
            .map_err(|e| DelegationError::InvalidLink(e.to_string()))?;

        let mut offset = 0;
        let mut next = || -> DelegationResult<u64> {
            let (value, read) = varint::read(&bytes[offset..])
                .ok_or_else(|| DelegationError::InvalidLink("truncated varint".into()))?;
            offset = offset.saturating_add(read);
            Ok(value)
        };

        let version = next()?;
        if version != LINK_VERSION {
            return Err(DelegationError::InvalidLink(format!(
                "unsupported link version {version}"
            )));
        }
        let code = next()?;
        let digest_code = next()?;
        if digest_code != IDENTITY_CODE {
            return Err(DelegationError::InvalidLink(format!(
                "unsupported digest function {digest_code:#x}"
            )));
        }
        let digest_len = next()?;

        let digest = bytes
            .get(offset..)
            .filter(|rest| rest.len() as u64 == digest_len)
            .ok_or_else(|| DelegationError::InvalidLink("digest length mismatch".into()))?
            .to_vec();

        Ok(Self { code, digest })
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD_NO_PAD.encode(self.to_bytes());
        write!(f, "{BASE64_PREFIX}{encoded}")
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("code", &format_args!("{:#x}", self.code))
            .field("digest_len", &self.digest.len())
            .finish()
    }
}

/// Unsigned LEB128 varints, shared with the archive framing.
pub(crate) mod varint {
    /// Append `value` to `out`.
    // Invariant: 7-bit groups, shift stays below 64.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub(crate) fn write(out: &mut Vec<u8>, mut value: u64) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                out.push(byte);
                return;
            }
            out.push(byte | 0x80);
        }
    }

    /// Read a varint from the front of `buf`. Returns the value and the
    /// number of bytes consumed, or `None` if truncated or over 64 bits.
    // Invariant: shift is bounded to 63 before use.
    #[allow(clippy::arithmetic_side_effects)]
    pub(crate) fn read(buf: &[u8]) -> Option<(u64, usize)> {
        let mut value = 0u64;
        let mut shift = 0u32;
        for (i, &byte) in buf.iter().enumerate() {
            if shift > 63 {
                return None;
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Some((value, i + 1));
            }
            shift += 7;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_roundtrip() {
        let mut buf = Vec::new();
        for value in [0u64, 1, 127, 128, 300, 0x0202, u64::from(u32::MAX), u64::MAX] {
            buf.clear();
            varint::write(&mut buf, value);
            let (read, consumed) = varint::read(&buf).unwrap();
            assert_eq!(read, value);
            assert_eq!(consumed, buf.len());
        }
    }

    #[test]
    fn test_varint_truncated() {
        assert!(varint::read(&[]).is_none());
        assert!(varint::read(&[0x80]).is_none());
        assert!(varint::read(&[0x80, 0x80]).is_none());
    }

    #[test]
    fn test_link_roundtrip() {
        let content = b"archived delegation bytes";
        let link = Link::identity(0x0202, content);

        let rendered = link.to_string();
        assert!(rendered.starts_with('m'));

        let parsed = Link::parse(&rendered).unwrap();
        assert_eq!(parsed, link);
        assert_eq!(parsed.code(), 0x0202);
        assert_eq!(parsed.digest(), content);
    }

    #[test]
    fn test_link_rejects_wrong_prefix() {
        let link = Link::identity(0x0202, b"payload");
        let rendered = link.to_string();

        // Swap the multibase prefix for base32's.
        let wrong = format!("b{}", &rendered[1..]);
        assert!(matches!(
            Link::parse(&wrong),
            Err(DelegationError::InvalidLink(_))
        ));
    }

    #[test]
    fn test_link_rejects_bad_base64() {
        assert!(Link::parse("m!!!!").is_err());
    }

    #[test]
    fn test_link_rejects_length_mismatch() {
        use base64::Engine;

        let link = Link::identity(0x0202, b"payload");
        let mut bytes = link.to_bytes();
        bytes.pop();

        let truncated = format!(
            "m{}",
            base64::engine::general_purpose::STANDARD_NO_PAD.encode(&bytes)
        );
        assert!(matches!(
            Link::parse(&truncated),
            Err(DelegationError::InvalidLink(_))
        ));
    }

    #[test]
    fn test_empty_content() {
        let link = Link::identity(0x0202, b"");
        let parsed = Link::parse(&link.to_string()).unwrap();
        assert_eq!(parsed.digest(), b"");
    }
}
