//! Binary archive container for delegations.
//!
//! An archive is the transportable form of a delegation tree (the
//! delegation plus its embedded proofs): a fixed magic, a varint payload
//! length, and a JSON payload. The format code [`ARCHIVE_CODE`] tags
//! content-addressed links over archive bytes.

use crate::delegation::Delegation;
use crate::error::{DelegationError, DelegationResult};
use crate::link::{Link, varint};

/// Multicodec-style format code for delegation archives.
pub const ARCHIVE_CODE: u64 = 0x0202;

/// Archive magic: "warrant delegation archive", format 1.
const MAGIC: [u8; 4] = *b"WDA1";

/// Serialize a delegation (with its proofs) to archive bytes.
///
/// # Errors
///
/// Returns [`DelegationError::Archive`] if payload serialization fails.
pub fn encode(delegation: &Delegation) -> DelegationResult<Vec<u8>> {
    let payload =
        serde_json::to_vec(delegation).map_err(|e| DelegationError::Archive(e.to_string()))?;

    let mut bytes = Vec::with_capacity(payload.len().saturating_add(16));
    bytes.extend_from_slice(&MAGIC);
    varint::write(&mut bytes, payload.len() as u64);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Parse archive bytes back into a delegation.
///
/// # Errors
///
/// Returns [`DelegationError::Archive`] on a bad magic, a truncated
/// payload, or a malformed payload document.
pub fn decode(bytes: &[u8]) -> DelegationResult<Delegation> {
    let rest = bytes
        .strip_prefix(&MAGIC[..])
        .ok_or_else(|| DelegationError::Archive("bad archive magic".into()))?;

    let (payload_len, consumed) =
        varint::read(rest).ok_or_else(|| DelegationError::Archive("truncated header".into()))?;

    let payload = rest
        .get(consumed..)
        .filter(|payload| payload.len() as u64 == payload_len)
        .ok_or_else(|| DelegationError::Archive("payload length mismatch".into()))?;

    serde_json::from_slice(payload).map_err(|e| DelegationError::Archive(e.to_string()))
}

/// Serialize a delegation and render it as a content-addressed link
/// string: the identity digest of the archive bytes, tagged with
/// [`ARCHIVE_CODE`], in multibase base64.
///
/// # Errors
///
/// Returns [`DelegationError::Archive`] if archiving fails.
pub fn to_link_string(delegation: &Delegation) -> DelegationResult<String> {
    let bytes = encode(delegation)?;
    Ok(Link::identity(ARCHIVE_CODE, &bytes).to_string())
}

/// Decode a link string produced by [`to_link_string`].
///
/// # Errors
///
/// Returns [`DelegationError::InvalidLink`] on link framing problems and
/// [`DelegationError::Archive`] on archive problems, including a link
/// whose content code is not [`ARCHIVE_CODE`].
pub fn from_link_string(s: &str) -> DelegationResult<Delegation> {
    let link = Link::parse(s)?;
    if link.code() != ARCHIVE_CODE {
        return Err(DelegationError::Archive(format!(
            "unexpected content code {:#x}",
            link.code()
        )));
    }
    decode(link.digest())
}
