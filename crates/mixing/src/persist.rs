//! Power-loss record for the mixer.
//!
//! Layout (all multi-byte integers little-endian):
//! ```text
//! [0..4]      magic    b"DWMX"
//! [4]         version  u8 = 1
//! [5..n]      payload  postcard-encoded MixerRecord
//! [n..n+4]    checksum u32 le (CRC32 of payload)
//! ```
//!
//! The record holds everything needed to rebuild the active blend without
//! re-running the tick: mode, gradient endpoints and their captured blends,
//! random band, selected tool, both tables, and the active blend itself.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::engine::{ActiveMix, Mixer};
use crate::mode::{sanitize_z, GradientConfig, ModeKind, RandomConfig};
use crate::ratio::MixRatio;
use crate::{MAX_STEPPERS, MAX_TOOLS};

/// Record magic bytes.
pub const MAGIC: &[u8; 4] = b"DWMX";
/// Record format version.
pub const VERSION: u8 = 1;
/// Header length (magic + version).
pub const HEADER_LEN: usize = 5;
/// Trailer length (CRC32).
pub const CHECKSUM_LEN: usize = 4;
/// Buffer size that fits the largest supported mixer.
pub const RECORD_CAPACITY: usize = 512;

const TABLE_CAP: usize = MAX_STEPPERS * MAX_TOOLS;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Error variants for record encode/decode.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Output buffer cannot hold the record
    #[error("record buffer too small")]
    BufferTooSmall,
    /// Input shorter than header + checksum
    #[error("record truncated")]
    Truncated,
    /// Magic bytes are not b"DWMX"
    #[error("bad record magic")]
    BadMagic,
    /// Version byte not recognised
    #[error("unsupported record version {0}")]
    UnsupportedVersion(u8),
    /// CRC32 does not match the payload
    #[error("record checksum mismatch")]
    ChecksumMismatch,
    /// postcard could not encode or decode the payload
    #[error("postcard: {0}")]
    Postcard(postcard::Error),
    /// Record was written for a different stepper/tool count
    #[error("record shape {steppers}x{tools} does not match mixer")]
    ShapeMismatch {
        /// Steppers in the record
        steppers: u8,
        /// Tool slots in the record
        tools: u8,
    },
    /// A stored blend does not sum to 100
    #[error("record contains an invalid mix ratio")]
    InvalidRatio,
}

// ---------------------------------------------------------------------------
// MixerRecord
// ---------------------------------------------------------------------------

/// Serialisable snapshot of a [`Mixer`].
///
/// Tables are flattened row-major (`tool * steppers + component`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixerRecord {
    /// Number of steppers (`K`)
    pub steppers: u8,
    /// Number of tool slots (`N`)
    pub tools: u8,
    /// User tool count
    pub occupy: u8,
    /// Active mode
    pub mode: ModeKind,
    /// Gradient endpoints
    pub gradient: GradientConfig,
    /// Blend captured from the gradient start tool
    pub gradient_start: Vec<u8, MAX_STEPPERS>,
    /// Blend captured from the gradient end tool
    pub gradient_end: Vec<u8, MAX_STEPPERS>,
    /// Random band
    pub random: RandomConfig,
    /// Selected user tool
    pub selected: u8,
    /// Staged manual percentages
    pub manual: Vec<u8, TABLE_CAP>,
    /// Raw colour weights
    pub color: Vec<u8, TABLE_CAP>,
    /// Tool the active blend is published under
    pub active_tool: u8,
    /// Active blend
    pub active: Vec<u8, MAX_STEPPERS>,
}

fn copy_into<const C: usize>(src: &[u8]) -> Result<Vec<u8, C>, PersistError> {
    Vec::from_slice(src).map_err(|_| PersistError::BufferTooSmall)
}

fn flatten<const K: usize, const N: usize>(rows: &[[u8; K]; N]) -> Result<Vec<u8, TABLE_CAP>, PersistError> {
    let mut out = Vec::new();
    for row in rows {
        out.extend_from_slice(row)
            .map_err(|_| PersistError::BufferTooSmall)?;
    }
    Ok(out)
}

fn unflatten<const K: usize, const N: usize>(flat: &[u8]) -> Result<[[u8; K]; N], PersistError> {
    let mut rows = [[0u8; K]; N];
    let mut chunks = flat.chunks_exact(K);
    for row in &mut rows {
        let chunk = chunks.next().ok_or(PersistError::InvalidRatio)?;
        row.copy_from_slice(chunk);
    }
    if chunks.next().is_some() || !chunks.remainder().is_empty() {
        return Err(PersistError::InvalidRatio);
    }
    Ok(rows)
}

fn ratio<const K: usize>(parts: &[u8]) -> Result<MixRatio<K>, PersistError> {
    MixRatio::try_from_slice(parts).ok_or(PersistError::InvalidRatio)
}

impl<const K: usize, const N: usize> Mixer<K, N> {
    /// Capture the mixer state.
    pub fn to_record(&self) -> Result<MixerRecord, PersistError> {
        let shape = |v: usize| u8::try_from(v).map_err(|_| PersistError::BufferTooSmall);
        Ok(MixerRecord {
            steppers: shape(K)?,
            tools: shape(N)?,
            occupy: self.tools.occupy,
            mode: self.kind,
            gradient: self.gradient,
            gradient_start: copy_into(self.gradient_start.as_array())?,
            gradient_end: copy_into(self.gradient_end.as_array())?,
            random: self.random,
            selected: self.selected,
            manual: flatten(&self.manual)?,
            color: flatten(&self.tools.color)?,
            active_tool: self.active.tool,
            active: copy_into(self.active.ratio.as_array())?,
        })
    }

    /// Rebuild a mixer from a record.
    ///
    /// The percentage table is recomputed from the stored weights; every
    /// other field is taken as stored. The restored mixer has not seen a Z
    /// yet, exactly like a freshly configured one.
    pub fn from_record(record: &MixerRecord) -> Result<Self, PersistError> {
        if usize::from(record.steppers) != K || usize::from(record.tools) != N {
            return Err(PersistError::ShapeMismatch {
                steppers: record.steppers,
                tools: record.tools,
            });
        }
        let mut mixer = Self::new(record.occupy);
        let color: [[u8; K]; N] = unflatten(&record.color)?;
        for (tool, weights) in (0u8..).zip(color) {
            mixer.tools.set_weights(tool, weights);
        }
        mixer.manual = unflatten(&record.manual)?;
        mixer.kind = record.mode;
        mixer.gradient = GradientConfig {
            z_start: sanitize_z(record.gradient.z_start),
            z_end: sanitize_z(record.gradient.z_end),
            tool_start: mixer.tools.clamp_user(record.gradient.tool_start),
            tool_end: mixer.tools.clamp_user(record.gradient.tool_end),
        };
        mixer.gradient_start = ratio(&record.gradient_start)?;
        mixer.gradient_end = ratio(&record.gradient_end)?;
        mixer.random = RandomConfig {
            z_start: sanitize_z(record.random.z_start),
            z_end: sanitize_z(record.random.z_end),
        };
        mixer.selected = mixer.tools.clamp_user(record.selected);
        let active_tool = if usize::from(record.active_tool) < N {
            record.active_tool
        } else {
            mixer.selected
        };
        mixer.active = ActiveMix {
            tool: active_tool,
            ratio: ratio(&record.active)?,
        };
        mixer.last_z = None;
        mixer.dirty = false;
        Ok(mixer)
    }

    /// Encode the mixer into `buf`, returning the record length.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, PersistError> {
        encode(&self.to_record()?, buf)
    }

    /// Decode a record produced by [`encode_into`](Self::encode_into).
    pub fn decode_from(bytes: &[u8]) -> Result<Self, PersistError> {
        Self::from_record(&decode(bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

/// Frame `record` into `buf`. Returns the number of bytes written.
pub fn encode(record: &MixerRecord, buf: &mut [u8]) -> Result<usize, PersistError> {
    if buf.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(PersistError::BufferTooSmall);
    }
    let (header, body) = buf.split_at_mut(HEADER_LEN);
    let (magic, version) = header.split_at_mut(MAGIC.len());
    magic.copy_from_slice(MAGIC);
    version.copy_from_slice(&[VERSION]);

    let room = body.len().saturating_sub(CHECKSUM_LEN);
    let payload_space = body.get_mut(..room).ok_or(PersistError::BufferTooSmall)?;
    let payload_len = match postcard::to_slice(record, payload_space) {
        Ok(payload) => payload.len(),
        Err(postcard::Error::SerializeBufferFull) => return Err(PersistError::BufferTooSmall),
        Err(e) => return Err(PersistError::Postcard(e)),
    };
    let crc = crc32fast::hash(body.get(..payload_len).ok_or(PersistError::BufferTooSmall)?);
    let trailer_end = payload_len.saturating_add(CHECKSUM_LEN);
    body.get_mut(payload_len..trailer_end)
        .ok_or(PersistError::BufferTooSmall)?
        .copy_from_slice(&crc.to_le_bytes());
    Ok(HEADER_LEN.saturating_add(trailer_end))
}

/// Check framing and checksum, then decode the payload.
pub fn decode(bytes: &[u8]) -> Result<MixerRecord, PersistError> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(PersistError::Truncated);
    }
    if bytes.get(0..4) != Some(MAGIC.as_slice()) {
        return Err(PersistError::BadMagic);
    }
    match bytes.get(4).copied() {
        Some(VERSION) => {}
        Some(other) => return Err(PersistError::UnsupportedVersion(other)),
        None => return Err(PersistError::Truncated),
    }
    let body = bytes.get(HEADER_LEN..).ok_or(PersistError::Truncated)?;
    let split = body.len().saturating_sub(CHECKSUM_LEN);
    let (payload, trailer) = body.split_at(split);
    let stored: [u8; CHECKSUM_LEN] = trailer.try_into().map_err(|_| PersistError::Truncated)?;
    if crc32fast::hash(payload) != u32::from_le_bytes(stored) {
        tracing::warn!("recovery record checksum mismatch");
        return Err(PersistError::ChecksumMismatch);
    }
    postcard::from_bytes(payload).map_err(PersistError::Postcard)
}
