//! CBOR encoding for snapshots and counter reports.
//!
//! Format only: nothing here knows about schemas or instances. Decoding is
//! always size-bounded; [`deserialize`] applies [`MAX_SNAPSHOT_BYTES`].

mod cbor;

use crate::MAX_SNAPSHOT_BYTES;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SerializeError {
    #[error("cbor decode failed: {0}")]
    Decode(String),

    #[error("cbor encode failed: {0}")]
    Encode(String),

    #[error("payload of {len} bytes exceeds the {max_bytes}-byte limit")]
    TooLarge { len: usize, max_bytes: usize },
}

impl SerializeError {
    /// True for failures caused by the input bytes rather than the value.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::TooLarge { .. })
    }
}

/// Encode a value as CBOR.
pub fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    cbor::encode(value)
}

/// Decode a value, rejecting payloads over [`MAX_SNAPSHOT_BYTES`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    cbor::decode(bytes, MAX_SNAPSHOT_BYTES)
}

/// Decode a value under a caller-chosen size limit.
pub fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    cbor::decode(bytes, max_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::{EventOps, event_report, event_reset_all};

    #[test]
    fn oversized_payload_is_rejected_before_decode() {
        let bytes = serialize(&vec![0u8; 64]).expect("encode");
        let err = deserialize_bounded::<Vec<u8>>(&bytes, 8).expect_err("limit should trip");

        assert!(matches!(err, SerializeError::TooLarge { max_bytes: 8, .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = deserialize::<Vec<String>>(&[0xff, 0x00, 0x13]).expect_err("garbage");

        assert!(matches!(err, SerializeError::Decode(_)));
    }

    #[test]
    fn counter_reports_survive_encoding() {
        event_reset_all();
        let report = event_report();

        let bytes = serialize(&report.ops).expect("encode");
        let decoded: EventOps = deserialize(&bytes).expect("decode");

        assert_eq!(decoded, report.ops);
    }
}
