use crate::serialize::SerializeError;
use serde::{Serialize, de::DeserializeOwned};
use std::panic::{AssertUnwindSafe, catch_unwind};

pub(super) fn encode<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    serde_cbor::to_vec(value).map_err(|e| SerializeError::Encode(e.to_string()))
}

// The length check runs before any parsing; a decoder panic on hostile
// input is reported as a decode error.
pub(super) fn decode<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::TooLarge {
            len: bytes.len(),
            max_bytes,
        });
    }

    catch_unwind(AssertUnwindSafe(|| serde_cbor::from_slice(bytes)))
        .map_err(|_| SerializeError::Decode("decoder panicked".to_string()))?
        .map_err(|e| SerializeError::Decode(e.to_string()))
}
