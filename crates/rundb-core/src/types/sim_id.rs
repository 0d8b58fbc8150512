use derive_more::{Deref, Display, FromStr};
use serde::{Deserialize, Serialize, de::Deserializer, ser::Serializer};
use thiserror::Error as ThisError;
use ulid::Ulid as WrappedUlid;

///
/// SimIdDecodeError
///

#[derive(Debug, ThisError)]
pub enum SimIdDecodeError {
    #[error("invalid sim id length: {len} bytes")]
    InvalidSize { len: usize },
}

///
/// SimId
///
/// Identity of one simulation run. Every row a backend emits belongs to
/// exactly one SimId; a federated database requires all member backends to
/// agree on it.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct SimId(WrappedUlid);

impl SimId {
    pub const STORED_SIZE: u32 = 16;

    #[must_use]
    pub const fn nil() -> Self {
        Self(WrappedUlid::nil())
    }

    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(WrappedUlid::from_parts(timestamp_ms, random))
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUlid::from_bytes(bytes))
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_bytes()
    }

    pub const fn try_from_bytes(bytes: &[u8]) -> Result<Self, SimIdDecodeError> {
        if bytes.len() != Self::STORED_SIZE as usize {
            return Err(SimIdDecodeError::InvalidSize { len: bytes.len() });
        }

        let mut array = [0u8; 16];
        let mut i = 0;
        while i < array.len() {
            array[i] = bytes[i];
            i += 1;
        }

        Ok(Self::from_bytes(array))
    }
}

impl From<WrappedUlid> for SimId {
    fn from(ulid: WrappedUlid) -> Self {
        Self(ulid)
    }
}

// Stored and shipped as the raw 16-byte representation, not the base32 text
// form; snapshots stay byte-stable across ulid crate versions.
impl Serialize for SimId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for SimId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = serde_bytes::ByteBuf::deserialize(deserializer)?;
        Self::try_from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
