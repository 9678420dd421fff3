//! Decode-time errors for the tagged `Link` word.

/// The only way decoding a raw `u64` can fail: the 4-bit tag field holds a
/// value outside the ten enumerated [`crate::Tag`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("tag value {0} is outside the enumerated tag set")]
    InvalidTag(u8),
}
