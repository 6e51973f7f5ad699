use alloc::vec::Vec;
use thiserror::Error;

/// Decode and encode failure taxonomy.
///
/// Every primitive and combinator returns its outcome as a value; nothing
/// in the crate unwinds across a codec boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes were available than the encoded item requires.
    #[error("Not enough data for encoded item")]
    NotEnoughData,

    /// Reserved additional-information value in a marker byte.
    #[error("Reserved additional-information value {0}")]
    ReservedAdditional(u8),

    /// Indefinite length where only a definite argument is legal.
    #[error("Indefinite length is not valid for {0}")]
    InvalidIndefinite(&'static str),

    /// A chunk of an indefinite-length string was not a definite string of
    /// the same kind.
    #[error("Invalid chunk in indefinite-length string")]
    InvalidChunk,

    /// Text string body is not valid UTF-8.
    #[error("Text string is not valid UTF-8")]
    InvalidUtf8,

    /// Two-byte encoding of a simple value below 32.
    #[error("Invalid two-byte encoding of simple value {0}")]
    InvalidSimple(u8),

    /// Break marker outside an indefinite-length item.
    #[error("Unexpected break marker at offset {0}")]
    UnexpectedBreak(usize),

    /// Well-formed item of the wrong shape for the running codec.
    #[error("Expected {expected}, found {found} at offset {offset}")]
    IncorrectType {
        expected: &'static str,
        found: &'static str,
        offset: usize,
    },

    /// Value above the target numeric range.
    #[error("Value does not fit in the target numeric range")]
    Overflow,

    /// Value below the target numeric range.
    #[error("Negative value below the target numeric range")]
    Underflow,

    /// Tagged item carried a different tag than the codec requires.
    #[error("Expected tag {expected}, found tag {found}")]
    IncorrectTag { expected: u64, found: u64 },

    /// Tag that does not introduce a bignum.
    #[error("Tag {0} is not a bignum tag")]
    IncorrectBignumTag(u64),

    /// In-range value failing a codec-specific semantic check.
    #[error("Value does not match the required constant")]
    IncorrectValue,

    /// Record with the wrong number of fields.
    #[error("Expected {expected} items, found {found}")]
    IncorrectLength { expected: usize, found: usize },

    /// Items left over after the final field of a record.
    #[error("Additional items after the final field of a record")]
    AdditionalItems,

    /// Every alternative of an `or` combinator failed; one error per
    /// candidate, in order.
    #[error("No alternative matched")]
    NoMatch(Vec<Error>),

    /// Sink accepted no further bytes.
    #[error("Sink refused additional bytes")]
    SinkFull,

    /// Source or sink collaborator failure.
    #[error("I/O error: {0:?}")]
    Io(braid_io::ErrorKind),
}

pub type Result<T> = core::result::Result<T, Error>;
