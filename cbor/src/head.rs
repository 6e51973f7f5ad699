/*!
Marker-byte and argument codec.

Every data item opens with a marker byte: a three-bit major type and a
five-bit additional-information field. Additional information below 24 is
the argument itself; 24–27 select a 1/2/4/8-byte big-endian trailing
argument; 31 is the indefinite-length (or break) marker. This crate also
reads and writes a non-standard 16-byte trailing form under additional
information 28, which carries arguments above `u64::MAX`; 29 and 30 stay
reserved.
*/

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use braid_io::{Read, Write};

/// CBOR major type: the top three bits of a marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Major {
    Unsigned = 0,
    Negative = 1,
    Bytes = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl Major {
    pub(crate) fn of(marker: u8) -> Self {
        match marker >> 5 {
            0 => Self::Unsigned,
            1 => Self::Negative,
            2 => Self::Bytes,
            3 => Self::Text,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }

    pub(crate) fn bits(self) -> u8 {
        (self as u8) << 5
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned integer",
            Self::Negative => "negative integer",
            Self::Bytes => "byte string",
            Self::Text => "text string",
            Self::Array => "array",
            Self::Map => "map",
            Self::Tag => "tag",
            Self::Simple => "simple value",
        }
    }
}

/// Marker argument: a definite unsigned value or the indefinite-length
/// marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Value(u128),
    Indefinite,
}

/// One decoded marker byte and its argument.
///
/// For major type 7 the trailing bytes (simple value or float payload)
/// are read as the argument value; `info` keeps the raw additional
/// information so float and simple codecs can tell the regimes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub major: Major,
    pub info: u8,
    pub arg: Arg,
}

impl Head {
    /// Human name of the item this head introduces, for error reporting.
    pub fn name(&self) -> &'static str {
        match (self.major, self.info) {
            (Major::Simple, 20 | 21) => "bool",
            (Major::Simple, 22) => "null",
            (Major::Simple, 23) => "undefined",
            (Major::Simple, 25) => "half-precision float",
            (Major::Simple, 26) => "single-precision float",
            (Major::Simple, 27) => "double-precision float",
            (Major::Simple, 31) => "break",
            (major, _) => major.name(),
        }
    }
}

impl<R: Read> Decoder<R> {
    fn pull_be(&mut self, n: usize) -> Result<u128> {
        let mut v = 0u128;
        for _ in 0..n {
            v = (v << 8) | self.pull()? as u128;
        }
        Ok(v)
    }

    /// Read one marker byte and its trailing argument.
    pub fn pull_head(&mut self) -> Result<Head> {
        let marker = self.pull()?;
        let major = Major::of(marker);
        let info = marker & 0x1F;
        let arg = match info {
            0..=23 => Arg::Value(info as u128),
            24 => Arg::Value(self.pull_be(1)?),
            25 => Arg::Value(self.pull_be(2)?),
            26 => Arg::Value(self.pull_be(4)?),
            27 => Arg::Value(self.pull_be(8)?),
            28 if major != Major::Simple => Arg::Value(self.pull_be(16)?),
            31 => Arg::Indefinite,
            _ => return Err(Error::ReservedAdditional(info)),
        };
        // The two-byte form is only well-formed for values 32 and up.
        if let (Major::Simple, 24, Arg::Value(v)) = (major, info, arg) {
            if v < 32 {
                return Err(Error::InvalidSimple(v as u8));
            }
        }
        Ok(Head { major, info, arg })
    }

    /// Read a head, requiring `want` as its major type.
    pub fn pull_expect(&mut self, want: Major) -> Result<Head> {
        let at = self.offset();
        let head = self.pull_head()?;
        if head.major != want {
            return Err(Error::IncorrectType {
                expected: want.name(),
                found: head.name(),
                offset: at,
            });
        }
        Ok(head)
    }

    /// Read a container length: `Some(count)` for the definite form,
    /// `None` for indefinite.
    pub(crate) fn pull_len(&mut self, want: Major) -> Result<Option<usize>> {
        match self.pull_expect(want)?.arg {
            Arg::Value(n) => Ok(Some(usize::try_from(n).map_err(|_| Error::Overflow)?)),
            Arg::Indefinite => Ok(None),
        }
    }
}

impl<W: Write> Encoder<W> {
    /// Emit a marker and argument in the shortest standard form.
    pub fn emit_head(&mut self, major: Major, value: u64) -> Result<()> {
        if value < 24 {
            self.push(major.bits() | value as u8)
        } else if value <= u8::MAX as u64 {
            self.push(major.bits() | 24)?;
            self.push(value as u8)
        } else if value <= u16::MAX as u64 {
            self.push(major.bits() | 25)?;
            self.extend(&(value as u16).to_be_bytes())
        } else if value <= u32::MAX as u64 {
            self.push(major.bits() | 26)?;
            self.extend(&(value as u32).to_be_bytes())
        } else {
            self.push(major.bits() | 27)?;
            self.extend(&value.to_be_bytes())
        }
    }

    /// Emit a marker and argument, using the 16-byte extension form for
    /// values above `u64::MAX`.
    pub fn emit_wide_head(&mut self, major: Major, value: u128) -> Result<()> {
        match u64::try_from(value) {
            Ok(value) => self.emit_head(major, value),
            Err(_) => {
                self.push(major.bits() | 28)?;
                self.extend(&value.to_be_bytes())
            }
        }
    }

    /// Open an indefinite-length item of `major`.
    pub fn emit_indefinite(&mut self, major: Major) -> Result<()> {
        self.push(major.bits() | 31)
    }

    /// Close the innermost indefinite-length item.
    pub fn emit_break(&mut self) -> Result<()> {
        self.push(0xFF)
    }
}
