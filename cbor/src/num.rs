/*!
Integer codecs.

All unsigned widths share one decode path: read the argument, then
range-check against the target, so any narrower wire width is accepted
into a wider target. Negative integers wire the magnitude of `-1 - n`
under major type 1; the transform promotes across the machine-integer
boundary instead of wrapping. Encode always picks the canonical minimal
argument width, reaching for the 16-byte extension form only above
`u64::MAX`.
*/

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Major};
use braid_io::{Read, Write};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

pub struct UInt8;
pub struct UInt16;
pub struct UInt32;
pub struct UInt64;
pub struct UInt128;

pub struct Int8;
pub struct Int16;
pub struct Int32;
pub struct Int64;
pub struct Int128;

/// Arbitrary-width unsigned integer over major type 0.
pub struct UBig;

/// Arbitrary-width integer over major types 0 and 1.
pub struct IBig;

impl Codec for UInt64 {
    type Item = u64;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Unsigned, *item)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        match d.pull_expect(Major::Unsigned)?.arg {
            Arg::Value(v) => u64::try_from(v).map_err(|_| Error::Overflow),
            Arg::Indefinite => Err(Error::InvalidIndefinite("unsigned integer")),
        }
    }
}

impl Codec for UInt128 {
    type Item = u128;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_wide_head(Major::Unsigned, *item)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        match d.pull_expect(Major::Unsigned)?.arg {
            Arg::Value(v) => Ok(v),
            Arg::Indefinite => Err(Error::InvalidIndefinite("unsigned integer")),
        }
    }
}

macro_rules! impl_uint_codec {
    ($($name:ident => $ty:ty),* $(,)?) => {$(
        impl Codec for $name {
            type Item = $ty;

            fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
                e.emit_head(Major::Unsigned, *item as u64)
            }

            fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
                let v = UInt64.decode(d)?;
                <$ty>::try_from(v).map_err(|_| Error::Overflow)
            }
        }
    )*};
}

impl_uint_codec!(UInt8 => u8, UInt16 => u16, UInt32 => u32);

/// Split an integer head into its sign and the wire magnitude: the value
/// itself for major type 0, the magnitude of `-1 - n` for major type 1.
fn pull_int<R: Read>(d: &mut Decoder<R>) -> Result<(bool, u128)> {
    let at = d.offset();
    let head = d.pull_head()?;
    let negative = match head.major {
        Major::Unsigned => false,
        Major::Negative => true,
        _ => {
            return Err(Error::IncorrectType {
                expected: "integer",
                found: head.name(),
                offset: at,
            });
        }
    };
    match head.arg {
        Arg::Value(v) => Ok((negative, v)),
        Arg::Indefinite => Err(Error::InvalidIndefinite("integer")),
    }
}

impl Codec for Int64 {
    type Item = i64;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        if *item >= 0 {
            e.emit_head(Major::Unsigned, *item as u64)
        } else {
            e.emit_head(Major::Negative, (-1 - *item) as u64)
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let (negative, magnitude) = pull_int(d)?;
        if negative {
            let magnitude = i64::try_from(magnitude).map_err(|_| Error::Underflow)?;
            Ok(-1 - magnitude)
        } else {
            i64::try_from(magnitude).map_err(|_| Error::Overflow)
        }
    }
}

impl Codec for Int128 {
    type Item = i128;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        if *item >= 0 {
            e.emit_wide_head(Major::Unsigned, *item as u128)
        } else {
            e.emit_wide_head(Major::Negative, (-1 - *item) as u128)
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let (negative, magnitude) = pull_int(d)?;
        if negative {
            let magnitude = i128::try_from(magnitude).map_err(|_| Error::Underflow)?;
            Ok(-1 - magnitude)
        } else {
            i128::try_from(magnitude).map_err(|_| Error::Overflow)
        }
    }
}

macro_rules! impl_int_codec {
    ($($name:ident => $ty:ty),* $(,)?) => {$(
        impl Codec for $name {
            type Item = $ty;

            fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
                Int64.encode(&(*item as i64), e)
            }

            fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
                let v = Int64.decode(d)?;
                <$ty>::try_from(v).map_err(|_| if v < 0 {
                    Error::Underflow
                } else {
                    Error::Overflow
                })
            }
        }
    )*};
}

impl_int_codec!(Int8 => i8, Int16 => i16, Int32 => i32);

impl Codec for UBig {
    type Item = BigUint;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        let v = item.to_u128().ok_or(Error::Overflow)?;
        e.emit_wide_head(Major::Unsigned, v)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        match d.pull_expect(Major::Unsigned)?.arg {
            Arg::Value(v) => Ok(BigUint::from(v)),
            Arg::Indefinite => Err(Error::InvalidIndefinite("unsigned integer")),
        }
    }
}

impl Codec for IBig {
    type Item = BigInt;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        match item.sign() {
            Sign::Minus => {
                // Wire magnitude of -1 - n is |n| - 1.
                let magnitude = item.magnitude().clone() - 1u32;
                let v = magnitude.to_u128().ok_or(Error::Underflow)?;
                e.emit_wide_head(Major::Negative, v)
            }
            _ => {
                let v = item.to_u128().ok_or(Error::Overflow)?;
                e.emit_wide_head(Major::Unsigned, v)
            }
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let (negative, magnitude) = pull_int(d)?;
        let magnitude = BigInt::from(magnitude);
        if negative {
            Ok(BigInt::from(-1) - magnitude)
        } else {
            Ok(magnitude)
        }
    }
}
