/*!
IEEE-754 float codecs.

Three independent fixed-width codecs; floats wire at their declared width
only, with no narrowing or widening on either side. Half-precision encode
narrows with round-ties-to-even (the `half` crate's conversion, covering
the subnormal regime and underflow to signed zero), rejects magnitudes
beyond ±65504, and canonicalizes NaN and infinity payloads to the usual
fixed bit patterns.
*/

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Head, Major};
use braid_io::{Read, Write};
use half::f16;

pub struct Float16;
pub struct Float32;
pub struct Float64;

/// Largest finite half-precision magnitude.
const F16_MAX: f32 = 65504.0;

impl Codec for Float16 {
    type Item = f32;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        let v = *item;
        let bits = if v.is_nan() {
            f16::NAN.to_bits()
        } else if v == f32::INFINITY {
            f16::INFINITY.to_bits()
        } else if v == f32::NEG_INFINITY {
            f16::NEG_INFINITY.to_bits()
        } else if v > F16_MAX {
            return Err(Error::Overflow);
        } else if v < -F16_MAX {
            return Err(Error::Underflow);
        } else {
            f16::from_f32(v).to_bits()
        };
        e.push(Major::Simple.bits() | 25)?;
        e.extend(&bits.to_be_bytes())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let at = d.offset();
        match d.pull_head()? {
            Head {
                major: Major::Simple,
                info: 25,
                arg: Arg::Value(bits),
            } => Ok(f16::from_bits(bits as u16).to_f32()),
            head => Err(Error::IncorrectType {
                expected: "half-precision float",
                found: head.name(),
                offset: at,
            }),
        }
    }
}

impl Codec for Float32 {
    type Item = f32;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.push(Major::Simple.bits() | 26)?;
        e.extend(&item.to_be_bytes())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let at = d.offset();
        match d.pull_head()? {
            Head {
                major: Major::Simple,
                info: 26,
                arg: Arg::Value(bits),
            } => Ok(f32::from_bits(bits as u32)),
            head => Err(Error::IncorrectType {
                expected: "single-precision float",
                found: head.name(),
                offset: at,
            }),
        }
    }
}

impl Codec for Float64 {
    type Item = f64;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.push(Major::Simple.bits() | 27)?;
        e.extend(&item.to_be_bytes())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let at = d.offset();
        match d.pull_head()? {
            Head {
                major: Major::Simple,
                info: 27,
                arg: Arg::Value(bits),
            } => Ok(f64::from_bits(bits as u64)),
            head => Err(Error::IncorrectType {
                expected: "double-precision float",
                found: head.name(),
                offset: at,
            }),
        }
    }
}
