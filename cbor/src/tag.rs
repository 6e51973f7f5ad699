/*!
Tagged items and bignums.

A tagged item is a tag number (major type 6, unsigned argument) followed
by exactly one nested item, which the tag exclusively owns. Bignums are
the tagged byte strings of RFC 8949 §3.4.3: tag 2 wraps a non-negative
arbitrary-precision integer as its big-endian minimal-length byte form
(empty means zero), tag 3 a negative one through the same `-1 - n`
transform the fixed-width codecs use.
*/

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Major};
use crate::string::Bytes;
use alloc::vec::Vec;
use braid_io::{Read, Write};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

pub(crate) const TAG_POS_BIGNUM: u64 = 2;
pub(crate) const TAG_NEG_BIGNUM: u64 = 3;

pub(crate) fn pull_tag<R: Read>(d: &mut Decoder<R>) -> Result<u64> {
    match d.pull_expect(Major::Tag)?.arg {
        Arg::Value(tag) => u64::try_from(tag).map_err(|_| Error::Overflow),
        Arg::Indefinite => Err(Error::InvalidIndefinite("tag")),
    }
}

/// Exact-tag codec: requires one specific tag number.
pub struct Tagged<C> {
    pub(crate) tag: u64,
    pub(crate) inner: C,
}

impl<C: Codec> Codec for Tagged<C> {
    type Item = C::Item;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Tag, self.tag)?;
        self.inner.encode(item, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let tag = pull_tag(d)?;
        if tag != self.tag {
            return Err(Error::IncorrectTag {
                expected: self.tag,
                found: tag,
            });
        }
        self.inner.decode(d)
    }
}

/// Any-tag codec: surfaces the tag number alongside the decoded item.
pub struct AnyTagged<C>(pub(crate) C);

impl<C: Codec> Codec for AnyTagged<C> {
    type Item = (u64, C::Item);

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Tag, item.0)?;
        self.0.encode(&item.1, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let tag = pull_tag(d)?;
        Ok((tag, self.0.decode(d)?))
    }
}

/// Arbitrary-precision integer codec over tag 2/3 byte strings.
pub struct Bignum;

impl Codec for Bignum {
    type Item = BigInt;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        let (tag, magnitude) = match item.sign() {
            Sign::Minus => (TAG_NEG_BIGNUM, item.magnitude().clone() - 1u32),
            _ => (TAG_POS_BIGNUM, item.magnitude().clone()),
        };
        e.emit_head(Major::Tag, tag)?;
        let bytes = if magnitude.is_zero() {
            Vec::new()
        } else {
            magnitude.to_bytes_be()
        };
        e.emit_head(Major::Bytes, bytes.len() as u64)?;
        e.extend(&bytes)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let negative = match pull_tag(d)? {
            TAG_POS_BIGNUM => false,
            TAG_NEG_BIGNUM => true,
            tag => return Err(Error::IncorrectBignumTag(tag)),
        };
        let magnitude = BigInt::from(BigUint::from_bytes_be(&Bytes.decode(d)?));
        if negative {
            Ok(BigInt::from(-1) - magnitude)
        } else {
            Ok(magnitude)
        }
    }
}
