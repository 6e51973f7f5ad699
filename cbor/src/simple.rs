//! Singleton codecs: the reserved simple values 20–23 and the unassigned
//! remainder of the simple-value space.

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Major};
use braid_io::{Read, Write};

pub struct Bool;
pub struct Null;
pub struct Undefined;

/// Unassigned simple values.
///
/// 20–23 decode as their own types ([`Bool`], [`Null`], [`Undefined`])
/// and are rejected here, as are 24–31, which have no well-formed
/// encoding.
pub struct Simple;

macro_rules! impl_singleton_codec {
    ($($name:ident => $value:literal / $label:literal),* $(,)?) => {$(
        impl Codec for $name {
            type Item = ();

            fn encode<W: Write>(&self, _item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
                e.push(Major::Simple.bits() | $value)
            }

            fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
                let at = d.offset();
                let head = d.pull_head()?;
                match (head.major, head.info) {
                    (Major::Simple, $value) => Ok(()),
                    _ => Err(Error::IncorrectType {
                        expected: $label,
                        found: head.name(),
                        offset: at,
                    }),
                }
            }
        }
    )*};
}

impl_singleton_codec!(Null => 22 / "null", Undefined => 23 / "undefined");

impl Codec for Bool {
    type Item = bool;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.push(Major::Simple.bits() | if *item { 21 } else { 20 })
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let at = d.offset();
        let head = d.pull_head()?;
        match (head.major, head.info) {
            (Major::Simple, 20) => Ok(false),
            (Major::Simple, 21) => Ok(true),
            _ => Err(Error::IncorrectType {
                expected: "bool",
                found: head.name(),
                offset: at,
            }),
        }
    }
}

impl Codec for Simple {
    type Item = u8;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        match *item {
            20..=23 => Err(Error::IncorrectValue),
            24..=31 => Err(Error::InvalidSimple(*item)),
            v if v < 24 => e.push(Major::Simple.bits() | v),
            v => {
                e.push(Major::Simple.bits() | 24)?;
                e.push(v)
            }
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let at = d.offset();
        let head = d.pull_head()?;
        match (head.major, head.info, head.arg) {
            (Major::Simple, v @ 0..=19, _) => Ok(v),
            (Major::Simple, 24, Arg::Value(v)) => Ok(v as u8),
            _ => Err(Error::IncorrectType {
                expected: "simple value",
                found: head.name(),
                offset: at,
            }),
        }
    }
}
