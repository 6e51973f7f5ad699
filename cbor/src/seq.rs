/*!
Array, map, and record codecs.

Containers decode in both length regimes — definite (the argument counts
the items) and indefinite (items until a break) — and always encode the
definite form sized to the actual count. Within one decode all cursor
advancement happens in exact wire order; an element failure aborts the
whole decode with that error.
*/

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::Major;
use alloc::vec::Vec;
use braid_io::{Read, Write};
use core::hash::Hash;

/// Insertion-ordered map produced by [`MapOf`].
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, hashbrown::DefaultHashBuilder>;

/// Ordered sequence of one inner codec's items.
pub struct ArrayOf<C>(pub(crate) C);

impl<C: Codec> Codec for ArrayOf<C> {
    type Item = Vec<C::Item>;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Array, item.len() as u64)?;
        for element in item {
            self.0.encode(element, e)?;
        }
        Ok(())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let mut out = Vec::new();
        match d.pull_len(Major::Array)? {
            Some(n) => {
                for _ in 0..n {
                    out.push(self.0.decode(d)?);
                }
            }
            None => {
                while d.peek()? != 0xFF {
                    out.push(self.0.decode(d)?);
                }
                d.pull()?;
            }
        }
        Ok(out)
    }
}

/// Key/value mapping with one codec per side.
///
/// Decodes into an insertion-ordered map; a duplicate key overwrites the
/// earlier value rather than failing.
pub struct MapOf<K, V> {
    key: K,
    value: V,
}

pub fn map_of<K, V>(key: K, value: V) -> MapOf<K, V>
where
    K: Codec,
    V: Codec,
    K::Item: Hash + Eq,
{
    MapOf { key, value }
}

impl<K, V> Codec for MapOf<K, V>
where
    K: Codec,
    V: Codec,
    K::Item: Hash + Eq,
{
    type Item = OrderedMap<K::Item, V::Item>;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Map, item.len() as u64)?;
        for (k, v) in item {
            self.key.encode(k, e)?;
            self.value.encode(v, e)?;
        }
        Ok(())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let mut out = OrderedMap::default();
        match d.pull_len(Major::Map)? {
            Some(n) => {
                for _ in 0..n {
                    let k = self.key.decode(d)?;
                    let v = self.value.decode(d)?;
                    out.insert(k, v);
                }
            }
            None => {
                while d.peek()? != 0xFF {
                    let k = self.key.decode(d)?;
                    let v = self.value.decode(d)?;
                    out.insert(k, v);
                }
                d.pull()?;
            }
        }
        Ok(out)
    }
}

/// A fixed-length run of heterogeneous items with no enclosing header.
///
/// Tuples of codecs implement `Group` (and [`Codec`] itself, as the
/// documented multi-item exception) so that a heterogeneous array can be
/// decoded field by field via [`record`].
pub trait Group {
    type Items;

    /// Number of fields in the run.
    fn arity(&self) -> usize;

    fn encode_items<W: Write>(&self, items: &Self::Items, e: &mut Encoder<W>) -> Result<()>;

    fn decode_items<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Items>;
}

macro_rules! impl_group {
    ($len:literal => $($c:ident / $i:tt),+) => {
        impl<$($c: Codec),+> Group for ($($c,)+) {
            type Items = ($($c::Item,)+);

            fn arity(&self) -> usize {
                $len
            }

            fn encode_items<W: Write>(&self, items: &Self::Items, e: &mut Encoder<W>) -> Result<()> {
                $(self.$i.encode(&items.$i, e)?;)+
                Ok(())
            }

            fn decode_items<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Items> {
                Ok(($(self.$i.decode(d)?,)+))
            }
        }

        impl<$($c: Codec),+> Codec for ($($c,)+) {
            type Item = ($($c::Item,)+);

            fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
                self.encode_items(item, e)
            }

            fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
                self.decode_items(d)
            }
        }
    };
}

impl_group!(1 => A / 0);
impl_group!(2 => A / 0, B / 1);
impl_group!(3 => A / 0, B / 1, C / 2);
impl_group!(4 => A / 0, B / 1, C / 2, D / 3);
impl_group!(5 => A / 0, B / 1, C / 2, D / 3, E / 4);
impl_group!(6 => A / 0, B / 1, C / 2, D / 3, E / 4, F / 5);
impl_group!(7 => A / 0, B / 1, C / 2, D / 3, E / 4, F / 5, G / 6);
impl_group!(8 => A / 0, B / 1, C / 2, D / 3, E / 4, F / 5, G / 6, H / 7);

/// Array-framed record: a tuple of field codecs behind one array header.
pub struct Record<G> {
    fields: G,
}

pub fn record<G: Group>(fields: G) -> Record<G> {
    Record { fields }
}

impl<G: Group> Codec for Record<G> {
    type Item = G::Items;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Array, self.fields.arity() as u64)?;
        self.fields.encode_items(item, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        match d.pull_len(Major::Array)? {
            Some(n) if n == self.fields.arity() => self.fields.decode_items(d),
            Some(n) => Err(Error::IncorrectLength {
                expected: self.fields.arity(),
                found: n,
            }),
            None => {
                let items = self.fields.decode_items(d)?;
                if d.peek()? != 0xFF {
                    return Err(Error::AdditionalItems);
                }
                d.pull()?;
                Ok(items)
            }
        }
    }
}
