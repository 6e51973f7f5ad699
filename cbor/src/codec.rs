/*!
Composable codecs.

A [`Codec`] pairs an encode and a decode function for one decoded-value
shape. Codecs are built once at schema-definition time, by composing leaf
codecs with the builder methods below, and never mutated afterwards; the
per-call mutable state lives entirely in the [`Decoder`]/[`Encoder`]
cursors.
*/

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::seq::ArrayOf;
use crate::tag::{AnyTagged, Tagged};
use alloc::vec;
use braid_io::{Buffer, Read, Write};
use core::marker::PhantomData;

/// An encode/decode pair for one decoded-value shape.
///
/// Every decode consumes exactly one data item from the cursor; the tuple
/// groups in [`seq`](crate::seq) — fixed-length item runs with no header
/// of their own — are the one documented exception.
pub trait Codec {
    /// The decoded-value shape this codec reads and writes.
    type Item;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()>;

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item>;

    /// Ordered sequence of this codec's items, wire-framed as an array.
    fn array(self) -> ArrayOf<Self>
    where
        Self: Sized,
    {
        ArrayOf(self)
    }

    /// Accept the null singleton as an alternative to the inner item.
    fn nullable(self) -> Nullable<Self>
    where
        Self: Sized,
    {
        Nullable(self)
    }

    /// Require `tag` in front of the inner item.
    fn tagged(self, tag: u64) -> Tagged<Self>
    where
        Self: Sized,
    {
        Tagged { tag, inner: self }
    }

    /// Accept any tag in front of the inner item, surfacing its number.
    fn with_any_tag(self) -> AnyTagged<Self>
    where
        Self: Sized,
    {
        AnyTagged(self)
    }

    /// Try this codec first, then `other` from the same cursor position.
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        Self: Sized,
        B: Codec<Item = Self::Item>,
    {
        Or(self, other)
    }

    /// Re-target the codec through a fallible conversion pair:
    /// `from_wire` maps each decoded item outward, `into_wire` maps each
    /// item to encode back to the inner shape.
    fn try_map<T, F, G>(self, from_wire: F, into_wire: G) -> TryMap<Self, T, F, G>
    where
        Self: Sized,
        F: Fn(Self::Item) -> Result<T>,
        G: Fn(&T) -> Result<Self::Item>,
    {
        TryMap {
            inner: self,
            from_wire,
            into_wire,
            marker: PhantomData,
        }
    }

    /// Accept and produce exactly `value`.
    fn constant(self, value: Self::Item) -> Constant<Self>
    where
        Self: Sized,
        Self::Item: PartialEq + Clone,
    {
        Constant { inner: self, value }
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    type Item = C::Item;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        (**self).encode(item, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        (**self).decode(d)
    }
}

/// Inner item or the null singleton.
pub struct Nullable<C>(pub(crate) C);

impl<C: Codec> Codec for Nullable<C> {
    type Item = Option<C::Item>;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        match item {
            Some(item) => self.0.encode(item, e),
            None => e.push(0xF6),
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        if d.peek()? == 0xF6 {
            d.pull()?;
            Ok(None)
        } else {
            self.0.decode(d).map(Some)
        }
    }
}

/// First-match alternative over two codecs of the same item shape.
///
/// Decode tries the left codec, rolls the cursor back on failure, and
/// tries the right; if both fail the errors are aggregated into
/// [`Error::NoMatch`], flattening nested alternatives.
pub struct Or<A, B>(pub(crate) A, pub(crate) B);

fn aggregate(a: Error, b: Error) -> Error {
    let mut errors = match a {
        Error::NoMatch(errors) => errors,
        e => vec![e],
    };
    match b {
        Error::NoMatch(mut more) => errors.append(&mut more),
        e => errors.push(e),
    }
    Error::NoMatch(errors)
}

impl<A, B> Codec for Or<A, B>
where
    A: Codec,
    B: Codec<Item = A::Item>,
{
    type Item = A::Item;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        // Sinks cannot rewind, so each attempt runs against a scratch
        // buffer and only the winner reaches the real sink.
        let mut probe = Encoder::new(Buffer::new());
        match self.0.encode(item, &mut probe) {
            Ok(()) => {
                let probe = probe.into_sink();
                e.extend(probe.as_slice())
            }
            Err(first) => {
                let mut probe = Encoder::new(Buffer::new());
                match self.1.encode(item, &mut probe) {
                    Ok(()) => {
                        let probe = probe.into_sink();
                        e.extend(probe.as_slice())
                    }
                    Err(second) => Err(aggregate(first, second)),
                }
            }
        }
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let mark = d.mark();
        match self.0.decode(d) {
            Ok(item) => Ok(item),
            Err(first) => {
                d.rewind(mark);
                match self.1.decode(d) {
                    Ok(item) => Ok(item),
                    Err(second) => {
                        d.rewind(mark);
                        Err(aggregate(first, second))
                    }
                }
            }
        }
    }
}

/// Fallible conversion layered over an inner codec.
pub struct TryMap<C, T, F, G> {
    inner: C,
    from_wire: F,
    into_wire: G,
    marker: PhantomData<fn() -> T>,
}

impl<C, T, F, G> Codec for TryMap<C, T, F, G>
where
    C: Codec,
    F: Fn(C::Item) -> Result<T>,
    G: Fn(&T) -> Result<C::Item>,
{
    type Item = T;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        let inner = (self.into_wire)(item)?;
        self.inner.encode(&inner, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        (self.from_wire)(self.inner.decode(d)?)
    }
}

/// Exactly one admissible value.
pub struct Constant<C: Codec> {
    inner: C,
    value: C::Item,
}

impl<C: Codec> Codec for Constant<C>
where
    C::Item: PartialEq + Clone,
{
    type Item = C::Item;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        if *item != self.value {
            return Err(Error::IncorrectValue);
        }
        self.inner.encode(item, e)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        let item = self.inner.decode(d)?;
        if item != self.value {
            return Err(Error::IncorrectValue);
        }
        Ok(item)
    }
}
