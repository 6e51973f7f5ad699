/*!
RFC 8949 CBOR wire codec with composable typed combinators.

Leaf codecs cover the CBOR shapes (integers, floats, strings, simple
values, tags, bignums); the [`Codec`] trait composes them into decoders
and encoders for nested application schemas. Any well-formed encoding is
accepted on input; output always uses the canonical minimal argument
width and definite-length containers.
*/
#![no_std]

extern crate alloc;

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod float;
pub mod head;
pub mod num;
pub mod seq;
pub mod simple;
pub mod string;
pub mod tag;

mod skip;


#[cfg(test)]
mod decode_tests;



pub use codec::Codec;
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};

use alloc::vec::Vec;

/// Decode one item from the front of `data`.
pub fn decode<C: Codec>(codec: &C, data: &[u8]) -> Result<C::Item> {
    let mut decoder = Decoder::new(data);
    codec.decode(&mut decoder)
}

/// Decode one item from the front of `data`, returning the item and the
/// number of bytes consumed.
pub fn decode_prefix<C: Codec>(codec: &C, data: &[u8]) -> Result<(C::Item, usize)> {
    let mut decoder = Decoder::new(data);
    let item = codec.decode(&mut decoder)?;
    Ok((item, decoder.offset()))
}

/// Encode one item into a fresh buffer.
pub fn encode<C: Codec>(codec: &C, item: &C::Item) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(braid_io::Buffer::new());
    codec.encode(item, &mut encoder)?;
    Ok(encoder.into_sink().into_vec())
}
