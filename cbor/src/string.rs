/*!
Byte string and text string codecs.

Decode accepts both the definite form (the argument counts the body
bytes) and the indefinite form (definite chunks of the same major type
until a break); encode always emits the definite form sized to the
actual payload. Text chunks are validated as UTF-8 individually, so a
chunk boundary may not split a code point.
*/

use crate::codec::Codec;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Major};
use alloc::string::String;
use alloc::vec::Vec;
use braid_io::{Read, Write};

pub struct Bytes;
pub struct Text;

fn pull_definite<R: Read>(d: &mut Decoder<R>, n: usize, utf8: bool) -> Result<Vec<u8>> {
    let bytes = d.pull_exact(n)?;
    if utf8 && core::str::from_utf8(&bytes).is_err() {
        return Err(Error::InvalidUtf8);
    }
    Ok(bytes)
}

fn pull_string<R: Read>(d: &mut Decoder<R>, major: Major, utf8: bool) -> Result<Vec<u8>> {
    match d.pull_len(major)? {
        Some(n) => pull_definite(d, n, utf8),
        None => {
            let mut out = Vec::new();
            loop {
                if d.peek()? == 0xFF {
                    d.pull()?;
                    break Ok(out);
                }
                let head = d.pull_head()?;
                match (head.major == major, head.arg) {
                    (true, Arg::Value(n)) => {
                        let n = usize::try_from(n).map_err(|_| Error::Overflow)?;
                        out.extend_from_slice(&pull_definite(d, n, utf8)?);
                    }
                    _ => break Err(Error::InvalidChunk),
                }
            }
        }
    }
}

impl Codec for Bytes {
    type Item = Vec<u8>;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Bytes, item.len() as u64)?;
        e.extend(item)
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        pull_string(d, Major::Bytes, false)
    }
}

impl Codec for Text {
    type Item = String;

    fn encode<W: Write>(&self, item: &Self::Item, e: &mut Encoder<W>) -> Result<()> {
        e.emit_head(Major::Text, item.len() as u64)?;
        e.extend(item.as_bytes())
    }

    fn decode<R: Read>(&self, d: &mut Decoder<R>) -> Result<Self::Item> {
        String::from_utf8(pull_string(d, Major::Text, true)?).map_err(|_| Error::InvalidUtf8)
    }
}
