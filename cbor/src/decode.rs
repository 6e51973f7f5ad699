use crate::error::{Error, Result};
use alloc::vec::Vec;
use braid_io::{Error as _, Read};

const REFILL: usize = 256;

/// Buffered, position-counting cursor over a byte source.
///
/// Consumed bytes stay buffered for the lifetime of the decoder so that a
/// backtracking combinator can [`rewind`](Decoder::rewind) to any earlier
/// [`mark`](Decoder::mark). A decoder exclusively owns its position and
/// refill buffer; nested codec calls share it by reference.
pub struct Decoder<R> {
    source: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Current position, for a later [`rewind`](Decoder::rewind).
    pub fn mark(&self) -> usize {
        self.pos
    }

    /// Roll the cursor back to a position previously returned by
    /// [`mark`](Decoder::mark).
    pub fn rewind(&mut self, mark: usize) {
        debug_assert!(mark <= self.pos);
        self.pos = mark;
    }

    /// Buffer at least `want` unread bytes, refilling from the source as
    /// needed. Short reads are retried, so a logical n-byte read never
    /// comes up short unless the source is exhausted.
    fn fill(&mut self, want: usize) -> Result<()> {
        while self.buf.len() - self.pos < want {
            let mut chunk = [0u8; REFILL];
            let n = self
                .source
                .read(&mut chunk)
                .map_err(|e| Error::Io(e.kind()))?;
            if n == 0 {
                return Err(Error::NotEnoughData);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
        Ok(())
    }

    /// True once the buffer is drained and the source has no more bytes.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        if self.pos < self.buf.len() {
            return Ok(false);
        }
        let mut chunk = [0u8; REFILL];
        let n = self
            .source
            .read(&mut chunk)
            .map_err(|e| Error::Io(e.kind()))?;
        self.buf.extend_from_slice(&chunk[..n]);
        Ok(n == 0)
    }

    pub(crate) fn pull(&mut self) -> Result<u8> {
        self.fill(1)?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Next byte without advancing.
    pub(crate) fn peek(&mut self) -> Result<u8> {
        self.fill(1)?;
        Ok(self.buf[self.pos])
    }

    /// Read exactly `n` bytes into a fresh buffer.
    pub(crate) fn pull_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        self.fill(n)?;
        let out = self.buf[self.pos..self.pos + n].to_vec();
        self.pos += n;
        Ok(out)
    }

    /// Advance past `n` bytes without copying them out.
    pub(crate) fn advance(&mut self, n: usize) -> Result<()> {
        self.fill(n)?;
        self.pos += n;
        Ok(())
    }
}
