/*!
Portable byte source and sink traits for streaming codecs.

A codec reads from anything implementing [`Read`] and writes to anything
implementing [`Write`]; this crate re-exports those traits from
`embedded-io` and provides the in-memory implementations a codec and its
tests commonly need.
*/
#![no_std]

extern crate alloc;

use alloc::vec::Vec;

pub use embedded_io::{Error, ErrorKind, ErrorType, Read, Write};

/// Error returned by [`Window`] when the backing slice is out of room.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Fixed-capacity window is full")]
pub struct Full;

impl Error for Full {
    fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

/// Growable in-memory byte sink.
///
/// Backed by a `Vec<u8>`, so repeated writes grow the allocation by
/// amortized doubling. Writes are infallible.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl ErrorType for Buffer {
    type Error = core::convert::Infallible;
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Fixed-capacity byte sink over a caller-provided slice.
///
/// Writes fill the slice front to back and fail with [`Full`] once no
/// room remains.
#[derive(Debug)]
pub struct Window<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Window<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The written prefix of the backing slice.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl ErrorType for Window<'_> {
    type Error = Full;
}

impl Write for Window<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let room = self.buf.len() - self.len;
        if room == 0 && !buf.is_empty() {
            return Err(Full);
        }
        let n = buf.len().min(room);
        self.buf[self.len..self.len + n].copy_from_slice(&buf[..n]);
        self.len += n;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Byte-budget adapter over any [`Read`] source.
///
/// Reports end-of-input once `budget` bytes have been handed out, leaving
/// the inner source wherever it stands. Lets a caller bound how much input
/// a decode may consume.
#[derive(Debug)]
pub struct Limited<R> {
    inner: R,
    remaining: usize,
}

impl<R> Limited<R> {
    pub fn new(inner: R, budget: usize) -> Self {
        Self {
            inner,
            remaining: budget,
        }
    }

    /// Unspent budget in bytes.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ErrorType> ErrorType for Limited<R> {
    type Error = R::Error;
}

impl<R: Read> Read for Limited<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let n = buf.len().min(self.remaining);
        let got = self.inner.read(&mut buf[..n])?;
        self.remaining -= got;
        Ok(got)
    }
}
