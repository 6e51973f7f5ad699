use crate::error::{Error, Result};
use braid_io::{Error as _, Write};

/// Position-counting cursor over a byte sink.
///
/// Failures come only from the sink (for example a fixed-capacity
/// [`Window`](braid_io::Window) running out of room), never from the
/// codec itself.
pub struct Encoder<W> {
    sink: W,
    written: usize,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Number of bytes emitted so far.
    pub fn offset(&self) -> usize {
        self.written
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub(crate) fn push(&mut self, byte: u8) -> Result<()> {
        self.extend(&[byte])
    }

    pub(crate) fn extend(&mut self, mut bytes: &[u8]) -> Result<()> {
        while !bytes.is_empty() {
            let n = self
                .sink
                .write(bytes)
                .map_err(|e| Error::Io(e.kind()))?;
            if n == 0 {
                return Err(Error::SinkFull);
            }
            self.written += n;
            bytes = &bytes[n..];
        }
        Ok(())
    }
}
