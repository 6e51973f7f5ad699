/*!
Position-only traversal of one data item.

Skipping flattens homogeneous runs of pending work into two scalar
shapes: a count of definite items still owed, or a count of break
markers still owed for open indefinite containers. Opening a container
of the active run's kind folds into that run's counter; opening the
other kind suspends the run on an explicit stack and starts a fresh one,
so memory grows only with the number of definite/indefinite alternations
(bounded by nesting depth).
*/

use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::head::{Arg, Major};
use alloc::vec::Vec;
use braid_io::Read;

/// One homogeneous run of pending work.
#[derive(Clone, Copy)]
enum Run {
    /// Definite items still owed.
    Definite(u128),
    /// Break markers still owed.
    Indefinite(u128),
}

fn consume(run: &mut Run) {
    if let Run::Definite(remaining) = run {
        *remaining -= 1;
    }
}

fn open_definite(run: &mut Run, stack: &mut Vec<Run>, items: u128) -> Result<()> {
    match run {
        Run::Definite(remaining) => {
            *remaining = (*remaining - 1)
                .checked_add(items)
                .ok_or(Error::Overflow)?;
        }
        Run::Indefinite(_) => {
            stack.push(*run);
            *run = Run::Definite(items);
        }
    }
    Ok(())
}

fn open_indefinite(run: &mut Run, stack: &mut Vec<Run>) {
    match run {
        Run::Indefinite(owed) => *owed += 1,
        Run::Definite(remaining) => {
            *remaining -= 1;
            if *remaining > 0 {
                stack.push(*run);
            }
            *run = Run::Indefinite(1);
        }
    }
}

impl<R: Read> Decoder<R> {
    /// Advance past exactly one well-formed data item, nested contents
    /// included, without building a value. The cursor ends at the same
    /// position a full decode of the item would reach.
    pub fn skip(&mut self) -> Result<()> {
        let mut run = Run::Definite(1);
        let mut stack: Vec<Run> = Vec::new();
        loop {
            if let Run::Definite(0) | Run::Indefinite(0) = run {
                match stack.pop() {
                    Some(suspended) => run = suspended,
                    None => return Ok(()),
                }
                continue;
            }
            let at = self.offset();
            let head = self.pull_head()?;
            match (head.major, head.arg) {
                // Break closes the innermost indefinite container.
                (Major::Simple, Arg::Indefinite) => match &mut run {
                    Run::Indefinite(owed) => *owed -= 1,
                    Run::Definite(_) => return Err(Error::UnexpectedBreak(at)),
                },
                // Scalars: the argument (and any float/simple payload) is
                // already consumed by the head read.
                (Major::Unsigned | Major::Negative | Major::Simple, Arg::Value(_)) => {
                    consume(&mut run)
                }
                (Major::Unsigned | Major::Negative, Arg::Indefinite) => {
                    return Err(Error::InvalidIndefinite("integer"));
                }
                (Major::Bytes | Major::Text, Arg::Value(n)) => {
                    self.advance(usize::try_from(n).map_err(|_| Error::Overflow)?)?;
                    consume(&mut run);
                }
                (Major::Bytes | Major::Text, Arg::Indefinite) => {
                    self.skip_chunks(head.major)?;
                    consume(&mut run);
                }
                (Major::Array, Arg::Value(n)) => open_definite(&mut run, &mut stack, n)?,
                // A map entry counts as two items.
                (Major::Map, Arg::Value(n)) => {
                    let n = n.checked_mul(2).ok_or(Error::Overflow)?;
                    open_definite(&mut run, &mut stack, n)?;
                }
                (Major::Array | Major::Map, Arg::Indefinite) => {
                    open_indefinite(&mut run, &mut stack)
                }
                // A tag prefixes the item that follows; the run advances
                // when that item is consumed.
                (Major::Tag, Arg::Value(_)) => {}
                (Major::Tag, Arg::Indefinite) => {
                    return Err(Error::InvalidIndefinite("tag"));
                }
            }
        }
    }

    /// Definite chunks of `major` until a break, positions only.
    fn skip_chunks(&mut self, major: Major) -> Result<()> {
        loop {
            if self.peek()? == 0xFF {
                self.pull()?;
                return Ok(());
            }
            let head = self.pull_head()?;
            match (head.major == major, head.arg) {
                (true, Arg::Value(n)) => {
                    self.advance(usize::try_from(n).map_err(|_| Error::Overflow)?)?;
                }
                _ => return Err(Error::InvalidChunk),
            }
        }
    }
}
