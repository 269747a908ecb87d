//! Run-length codec used for compressed icons.
//!
//! Each unit of the stream is selected by its lead byte:
//! - `0xC0`: 16-bit run, `[0xC0, count_lo, count_hi, value]`
//! - `0xC1..=0xFF`: 8-bit run, `[0xC0 | count, value]` with `count` in 1..=63
//! - anything below `0xC0`: literal byte
//!
//! The container never stores the compressed length, so callers hand in a
//! fixed-size window that usually extends past the real payload. Decoding is
//! bounded by the window on the input side and by the output capacity on the
//! output side.

use tracing::{debug, trace};

use crate::error::DecodeError;

/// Lead byte of a 16-bit run; anything above it is an 8-bit run.
pub const RUN_MARKER: u8 = 0xC0;

const SHORT_COUNT_MASK: u8 = 0x3F;

/// One decoded unit of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    Literal(u8),
    Fill { value: u8, count: u16 },
}

impl Run {
    fn len(&self) -> usize {
        match *self {
            Run::Literal(_) => 1,
            Run::Fill { count, .. } => count as usize,
        }
    }
}

/// Iterator over the runs of a compressed stream.
///
/// Stops at the end of the input. A run whose operands would lie past the
/// end of the input also ends iteration; the fixed input window rarely ends
/// on a unit boundary.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Runs<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Input bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let rest = &self.input[self.pos..];
        let (&lead, operands) = rest.split_first()?;

        let (run, consumed) = match lead {
            RUN_MARKER => match operands {
                [lo, hi, value, ..] => (
                    Run::Fill {
                        value: *value,
                        count: u16::from_le_bytes([*lo, *hi]),
                    },
                    4,
                ),
                _ => return self.cut_off(lead),
            },
            l if l > RUN_MARKER => match operands {
                [value, ..] => (
                    Run::Fill {
                        value: *value,
                        count: (l & SHORT_COUNT_MASK) as u16,
                    },
                    2,
                ),
                _ => return self.cut_off(lead),
            },
            literal => (Run::Literal(literal), 1),
        };

        self.pos += consumed;
        Some(run)
    }
}

impl Runs<'_> {
    fn cut_off(&mut self, lead: u8) -> Option<Run> {
        debug!(
            lead,
            offset = self.pos,
            "RLE run cut off by the end of the input window"
        );
        self.pos = self.input.len();
        None
    }
}

/// Expand `input` into `output`, returning the number of bytes written.
///
/// Fails with [`DecodeError::CodecOverrun`] as soon as a run would not fit;
/// `output` is left holding everything decoded before that run.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize, DecodeError> {
    decompress_until(input, output, usize::MAX)
}

/// Like [`decompress`], but stops as soon as `target` bytes have been written.
///
/// Runs after that point are never decoded, so data following the payload
/// in the input window cannot overrun `output`. A run that crosses the end
/// of `output` before `target` is reached is still a
/// [`DecodeError::CodecOverrun`].
pub fn decompress_until(
    input: &[u8],
    output: &mut [u8],
    target: usize,
) -> Result<usize, DecodeError> {
    let mut written = 0usize;
    let mut runs = Runs::new(input);

    for run in runs.by_ref() {
        if written >= target {
            break;
        }
        let end = written + run.len();
        if end > output.len() {
            return Err(DecodeError::CodecOverrun {
                capacity: output.len(),
                required: end,
            });
        }
        emit(run, &mut output[written..end]);
        written = end;
    }

    trace!(
        consumed = runs.position(),
        written, "RLE stream decoded"
    );
    Ok(written)
}

/// Like [`decompress`], but a run that does not fit is clipped to the
/// remaining capacity and decoding stops there.
pub fn decompress_truncating(input: &[u8], output: &mut [u8]) -> usize {
    let mut written = 0usize;
    let mut runs = Runs::new(input);

    for run in runs.by_ref() {
        let end = (written + run.len()).min(output.len());
        emit(run, &mut output[written..end]);
        written = end;
        if written == output.len() {
            break;
        }
    }

    trace!(
        consumed = runs.position(),
        written, "RLE stream decoded (truncating)"
    );
    written
}

fn emit(run: Run, out: &mut [u8]) {
    match run {
        Run::Literal(byte) => out.fill(byte),
        Run::Fill { value, .. } => out.fill(value),
    }
}
