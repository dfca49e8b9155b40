use rayon::prelude::*;
use tracing::trace;

use crate::adler32::{checksum, combine};
use crate::error::Adler32Error;

/// Chunk size used by [`checksum_parallel`] when none is given.
pub const DEFAULT_PARALLEL_CHUNK: usize = 1024 * 1024;

/// Checksums buffers on the rayon pool.
///
/// Every buffer gets its own state, so nothing is shared between workers.
/// A single large buffer is split into chunks whose checksums are folded
/// back together with [`combine`].
#[derive(Debug, Clone, Copy)]
pub struct BatchHasher {
    chunk_size: usize,
}

impl Default for BatchHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchHasher {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_PARALLEL_CHUNK,
        }
    }

    /// Sets the chunk size for [`BatchHasher::checksum_parallel`]. Zero
    /// restores the default.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = if size == 0 {
            DEFAULT_PARALLEL_CHUNK
        } else {
            size
        };
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// One checksum per input, in input order.
    pub fn checksum_batch(&self, inputs: &[&[u8]]) -> Result<Vec<u32>, Adler32Error> {
        trace!(inputs = inputs.len(), "adler32 batch");

        let mut out = Vec::new();
        out.try_reserve_exact(inputs.len())
            .map_err(|_| Adler32Error::Allocation { len: inputs.len() })?;

        inputs
            .par_iter()
            .map(|&input| checksum(input))
            .collect_into_vec(&mut out);
        Ok(out)
    }

    /// Checksum of `data`, computed chunk by chunk in parallel.
    pub fn checksum_parallel(&self, data: &[u8]) -> u32 {
        if data.len() <= self.chunk_size {
            return checksum(data);
        }
        trace!(
            len = data.len(),
            chunk_size = self.chunk_size,
            "adler32 parallel"
        );

        let (adler, _) = data
            .par_chunks(self.chunk_size)
            .map(|chunk| (checksum(chunk), chunk.len() as u64))
            .reduce(
                || (1, 0),
                |(a, len_a), (b, len_b)| (combine(a, b, len_b), len_a + len_b),
            );
        adler
    }
}

/// Shorthand for [`BatchHasher::checksum_batch`] with default settings.
pub fn checksum_batch(inputs: &[&[u8]]) -> Result<Vec<u32>, Adler32Error> {
    BatchHasher::new().checksum_batch(inputs)
}

/// Shorthand for [`BatchHasher::checksum_parallel`]; a zero `chunk_size`
/// uses [`DEFAULT_PARALLEL_CHUNK`].
pub fn checksum_parallel(data: &[u8], chunk_size: usize) -> u32 {
    BatchHasher::new()
        .with_chunk_size(chunk_size)
        .checksum_parallel(data)
}
