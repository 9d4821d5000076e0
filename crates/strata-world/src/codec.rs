//! Whole-chunk wire codec.
//!
//! The interchange format is a flat buffer of `CHUNK_VOLUME × 4` bytes,
//! one [`Cell`](crate::cell::Cell) per 4-byte group in
//! [`cell_offset`](crate::chunk::cell_offset) order, independent of the
//! chunk's coordinate. Decoding a short buffer is a typed failure, never a
//! silent truncation.

use crate::cell::{CELL_WIRE_BYTES, Cell};
use crate::chunk::{CHUNK_SIZE, CHUNK_VOLUME, Chunk, cell_offset};

/// Size of one encoded chunk in bytes (1728 × 4).
pub const CHUNK_WIRE_BYTES: usize = CHUNK_VOLUME * CELL_WIRE_BYTES;

/// Errors that can occur while decoding chunk wire data.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The buffer is shorter than one full chunk of cells.
    #[error("chunk data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum required byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
}

impl Chunk {
    /// Decodes a full chunk of cells from a wire buffer, replacing the
    /// current cell contents. Marks the chunk dirty.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if the buffer holds fewer than
    /// [`CHUNK_WIRE_BYTES`] bytes; the chunk is left unmodified in that case.
    pub fn decode_cells(&mut self, data: &[u8]) -> Result<(), WireError> {
        if data.len() < CHUNK_WIRE_BYTES {
            return Err(WireError::Truncated {
                expected: CHUNK_WIRE_BYTES,
                actual: data.len(),
            });
        }
        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let offs = cell_offset(x, y, z);
                    let base = offs * CELL_WIRE_BYTES;
                    self.cells_mut()[offs] = Cell::from_wire([
                        data[base],
                        data[base + 1],
                        data[base + 2],
                        data[base + 3],
                    ]);
                }
            }
        }
        self.mark_dirty();
        Ok(())
    }

    /// Encodes the current cell state into exactly [`CHUNK_WIRE_BYTES`]
    /// bytes. The `visible` flag is never encoded.
    pub fn encode_cells(&self) -> Vec<u8> {
        let mut buf = vec![0u8; CHUNK_WIRE_BYTES];
        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let offs = cell_offset(x, y, z);
                    let base = offs * CELL_WIRE_BYTES;
                    buf[base..base + CELL_WIRE_BYTES]
                        .copy_from_slice(&self.cells()[offs].to_wire());
                }
            }
        }
        buf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
