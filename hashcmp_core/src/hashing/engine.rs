//! Streaming scaffold shared by every block-based digest
//!
//! [`BlockHasher`] owns the running state of one digest computation: the
//! algorithm's state vector, the tail of bytes that do not yet fill a
//! block, and the total number of bytes seen. Algorithms plug in through
//! [`BlockCompression`], which only has to know how to fold one 64-byte
//! block into its state. Accumulation, padding and output formatting are
//! written once here and parameterised by the algorithm's byte order.

use super::traits::StreamingHasher;

/// Size of the unit consumed by one compression call
pub const BLOCK_LEN: usize = 64;

/// Width of the trailing message-length field in the final block
const LENGTH_FIELD_LEN: usize = 8;

/// First padding byte: a single set bit directly after the message
const PADDING_MARKER: u8 = 0x80;

/// Byte order an algorithm uses for block words, the length field and
/// the serialised digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    #[inline]
    fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    fn u32_bytes(self, word: u32) -> [u8; 4] {
        match self {
            Self::Little => word.to_le_bytes(),
            Self::Big => word.to_be_bytes(),
        }
    }

    #[inline]
    fn u64_bytes(self, value: u64) -> [u8; 8] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}

/// Interpret a block as sixteen 32-bit words in the given byte order.
#[inline]
pub(crate) fn block_words(block: &[u8; BLOCK_LEN], order: ByteOrder) -> [u32; 16] {
    let (chunks, _) = block.as_chunks::<4>();
    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(chunks) {
        *word = order.u32_from(*chunk);
    }
    words
}

/// One block-based digest algorithm: its identity, initial state and
/// compression function.
///
/// `compress` must be a pure function of `(state, block)`. It is called
/// exactly once per 64-byte block, in stream order.
pub trait BlockCompression: Send + 'static {
    /// Registry identifier (`md5`, `sha1`, ...)
    const ID: &'static str;
    /// Name shown to users
    const DISPLAY_NAME: &'static str;
    /// Endianness of block words, the length field and the digest
    const BYTE_ORDER: ByteOrder;

    /// State vector, a fixed array of 32-bit words
    type State: Copy + Send + AsRef<[u32]> + 'static;

    /// State before any block has been compressed
    const INITIAL_STATE: Self::State;

    /// Fold one block into the state.
    fn compress(state: &mut Self::State, block: &[u8; BLOCK_LEN]);

    /// Digest length in bytes
    fn digest_len() -> usize {
        Self::INITIAL_STATE.as_ref().len() * 4
    }
}

/// Running digest computation for algorithm `C`
///
/// Created in its initial state, fed with [`update`](Self::update) any
/// number of times, then consumed by [`finalize`](Self::finalize). Taking
/// `self` by value on finalisation means a finished hasher cannot be fed
/// again.
pub struct BlockHasher<C: BlockCompression> {
    state: C::State,
    tail: [u8; BLOCK_LEN],
    tail_len: usize,
    total_len: u64,
}

impl<C: BlockCompression> BlockHasher<C> {
    /// Start a new computation
    pub fn new() -> Self {
        Self {
            state: C::INITIAL_STATE,
            tail: [0u8; BLOCK_LEN],
            tail_len: 0,
            total_len: 0,
        }
    }

    /// Absorb a chunk of input of any length.
    ///
    /// The resulting state only depends on the concatenation of all
    /// chunks, never on where the chunk boundaries fall.
    pub fn update(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let mut input = data;
        if self.tail_len > 0 {
            let take = (BLOCK_LEN - self.tail_len).min(input.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&input[..take]);
            self.tail_len += take;
            input = &input[take..];

            if self.tail_len < BLOCK_LEN {
                return;
            }
            C::compress(&mut self.state, &self.tail);
            self.tail_len = 0;
        }

        let (blocks, rest) = input.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            C::compress(&mut self.state, block);
        }
        self.tail[..rest.len()].copy_from_slice(rest);
        self.tail_len = rest.len();
    }

    /// Total number of input bytes absorbed so far
    pub fn bytes_processed(&self) -> u64 {
        self.total_len
    }

    /// Pad, compress the final block(s) and return the raw digest.
    pub fn finalize_bytes(mut self) -> Vec<u8> {
        let mut padded = [0u8; 2 * BLOCK_LEN];
        let padded_len = padded_len(self.tail_len);

        padded[..self.tail_len].copy_from_slice(&self.tail[..self.tail_len]);
        padded[self.tail_len] = PADDING_MARKER;

        // Length in bits, modulo 2^64
        let bit_len = self.total_len.wrapping_mul(8);
        padded[padded_len - LENGTH_FIELD_LEN..padded_len]
            .copy_from_slice(&C::BYTE_ORDER.u64_bytes(bit_len));

        let (blocks, _) = padded[..padded_len].as_chunks::<BLOCK_LEN>();
        for block in blocks {
            C::compress(&mut self.state, block);
        }

        self.state
            .as_ref()
            .iter()
            .flat_map(|word| C::BYTE_ORDER.u32_bytes(*word))
            .collect()
    }

    /// Pad, compress the final block(s) and return the lowercase hex digest.
    pub fn finalize(self) -> String {
        hex::encode(self.finalize_bytes())
    }
}

impl<C: BlockCompression> Default for BlockHasher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCompression> Clone for BlockHasher<C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            tail: self.tail,
            tail_len: self.tail_len,
            total_len: self.total_len,
        }
    }
}

impl<C: BlockCompression> std::fmt::Debug for BlockHasher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHasher")
            .field("algorithm", &C::ID)
            .field("tail_len", &self.tail_len)
            .field("total_len", &self.total_len)
            .finish()
    }
}

impl<C: BlockCompression> StreamingHasher for BlockHasher<C> {
    fn update(&mut self, data: &[u8]) {
        BlockHasher::update(self, data);
    }

    fn bytes_processed(&self) -> u64 {
        self.total_len
    }

    fn finalize(self: Box<Self>) -> String {
        BlockHasher::finalize(*self)
    }
}

/// Length of tail plus padding: the marker byte and the length field must
/// both fit, rounded up to whole blocks (64 for tails of 0..=55 bytes,
/// 128 for 56..=63).
#[inline]
fn padded_len(tail_len: usize) -> usize {
    (tail_len + 1 + LENGTH_FIELD_LEN).div_ceil(BLOCK_LEN) * BLOCK_LEN
}
