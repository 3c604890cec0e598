//! SHA-1 (FIPS 180-4)

use crate::hashing::engine::{BLOCK_LEN, BlockCompression, ByteOrder, block_words};
use crate::hashing::words::{add32, rotl32};

/// SHA-1 block compression
pub struct Sha1;

const INITIAL_STATE: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// One constant per 20-round phase
static K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

impl BlockCompression for Sha1 {
    const ID: &'static str = "sha1";
    const DISPLAY_NAME: &'static str = "SHA-1";
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    type State = [u32; 5];
    const INITIAL_STATE: [u32; 5] = INITIAL_STATE;

    fn compress(state: &mut [u32; 5], block: &[u8; BLOCK_LEN]) {
        let mut w = [0u32; 80];
        w[..16].copy_from_slice(&block_words(block, ByteOrder::Big));
        for t in 16..80 {
            w[t] = rotl32(w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16], 1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = *state;

        for (t, &wt) in w.iter().enumerate() {
            let (f, k) = match t / 20 {
                0 => ((b & c) | (!b & d), K[0]),
                1 => (b ^ c ^ d, K[1]),
                2 => ((b & c) | (b & d) | (c & d), K[2]),
                _ => (b ^ c ^ d, K[3]),
            };

            let temp = add32(add32(add32(add32(rotl32(a, 5), f), e), k), wt);
            e = d;
            d = c;
            c = rotl32(b, 30);
            b = a;
            a = temp;
        }

        state[0] = add32(state[0], a);
        state[1] = add32(state[1], b);
        state[2] = add32(state[2], c);
        state[3] = add32(state[3], d);
        state[4] = add32(state[4], e);
    }
}
