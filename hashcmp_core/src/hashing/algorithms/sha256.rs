//! SHA-256 (FIPS 180-4)

use crate::hashing::engine::{BLOCK_LEN, BlockCompression, ByteOrder, block_words};
use crate::hashing::words::{add32, rotr32};

/// SHA-256 block compression
pub struct Sha256;

const INITIAL_STATE: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// First 32 bits of the fractional parts of the cube roots of the first
/// 64 primes
static K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    rotr32(x, 2) ^ rotr32(x, 13) ^ rotr32(x, 22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    rotr32(x, 6) ^ rotr32(x, 11) ^ rotr32(x, 25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    rotr32(x, 7) ^ rotr32(x, 18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    rotr32(x, 17) ^ rotr32(x, 19) ^ (x >> 10)
}

impl BlockCompression for Sha256 {
    const ID: &'static str = "sha256";
    const DISPLAY_NAME: &'static str = "SHA-256";
    const BYTE_ORDER: ByteOrder = ByteOrder::Big;

    type State = [u32; 8];
    const INITIAL_STATE: [u32; 8] = INITIAL_STATE;

    fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
        let mut w = [0u32; 64];
        w[..16].copy_from_slice(&block_words(block, ByteOrder::Big));
        for t in 16..64 {
            w[t] = add32(
                add32(small_sigma1(w[t - 2]), w[t - 7]),
                add32(small_sigma0(w[t - 15]), w[t - 16]),
            );
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        for t in 0..64 {
            let t1 = add32(add32(add32(h, big_sigma1(e)), add32(ch(e, f, g), K[t])), w[t]);
            let t2 = add32(big_sigma0(a), maj(a, b, c));
            h = g;
            g = f;
            f = e;
            e = add32(d, t1);
            d = c;
            c = b;
            b = a;
            a = add32(t1, t2);
        }

        for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *word = add32(*word, value);
        }
    }
}
