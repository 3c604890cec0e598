//! 32-bit word arithmetic shared by the compression functions
//!
//! All arithmetic is modulo 2^32.

#[inline(always)]
pub(crate) const fn rotl32(x: u32, n: u32) -> u32 {
    x.rotate_left(n)
}

#[inline(always)]
pub(crate) const fn rotr32(x: u32, n: u32) -> u32 {
    x.rotate_right(n)
}

#[inline(always)]
pub(crate) const fn add32(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}
