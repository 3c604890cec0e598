//! Hash algorithm implementations

use super::engine::{BlockCompression, BlockHasher};
use super::traits::{HashAlgorithmImpl, StreamingHasher};
use std::marker::PhantomData;

pub mod md5;
pub mod sha1;
pub mod sha256;

/// Registry adapter for any [`BlockCompression`] algorithm
///
/// One-shot hashing goes through the default `hash_bytes`.
pub(crate) struct BlockAlgorithm<C>(PhantomData<fn() -> C>);

impl<C: BlockCompression> BlockAlgorithm<C> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

impl<C: BlockCompression> HashAlgorithmImpl for BlockAlgorithm<C> {
    fn id(&self) -> &'static str {
        C::ID
    }

    fn display_name(&self) -> &'static str {
        C::DISPLAY_NAME
    }

    fn digest_len(&self) -> usize {
        C::digest_len()
    }

    fn create_hasher(&self) -> Box<dyn StreamingHasher> {
        Box::new(BlockHasher::<C>::new())
    }
}
