//! Published test vectors: the RFC 1321 suite for MD5 and the FIPS 180
//! examples for SHA-1 and SHA-256.

use hashcmp_core::hashing::{BlockHasher, compression};
use hashcmp_core::{HashAlgorithm, digest, digest_bytes, digest_chunks};
use std::io::{self, Cursor};

const ABC_448: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
const ABC_896: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

#[test]
fn test_rfc1321_suite() {
    let vectors: [(&str, &str); 7] = [
        ("", "d41d8cd98f00b204e9800998ecf8427e"),
        ("a", "0cc175b9c0f1b6a831c399e269772661"),
        ("abc", "900150983cd24fb0d6963f7d28e17f72"),
        ("message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
        ("abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
        (
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "d174ab98d277d9f5a5611c2c9f419d9f",
        ),
        (
            "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            "57edf4a22be3c955ac49da2e2107b67a",
        ),
    ];

    for (input, expected) in vectors {
        assert_eq!(
            digest_bytes(HashAlgorithm::MD5, input.as_bytes()),
            expected,
            "MD5({input:?})"
        );
    }
}

#[test]
fn test_sha1_fips_vectors() {
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA1, b"abc"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA1, ABC_448),
        "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
    );
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA1, ABC_896),
        "a49b2446a02c645bf419f995b67091253a04a259"
    );
}

#[test]
fn test_sha256_fips_vectors() {
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA256, b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA256, ABC_448),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
    assert_eq!(
        digest_bytes(HashAlgorithm::SHA256, ABC_896),
        "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
    );
}

#[test]
fn test_empty_input_vectors() {
    let expected = [
        (HashAlgorithm::MD5, "d41d8cd98f00b204e9800998ecf8427e"),
        (HashAlgorithm::SHA1, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        (
            HashAlgorithm::SHA256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        ),
    ];

    for (algorithm, hex) in expected {
        assert_eq!(digest_bytes(algorithm, b""), hex);
        assert_eq!(digest(algorithm, io::empty()).unwrap(), hex);
        assert_eq!(
            digest_chunks(algorithm, std::iter::empty::<io::Result<Vec<u8>>>()).unwrap(),
            hex
        );
    }
}

/// One million repetitions of `a`, streamed in uneven chunks
#[test]
fn test_million_a() {
    let data = vec![b'a'; 1_000_000];
    let expected = [
        (HashAlgorithm::MD5, "7707d6ae4e027c70eea2a935c2296f21"),
        (HashAlgorithm::SHA1, "34aa973cd4c4daa4f61eeb2bdbad27316534016f"),
        (
            HashAlgorithm::SHA256,
            "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0",
        ),
    ];

    for (algorithm, hex) in expected {
        let chunks = data.chunks(997).map(Ok::<_, io::Error>);
        assert_eq!(digest_chunks(algorithm, chunks).unwrap(), hex, "{algorithm}");
        assert_eq!(digest(algorithm, Cursor::new(&data)).unwrap(), hex);
    }
}

#[test]
fn test_fixed_output_length() {
    for algorithm in HashAlgorithm::ALL {
        for len in [0usize, 1, 55, 56, 64, 1000] {
            assert_eq!(
                digest_bytes(algorithm, &vec![0xffu8; len]).len(),
                algorithm.hex_len()
            );
        }
    }
}

#[test]
fn test_static_dispatch_matches_enum_dispatch() {
    let mut md5 = BlockHasher::<compression::Md5>::new();
    let mut sha1 = BlockHasher::<compression::Sha1>::new();
    let mut sha256 = BlockHasher::<compression::Sha256>::new();
    for piece in [&b"ab"[..], b"", b"c"] {
        md5.update(piece);
        sha1.update(piece);
        sha256.update(piece);
    }

    assert_eq!(md5.finalize(), digest_bytes(HashAlgorithm::MD5, b"abc"));
    assert_eq!(sha1.finalize(), digest_bytes(HashAlgorithm::SHA1, b"abc"));
    assert_eq!(sha256.finalize(), digest_bytes(HashAlgorithm::SHA256, b"abc"));
}
