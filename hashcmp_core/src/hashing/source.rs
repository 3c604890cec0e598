//! Chunked reading of blocking byte sources

use std::io::{self, ErrorKind, Read};

/// Read size used when hashing an arbitrary reader
pub const DEFAULT_READ_SIZE: usize = 8 * 1024;

/// Iterator over owned chunks of a reader
///
/// Each item is at most `chunk_size` bytes and never empty. The iterator
/// ends after the reader reports end of stream or after the first error.
/// Interrupted reads are retried; every other error is yielded once.
pub struct ChunkReader<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader with the default 8 KiB chunk size
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_READ_SIZE)
    }

    /// Wrap a reader with a custom chunk size (at least one byte)
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buffer = vec![0u8; self.chunk_size];
        loop {
            match self.reader.read(&mut buffer) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buffer.truncate(n);
                    return Some(Ok(buffer));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that interrupts once, then fails after yielding `good` bytes
    struct Flaky {
        good: Cursor<Vec<u8>>,
        interrupted: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            match self.good.read(buf)? {
                0 => Err(io::Error::other("device gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_chunks_cover_input() {
        let data: Vec<u8> = (0..=255).cycle().take(20_000).collect();
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(data.clone()))
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= DEFAULT_READ_SIZE));
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn test_empty_reader_yields_nothing() {
        assert!(ChunkReader::new(Cursor::new(Vec::new())).next().is_none());
    }

    #[test]
    fn test_interrupted_is_retried_and_errors_end_iteration() {
        let reader = Flaky {
            good: Cursor::new(vec![7u8; 10]),
            interrupted: false,
        };
        let mut chunks = ChunkReader::with_chunk_size(reader, 4);

        assert_eq!(chunks.next().unwrap().unwrap(), vec![7u8; 4]);
        assert_eq!(chunks.next().unwrap().unwrap(), vec![7u8; 4]);
        assert_eq!(chunks.next().unwrap().unwrap(), vec![7u8; 2]);
        assert!(chunks.next().unwrap().is_err());
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let chunks: Vec<_> = ChunkReader::with_chunk_size(Cursor::new(vec![1u8, 2]), 0)
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(chunks, vec![vec![1u8], vec![2u8]]);
    }
}
