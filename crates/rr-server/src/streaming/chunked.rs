//! Bounded-chunk file reader.
//!
//! [`ChunkReader`] owns one open file handle, a cursor, and a count of bytes
//! still owed to the client. Each [`ChunkReader::next_chunk`] call reads at
//! most `chunk_size` bytes. The handle is closed when the reader is dropped,
//! which happens on completion, on error, and when the HTTP layer discards
//! the body because the client went away.

use std::io::{self, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use futures::Stream;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

pub struct ChunkReader {
    file: File,
    position: u64,
    remaining: u64,
    chunk_size: usize,
}

impl ChunkReader {
    /// Open `path` positioned at `offset`, owing `length` bytes.
    pub async fn open(
        path: &Path,
        offset: u64,
        length: u64,
        chunk_size: usize,
    ) -> io::Result<Self> {
        let mut file = File::open(path).await?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset)).await?;
        }
        Ok(Self {
            file,
            position: offset,
            remaining: length,
            chunk_size: chunk_size.max(1),
        })
    }

    /// Absolute file offset of the next byte to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes still owed.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Read the next chunk, or `None` once every owed byte has been produced.
    ///
    /// A file that ends before the owed length is an `UnexpectedEof` error:
    /// the response headers already promised that many bytes.
    pub async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let want = self.remaining.min(self.chunk_size as u64) as usize;
        let mut buf = vec![0u8; want];
        let read = self.file.read(&mut buf).await?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "file ended at offset {} with {} bytes still owed",
                    self.position, self.remaining
                ),
            ));
        }

        buf.truncate(read);
        self.position += read as u64;
        self.remaining -= read as u64;
        Ok(Some(Bytes::from(buf)))
    }

    /// Turn the reader into a body stream. The stream ends after the first
    /// error and drops the file handle with it.
    pub fn into_stream(self) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
        futures::stream::try_unfold(self, |mut reader| async move {
            let chunk = reader.next_chunk().await?;
            Ok::<_, io::Error>(chunk.map(|chunk| (chunk, reader)))
        })
    }
}

impl Drop for ChunkReader {
    fn drop(&mut self) {
        if self.remaining > 0 {
            tracing::debug!(
                position = self.position,
                remaining = self.remaining,
                "Stream closed before completion"
            );
        }
    }
}
