//! OpenSubtitles movie hash.
//!
//! The hash is the file size plus the wrapping sum of the little-endian u64
//! words in the first and the last 64 KiB of the file.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::Result;

const BLOCK_SIZE: u64 = 64 * 1024;

/// Compute the movie hash, or `None` for files too small to hash.
pub async fn movie_hash(path: &Path) -> Result<Option<String>> {
    let mut file = File::open(path).await?;
    let size = file.metadata().await?.len();

    if size < BLOCK_SIZE * 2 {
        return Ok(None);
    }

    let mut hash = size;
    let mut block = vec![0u8; BLOCK_SIZE as usize];

    file.read_exact(&mut block).await?;
    hash = add_words(hash, &block);

    file.seek(SeekFrom::Start(size - BLOCK_SIZE)).await?;
    file.read_exact(&mut block).await?;
    hash = add_words(hash, &block);

    Ok(Some(format!("{:016x}", hash)))
}

fn add_words(mut hash: u64, block: &[u8]) -> u64 {
    for word in block.chunks_exact(8) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(word);
        hash = hash.wrapping_add(u64::from_le_bytes(bytes));
    }
    hash
}
