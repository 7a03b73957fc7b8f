//! Lazy, block-wise corpus streams.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use depgraph::graph::Sentence;
use log::debug;

use crate::error::Error;
use crate::io::{ReadBatch, Reader};

/// A corpus of annotated batches, stored in a CoNLL-U file.
///
/// The corpus is read lazily, `block_size` batches at a time, and
/// presented as one ordered stream of sentences. Since the underlying
/// file is only read, the corpus can be iterated any number of times
/// and yields the same sentences every time.
#[derive(Clone, Debug)]
pub struct BlockCorpus {
    path: PathBuf,
    block_size: usize,
}

impl BlockCorpus {
    /// Open the corpus stored at `path`.
    ///
    /// Fails when `block_size` is zero or when the file cannot be
    /// accessed.
    pub fn open(path: impl Into<PathBuf>, block_size: usize) -> Result<Self, Error> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }

        let path = path.into();
        File::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        Ok(BlockCorpus { path, block_size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Get an iterator over the sentences of the corpus.
    ///
    /// Each call opens its own handle on the corpus file, starting at
    /// the first sentence.
    pub fn iter(&self) -> Result<Blocks<Reader<BufReader<File>>>, Error> {
        let file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;

        Ok(Blocks::new(Reader::new(BufReader::new(file)), self.block_size))
    }
}

/// Iterator over the sentences of a batch reader.
///
/// Batches are read in blocks of `block_size`. The sentences of a block
/// are buffered and handed out one by one; the next block is only read
/// once the buffer is drained. When reading a block fails, the sentences
/// of the batches before the error are handed out first, then the error.
/// The iterator is fused after the error.
pub struct Blocks<R> {
    reader: R,
    block_size: usize,
    buffer: VecDeque<Sentence>,
    error: Option<Error>,
    exhausted: bool,
    n_blocks: usize,
}

impl<R> Blocks<R>
where
    R: ReadBatch,
{
    pub fn new(reader: R, block_size: usize) -> Self {
        Blocks {
            reader,
            block_size: block_size.max(1),
            buffer: VecDeque::new(),
            error: None,
            exhausted: false,
            n_blocks: 0,
        }
    }

    fn read_block(&mut self) -> Result<(), Error> {
        let mut n_batches = 0;

        while n_batches < self.block_size {
            match self.reader.read_batch()? {
                Some(batch) => {
                    n_batches += 1;
                    self.buffer.extend(batch.into_sentences());
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if n_batches != 0 {
            self.n_blocks += 1;
            debug!(
                "block {}: read {} batches with {} sentences",
                self.n_blocks,
                n_batches,
                self.buffer.len()
            );
        }

        Ok(())
    }
}

impl<R> Iterator for Blocks<R>
where
    R: ReadBatch,
{
    type Item = Result<Sentence, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sentence) = self.buffer.pop_front() {
                return Some(Ok(sentence));
            }

            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }

            if self.exhausted {
                return None;
            }

            if let Err(err) = self.read_block() {
                self.exhausted = true;
                self.error = Some(err);
            }
        }
    }
}
