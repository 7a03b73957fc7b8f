//! Accept/reject partitioning of filtered sentences.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use depgraph::graph::Sentence;
use depgraph::token::Tokens;
use itertools::Itertools;

use crate::error::Error;
use crate::filter::PartitionSink;

/// Render a sentence as a single line of text.
pub trait RenderSentence {
    fn render<'a>(&self, sentence: &'a Sentence) -> Cow<'a, str>;
}

fn tokenized(sentence: &Sentence) -> String {
    sentence.tokens().map(|(_, token)| token.form()).join(" ")
}

/// Surface text of the sentence.
///
/// Uses the `text` comment when present, otherwise the forms joined by
/// spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceText;

impl RenderSentence for SurfaceText {
    fn render<'a>(&self, sentence: &'a Sentence) -> Cow<'a, str> {
        match sentence.text() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(tokenized(sentence)),
        }
    }
}

/// Forms of the sentence joined by spaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenizedText;

impl RenderSentence for TokenizedText {
    fn render<'a>(&self, sentence: &'a Sentence) -> Cow<'a, str> {
        Cow::Owned(tokenized(sentence))
    }
}

/// Rendering selected at run time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderMode {
    Text,
    Tokens,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Text
    }
}

impl RenderSentence for RenderMode {
    fn render<'a>(&self, sentence: &'a Sentence) -> Cow<'a, str> {
        match self {
            RenderMode::Text => SurfaceText.render(sentence),
            RenderMode::Tokens => TokenizedText.render(sentence),
        }
    }
}

fn single_line(text: Cow<str>) -> Cow<str> {
    if text.contains(|c: char| c == '\n' || c == '\r') {
        Cow::Owned(text.replace(|c: char| c == '\n' || c == '\r', " "))
    } else {
        text
    }
}

/// Writer that routes sentences to an accept or a reject output.
///
/// Kept sentences go to the accept output. Excluded sentences go to the
/// reject output, or are discarded when there is none. Every sentence is
/// written as one line.
pub struct OutputPartitioner<W, R = SurfaceText>
where
    W: Write,
{
    accept: Option<W>,
    reject: Option<W>,
    closed: bool,
    render: R,
}

impl<R> OutputPartitioner<BufWriter<File>, R>
where
    R: RenderSentence,
{
    /// Create (or truncate) the output files.
    pub fn create(accept: &Path, reject: Option<&Path>, render: R) -> Result<Self, Error> {
        let create = |path: &Path| {
            File::create(path)
                .map(BufWriter::new)
                .map_err(|source| Error::Output {
                    path: path.to_owned(),
                    source,
                })
        };

        let accept = create(accept)?;
        let reject = reject.map(create).transpose()?;

        Ok(OutputPartitioner::new(accept, reject, render))
    }
}

impl<W, R> OutputPartitioner<W, R>
where
    W: Write,
    R: RenderSentence,
{
    pub fn new(accept: W, reject: Option<W>, render: R) -> Self {
        OutputPartitioner {
            accept: Some(accept),
            reject,
            closed: false,
            render,
        }
    }

    /// Write a sentence to the accept or reject output.
    ///
    /// # Panics
    ///
    /// Panics when the partitioner was closed.
    pub fn write(&mut self, sentence: &Sentence, excluded: bool) -> Result<(), Error> {
        assert!(!self.closed, "write to a closed output partitioner");

        let output = if excluded {
            self.reject.as_mut()
        } else {
            self.accept.as_mut()
        };

        if let Some(output) = output {
            writeln!(output, "{}", single_line(self.render.render(sentence)))?;
        }

        Ok(())
    }

    /// Flush and release both outputs.
    ///
    /// Closing a closed partitioner does nothing.
    pub fn close(&mut self) -> Result<(), Error> {
        self.closed = true;

        let accept = self.accept.take();
        let reject = self.reject.take();
        for mut output in accept.into_iter().chain(reject) {
            output.flush()?;
        }

        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get the accept output, `None` after closing.
    pub fn accept_ref(&self) -> Option<&W> {
        self.accept.as_ref()
    }

    /// Get the reject output, `None` after closing or if there is none.
    pub fn reject_ref(&self) -> Option<&W> {
        self.reject.as_ref()
    }
}

impl<W, R> PartitionSink for OutputPartitioner<W, R>
where
    W: Write,
    R: RenderSentence,
{
    fn write(&mut self, sentence: &Sentence, excluded: bool) -> Result<(), Error> {
        OutputPartitioner::write(self, sentence, excluded)
    }

    fn close(&mut self) -> Result<(), Error> {
        OutputPartitioner::close(self)
    }
}
