//! Reading and writing batches of CoNLL-U sentences.
//!
//! A batch is one annotated document. In the CoNLL-U stream, each batch
//! starts with a `# newdoc` comment, optionally carrying a document
//! identifier (`# newdoc id = ...`). Sentences that precede the first
//! `# newdoc` comment form a batch of their own, so a plain CoNLL-U file
//! without document markers is read as a single batch.

use std::convert::TryFrom;
use std::io;

use depgraph::graph::{Comment, DepTriple, Sentence};
use depgraph::token::{Features, TokenBuilder, EMPTY_TOKEN};
use log::warn;

use crate::error::{Error, ParseError};
use crate::wrap::{ConlluFeatures, ConlluSentence};

const NEWDOC: &str = "newdoc";

/// A batch of sentences, as produced by the annotator.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Batch {
    id: Option<String>,
    sentences: Vec<Sentence>,
}

impl Batch {
    /// Construct a batch from its document identifier and sentences.
    pub fn new(id: Option<String>, sentences: Vec<Sentence>) -> Self {
        Batch { id, sentences }
    }

    /// Get the document identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn into_sentences(self) -> Vec<Sentence> {
        self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A trait for objects that can read `Batch`es.
pub trait ReadBatch {
    /// Read the next `Batch` from this object.
    ///
    /// Returns `Ok(None)` when the end of the stream is reached.
    ///
    /// # Errors
    ///
    /// A call to `read_batch` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_batch(&mut self) -> Result<Option<Batch>, Error>;

    /// Get an iterator over the batches in this reader.
    fn batches(self) -> Batches<Self>
    where
        Self: Sized,
    {
        Batches { reader: self }
    }
}

/// A reader for batches of CoNLL-U sentences.
pub struct Reader<R> {
    read: R,
    line_no: usize,
    peeked: Option<String>,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            line_no: 0,
            peeked: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, Error> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }

        let mut line = String::new();
        if self.read.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        Ok(Some(line))
    }

    fn parse_error(&self, source: ParseError) -> Error {
        Error::Parse {
            line: self.line_no,
            source,
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Batch, Error>;
    type IntoIter = Batches<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches()
    }
}

impl<R: io::BufRead> ReadBatch for Reader<R> {
    fn read_batch(&mut self) -> Result<Option<Batch>, Error> {
        let mut batch = Batch::default();
        let mut started = false;
        let mut partial = PartialSentence::default();

        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => {
                    partial.finish(&mut batch, self.line_no);
                    return Ok(if started { Some(batch) } else { None });
                }
            };

            let trimmed = line.trim();

            // The blank line is a sentence separator. Repeated blank lines
            // are tolerated.
            if trimmed.is_empty() {
                partial.finish(&mut batch, self.line_no);
                continue;
            }

            if let Some(stripped) = trimmed.strip_prefix('#') {
                match parse_newdoc(stripped) {
                    Some(doc_id) => {
                        partial.finish(&mut batch, self.line_no);

                        if started {
                            self.peeked = Some(line);
                            return Ok(Some(batch));
                        }

                        batch.id = doc_id;
                    }
                    None => partial.sentence.comments_mut().push(parse_comment(stripped)),
                }

                started = true;
                continue;
            }

            started = true;
            partial
                .push_token_line(trimmed)
                .map_err(|e| self.parse_error(e))?;
        }
    }
}

/// A sentence that is being read, with its head relations on hold
/// until all tokens are known.
#[derive(Default)]
struct PartialSentence {
    sentence: Sentence,
    edges: Vec<DepTriple<String>>,
}

impl PartialSentence {
    fn push_token_line(&mut self, line: &str) -> Result<(), ParseError> {
        let mut iter = line.split_terminator('\t');

        // Multiword tokens and empty nodes are not part of the basic
        // dependency tree.
        let id = match parse_identifier_field(iter.next())? {
            Some(id) => id,
            None => return Ok(()),
        };

        let expected = self.sentence.len();
        if id != expected {
            return Err(ParseError::UnexpectedIdentifier {
                expected,
                found: id,
            });
        }

        let mut token = TokenBuilder::new(parse_form_field(iter.next())?);
        if let Some(lemma) = parse_string_field(iter.next()) {
            token = token.lemma(lemma);
        }
        if let Some(upos) = parse_string_field(iter.next()) {
            token = token.upos(upos);
        }
        if let Some(xpos) = parse_string_field(iter.next()) {
            token = token.xpos(xpos);
        }
        token = token.features(
            parse_string_field(iter.next())
                .map(|s| ConlluFeatures::try_from(s.as_str()))
                .transpose()?
                .map(ConlluFeatures::into_owned)
                .unwrap_or_else(Features::new),
        );

        // Head relation.
        if let Some(head) = parse_numeric_field(iter.next())? {
            let head_rel = parse_string_field(iter.next());
            self.edges.push(DepTriple::new(head, head_rel, id));
        } else if parse_string_field(iter.next()).is_some() {
            return Err(ParseError::RelationWithoutHead {
                token: line.to_owned(),
            });
        }

        // Enhanced dependencies and miscellaneous features are not used.

        self.sentence.push(token.into());

        Ok(())
    }

    /// Move a completely read sentence into the batch.
    ///
    /// Head relations that point outside the sentence are left
    /// unattached, so that one malformed parse does not end the corpus.
    ///
    /// Comments without tokens are discarded, so that they do not end up
    /// on the next sentence.
    fn finish(&mut self, batch: &mut Batch, line_no: usize) {
        if self.sentence.len() == 1 {
            if !self.sentence.comments().is_empty() {
                warn!(
                    "discarding {} comment(s) without tokens before line {}",
                    self.sentence.comments().len(),
                    line_no + 1
                );
                *self = PartialSentence::default();
            }
            return;
        }

        let PartialSentence {
            mut sentence,
            edges,
        } = std::mem::take(self);

        for edge in edges {
            let dependent = edge.dependent();
            if let Err(err) = sentence.dep_graph_mut().add_deprel(edge) {
                warn!(
                    "sentence ending before line {}: token {} left without head: {}",
                    line_no + 1,
                    dependent,
                    err
                );
            }
        }

        batch.sentences.push(sentence);
    }
}

/// An iterator over the batches in a `Reader`.
pub struct Batches<R>
where
    R: ReadBatch,
{
    reader: R,
}

impl<R> Iterator for Batches<R>
where
    R: ReadBatch,
{
    type Item = Result<Batch, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_batch().transpose()
    }
}

/// Parse a `newdoc` comment, returning the optional document identifier.
fn parse_newdoc(comment: &str) -> Option<Option<String>> {
    let comment = comment.trim();
    let rest = comment.strip_prefix(NEWDOC)?;

    if rest.is_empty() {
        return Some(None);
    }

    let id = rest.trim().strip_prefix("id")?.trim().strip_prefix('=')?.trim();

    Some(Some(id.to_string()))
}

fn parse_comment(comment: &str) -> Comment {
    let comment = comment.trim();

    match comment.find(" = ") {
        Some(idx) => Comment::AttrVal {
            attr: comment[..idx].to_string(),
            val: comment[idx + 3..].to_string(),
        },
        None => Comment::String(comment.to_string()),
    }
}

fn parse_form_field(field: Option<&str>) -> Result<String, ParseError> {
    field.map(str::to_owned).ok_or(ParseError::MissingFormField)
}

fn parse_string_field(field: Option<&str>) -> Option<String> {
    field.and_then(|s| {
        if s == EMPTY_TOKEN {
            None
        } else {
            Some(s.to_string())
        }
    })
}

/// Parse the identifier field.
///
/// Returns `None` for multiword token ranges (`2-3`) and empty
/// nodes (`2.1`).
fn parse_identifier_field(field: Option<&str>) -> Result<Option<usize>, ParseError> {
    match field {
        None => Err(ParseError::ParseIdentifierField {
            value: "A token identifier should be present".to_owned(),
        }),
        Some(s) => {
            if s == EMPTY_TOKEN {
                return Err(ParseError::ParseIdentifierField {
                    value: s.to_owned(),
                });
            }

            if s.contains(|c| c == '-' || c == '.') {
                return Ok(None);
            }

            Ok(Some(s.parse::<usize>().map_err(|_| {
                ParseError::ParseIntField {
                    value: s.to_owned(),
                }
            })?))
        }
    }
}

fn parse_numeric_field(field: Option<&str>) -> Result<Option<usize>, ParseError> {
    match field {
        None => Ok(None),
        Some(s) => {
            if s == EMPTY_TOKEN {
                Ok(None)
            } else {
                Ok(Some(s.parse::<usize>().map_err(|_| {
                    ParseError::ParseIntField {
                        value: s.to_owned(),
                    }
                })?))
            }
        }
    }
}

/// A trait for objects that can write `Batch`es.
pub trait WriteBatch {
    /// Write a batch into this object.
    ///
    /// # Errors
    ///
    /// A call to `write_batch` may generate an error to indicate that
    /// the operation could not be completed.
    fn write_batch(&mut self, batch: &Batch) -> Result<(), Error>;
}

/// A writer for batches of CoNLL-U sentences.
///
/// Every batch is appended as an independent `# newdoc` record, each
/// sentence followed by a blank line.
pub struct Writer<W> {
    write: W,
}

impl<W: io::Write> Writer<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait.
    pub fn new(write: W) -> Writer<W> {
        Writer { write }
    }

    /// Borrow the embedded writer. Getting the underlying writer is often
    /// useful when the writer writes to a memory object.
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteBatch for Writer<W> {
    fn write_batch(&mut self, batch: &Batch) -> Result<(), Error> {
        match batch.id() {
            Some(id) => writeln!(self.write, "# {} id = {}", NEWDOC, id)?,
            None => writeln!(self.write, "# {}", NEWDOC)?,
        }

        for sentence in batch.sentences() {
            writeln!(self.write, "{}", ConlluSentence(sentence))?;
        }

        Ok(())
    }
}
