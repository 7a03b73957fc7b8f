//! Filter-writers: stream a corpus through a predicate into a sink.

use std::fs::File;
use std::io::BufReader;
use std::iter::Map;
use std::vec::IntoIter;

use depcorpus::io::Reader;
use depcorpus::{BlockCorpus, Blocks};
use depgraph::graph::Sentence;
use indicatif::ProgressBar;
use log::{error, info};

use crate::error::Error;
use crate::predicates::Predicate;

/// A restartable stream of sentences.
pub trait SentenceSource {
    type Sentences: Iterator<Item = Result<Sentence, depcorpus::Error>>;

    /// Get the sentences of the source, starting at the first sentence.
    fn sentences(&self) -> Result<Self::Sentences, depcorpus::Error>;
}

impl SentenceSource for BlockCorpus {
    type Sentences = Blocks<Reader<BufReader<File>>>;

    fn sentences(&self) -> Result<Self::Sentences, depcorpus::Error> {
        self.iter()
    }
}

type OkSentence = fn(Sentence) -> Result<Sentence, depcorpus::Error>;

impl SentenceSource for Vec<Sentence> {
    type Sentences = Map<IntoIter<Sentence>, OkSentence>;

    fn sentences(&self) -> Result<Self::Sentences, depcorpus::Error> {
        Ok(self.clone().into_iter().map(Ok as OkSentence))
    }
}

/// Destination of filtered sentences.
pub trait PartitionSink {
    /// Write a sentence along with the predicate's verdict.
    fn write(&mut self, sentence: &Sentence, excluded: bool) -> Result<(), Error>;

    /// Release the sink. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), Error>;
}

/// Sentence counts of a filter run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterStats {
    /// Number of sentences that were read.
    pub sentences: usize,

    /// Number of sentences that the predicate excluded.
    pub excluded: usize,
}

impl FilterStats {
    pub fn accepted(&self) -> usize {
        self.sentences - self.excluded
    }
}

/// A filter that can be run to completion.
pub trait FilterWrite {
    /// Run the filter over the whole source.
    fn filter_write(&mut self) -> Result<FilterStats, Error>;

    /// Release the outputs of the filter.
    fn close(&mut self) -> Result<(), Error>;
}

/// Filter-writer over a sentence source, a predicate, and a sink.
///
/// The sink is closed when the filter is dropped, so outputs are
/// released on every exit path. Call [`FilterWrite::close`] to observe
/// errors from closing.
pub struct CorpusFilter<S, P, W>
where
    W: PartitionSink,
{
    source: S,
    predicate: P,
    sink: W,
    progress: ProgressBar,
}

impl<S, P, W> CorpusFilter<S, P, W>
where
    S: SentenceSource,
    P: Predicate,
    W: PartitionSink,
{
    pub fn new(source: S, predicate: P, sink: W) -> Self {
        CorpusFilter {
            source,
            predicate,
            sink,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on the given progress bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    fn filter_sentences(&mut self, stats: &mut FilterStats) -> Result<(), Error> {
        for sentence in self.source.sentences()? {
            let sentence = sentence?;
            let excluded = self.predicate.exclude(&sentence);
            self.sink.write(&sentence, excluded)?;

            stats.sentences += 1;
            if excluded {
                stats.excluded += 1;
            }
            self.progress.inc(1);
        }

        Ok(())
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }
}

impl<S, P, W> FilterWrite for CorpusFilter<S, P, W>
where
    S: SentenceSource,
    P: Predicate,
    W: PartitionSink,
{
    fn filter_write(&mut self) -> Result<FilterStats, Error> {
        info!("Filtering sentences");

        let mut stats = FilterStats::default();
        if let Err(err) = self.filter_sentences(&mut stats) {
            self.progress
                .abandon_with_message(format!("failed after {} sentences", stats.sentences));
            return Err(err);
        }

        self.progress
            .finish_with_message(format!("({} excluded)", stats.excluded));
        info!(
            "Filtered {} sentences: {} accepted, {} excluded",
            stats.sentences,
            stats.accepted(),
            stats.excluded
        );

        Ok(stats)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.sink.close()
    }
}

impl<S, P, W> Drop for CorpusFilter<S, P, W>
where
    W: PartitionSink,
{
    fn drop(&mut self) {
        if let Err(err) = self.sink.close() {
            error!("Cannot close filter output: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    use depcorpus::BlockCorpus;
    use depgraph::graph::Sentence;
    use indicatif::ProgressBar;
    use tempfile::TempDir;

    use super::{CorpusFilter, FilterStats, FilterWrite, PartitionSink, SentenceSource};
    use crate::error::Error;
    use crate::output::{OutputPartitioner, SurfaceText};
    use crate::predicates::{Predicate, SubjectModifier};
    use crate::tests::TEST_SENTENCES;

    #[derive(Debug, Eq, PartialEq)]
    enum Event {
        Exclude(String),
        Write(String, bool),
        Close,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    fn text(sentence: &Sentence) -> String {
        sentence.text().unwrap_or_default().to_owned()
    }

    /// Predicate that records its calls and defers to `pp-mod-subj`.
    struct RecordingPredicate(Log);

    impl Predicate for RecordingPredicate {
        fn exclude(&self, sentence: &Sentence) -> bool {
            self.0.borrow_mut().push(Event::Exclude(text(sentence)));
            SubjectModifier.exclude(sentence)
        }
    }

    struct RecordingSink {
        log: Log,
        fail_on: Option<usize>,
        writes: usize,
    }

    impl RecordingSink {
        fn new(log: Log) -> Self {
            RecordingSink {
                log,
                fail_on: None,
                writes: 0,
            }
        }
    }

    impl PartitionSink for RecordingSink {
        fn write(&mut self, sentence: &Sentence, excluded: bool) -> Result<(), Error> {
            if self.fail_on == Some(self.writes) {
                return Err(Error::IO(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }

            self.writes += 1;
            self.log
                .borrow_mut()
                .push(Event::Write(text(sentence), excluded));
            Ok(())
        }

        fn close(&mut self) -> Result<(), Error> {
            self.log.borrow_mut().push(Event::Close);
            Ok(())
        }
    }

    #[test]
    fn evaluates_then_writes_in_source_order() {
        let log = Log::default();
        let mut filter = CorpusFilter::new(
            TEST_SENTENCES.clone(),
            RecordingPredicate(log.clone()),
            RecordingSink::new(log.clone()),
        );

        let stats = filter.filter_write().unwrap();
        assert_eq!(
            stats,
            FilterStats {
                sentences: 3,
                excluded: 1
            }
        );
        assert_eq!(stats.accepted(), 2);

        let man = "The man near Paris left".to_owned();
        let dogs = "Dogs bark".to_owned();
        let cat = "The cat slept".to_owned();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Exclude(man.clone()),
                Event::Write(man, true),
                Event::Exclude(dogs.clone()),
                Event::Write(dogs, false),
                Event::Exclude(cat.clone()),
                Event::Write(cat, false),
            ]
        );
    }

    #[test]
    fn sink_is_closed_on_drop() {
        let log = Log::default();
        {
            let _filter = CorpusFilter::new(
                Vec::<Sentence>::new(),
                SubjectModifier,
                RecordingSink::new(log.clone()),
            );
        }
        assert_eq!(*log.borrow(), vec![Event::Close]);
    }

    #[test]
    fn sink_errors_abort_and_close() {
        let log = Log::default();
        let mut sink = RecordingSink::new(log.clone());
        sink.fail_on = Some(1);

        let progress = ProgressBar::hidden();
        let mut filter = CorpusFilter::new(TEST_SENTENCES.clone(), SubjectModifier, sink)
            .with_progress(progress.clone());
        assert!(matches!(filter.filter_write(), Err(Error::IO(_))));
        assert!(progress.is_finished());
        assert_eq!(progress.position(), 1);
        drop(filter);

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Write("The man near Paris left".to_owned(), true),
                Event::Close
            ]
        );
    }

    #[test]
    fn partitions_corpus_in_order() {
        let dir = TempDir::new().unwrap();
        let accept = dir.path().join("accept.txt");
        let reject = dir.path().join("reject.txt");

        let corpus = BlockCorpus::open("testdata/subjects.conllu", 2).unwrap();
        let output =
            OutputPartitioner::create(&accept, Some(reject.as_path()), SurfaceText).unwrap();
        let mut filter = CorpusFilter::new(corpus, SubjectModifier, output);

        let stats = filter.filter_write().unwrap();
        filter.close().unwrap();
        assert!(filter.sink().is_closed());

        assert_eq!(stats.sentences, 5);
        assert_eq!(stats.excluded, 2);
        assert_eq!(
            fs::read_to_string(&accept).unwrap(),
            "Dogs bark.\nThe cat slept.\nThe dog that barked left.\n"
        );
        assert_eq!(
            fs::read_to_string(&reject).unwrap(),
            "The man near Paris left.\nA woman from Lyon called.\n"
        );
    }

    #[test]
    fn empty_corpus_creates_empty_outputs() {
        let dir = TempDir::new().unwrap();
        let accept = dir.path().join("accept.txt");
        let reject = dir.path().join("reject.txt");

        let corpus = BlockCorpus::open("testdata/empty.conllu", 1).unwrap();
        let output =
            OutputPartitioner::create(&accept, Some(reject.as_path()), SurfaceText).unwrap();
        let mut filter = CorpusFilter::new(corpus, SubjectModifier, output);

        assert_eq!(filter.filter_write().unwrap(), FilterStats::default());
        drop(filter);

        assert_eq!(fs::read_to_string(&accept).unwrap(), "");
        assert_eq!(fs::read_to_string(&reject).unwrap(), "");
    }

    #[test]
    fn vec_source_restarts() {
        let source = TEST_SENTENCES.clone();
        let first = source.sentences().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        let second = source.sentences().unwrap().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, *TEST_SENTENCES);
    }
}
