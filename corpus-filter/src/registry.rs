//! Registry of named filters.

use std::collections::BTreeMap;
use std::fmt;

use depcorpus::BlockCorpus;
use lazy_static::lazy_static;
use log::debug;

use crate::config::FilterOptions;
use crate::error::Error;
use crate::filter::{CorpusFilter, FilterWrite};
use crate::output::OutputPartitioner;
use crate::predicates::{
    BindingCCommand, BindingCase, BindingComplementizer, BindingDomain, DemonstrativeAdjective,
    DemonstrativeNoun, ExistentialThere, FromOptions, NegativePolarity, Passive, PassiveCopula,
    Predicate, RelativeClause, SubjectAgreement, SubjectAuxInversion, SubjectModifier,
    SuperlativeQuantifier,
};
use crate::progress::sentence_spinner;

/// Predicate constructor.
pub type BuildPredicate = fn(&FilterOptions) -> Result<Box<dyn Predicate>, Error>;

fn build<P>(options: &FilterOptions) -> Result<Box<dyn Predicate>, Error>
where
    P: FromOptions,
{
    Ok(Box::new(P::from_options(options)?))
}

/// A named filter.
#[derive(Clone)]
pub struct FilterEntry {
    name: String,
    description: String,
    requires_word_list: bool,
    build: BuildPredicate,
}

impl FilterEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        requires_word_list: bool,
        build: BuildPredicate,
    ) -> Self {
        FilterEntry {
            name: name.into(),
            description: description.into(),
            requires_word_list,
            build,
        }
    }

    /// Entry for a predicate under its own name.
    pub fn of<P>() -> Self
    where
        P: FromOptions,
    {
        FilterEntry::new(
            P::NAME,
            P::DESCRIPTION,
            P::REQUIRES_WORD_LIST,
            build::<P>,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn requires_word_list(&self) -> bool {
        self.requires_word_list
    }

    /// Construct the predicate of this filter.
    pub fn predicate(&self, options: &FilterOptions) -> Result<Box<dyn Predicate>, Error> {
        (self.build)(options)
    }

    /// Construct a filter-writer from the corpus, outputs, and predicate
    /// in `options`.
    ///
    /// The predicate is constructed first, so that configuration errors
    /// are reported before any output file is created.
    pub fn filter_writer(&self, options: &FilterOptions) -> Result<Box<dyn FilterWrite>, Error> {
        let predicate = self.predicate(options)?;
        let corpus = BlockCorpus::open(&options.input, options.block_size)?;
        let output =
            OutputPartitioner::create(&options.accept, options.reject_path(), options.render)?;

        debug!(
            "Filter {} reads {:?} in blocks of {}",
            self.name,
            corpus.path(),
            corpus.block_size()
        );

        let mut filter = CorpusFilter::new(corpus, predicate, output);
        if options.progress {
            filter = filter.with_progress(sentence_spinner());
        }

        Ok(Box::new(filter))
    }
}

impl fmt::Debug for FilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("requires_word_list", &self.requires_word_list)
            .finish()
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Filters by name.
#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, FilterEntry>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        FilterRegistry::default()
    }

    /// Registry with all built-in filters.
    pub fn builtin() -> Result<Self, Error> {
        let mut registry = FilterRegistry::new();
        for entry in builtin_filters() {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Register a filter.
    ///
    /// Fails when the name is taken, keeping the earlier registration.
    pub fn register(&mut self, entry: FilterEntry) -> Result<(), Error> {
        if !valid_name(&entry.name) {
            return Err(Error::InvalidFilterName { name: entry.name });
        }

        if self.filters.contains_key(&entry.name) {
            return Err(Error::DuplicateFilter { name: entry.name });
        }

        self.filters.insert(entry.name.clone(), entry);

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&FilterEntry, Error> {
        self.filters.get(name).ok_or_else(|| Error::UnknownFilter {
            name: name.to_owned(),
        })
    }

    /// Iterate over the filters, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.filters.values()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

fn builtin_filters() -> Vec<FilterEntry> {
    vec![
        FilterEntry::of::<SubjectModifier>(),
        FilterEntry::of::<RelativeClause>(),
        FilterEntry::of::<SubjectAgreement>(),
        FilterEntry::of::<SuperlativeQuantifier>(),
        FilterEntry::of::<ExistentialThere>(),
        FilterEntry::of::<DemonstrativeAdjective>(),
        FilterEntry::of::<DemonstrativeNoun>(),
        FilterEntry::of::<BindingCCommand>(),
        FilterEntry::of::<BindingDomain>(),
        FilterEntry::of::<BindingComplementizer>(),
        FilterEntry::of::<BindingCase>(),
        FilterEntry::of::<Passive>(),
        FilterEntry::of::<PassiveCopula>(),
        FilterEntry::of::<SubjectAuxInversion>(),
        FilterEntry::of::<NegativePolarity>(),
    ]
}

lazy_static! {
    static ref REGISTRY: FilterRegistry =
        FilterRegistry::builtin().expect("built-in filter names are unique");
}

/// The process-wide registry of built-in filters.
pub fn registry() -> &'static FilterRegistry {
    &REGISTRY
}
