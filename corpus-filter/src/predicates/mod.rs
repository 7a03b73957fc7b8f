//! Structural predicates over dependency-parsed sentences.
//!
//! A predicate decides whether a sentence is excluded from the accepted
//! output. Predicates only inspect the sentence and configuration that
//! they loaded on construction, so evaluating one twice on the same
//! sentence gives the same answer.

use depgraph::graph::Sentence;

use crate::config::FilterOptions;
use crate::error::Error;

mod agreement;
pub use self::agreement::{DemonstrativeAdjective, DemonstrativeNoun, SubjectAgreement};

mod binding;
pub use self::binding::{BindingCase, BindingCCommand, BindingComplementizer, BindingDomain};

mod clauses;
pub use self::clauses::{ExistentialThere, RelativeClause, SubjectAuxInversion, SubjectModifier};

mod passive;
pub use self::passive::{Passive, PassiveCopula};

mod polarity;
pub use self::polarity::{NegativePolarity, SuperlativeQuantifier};

/// Relation family of nominal subjects (`nsubj`, `nsubj:pass`, ...).
pub(crate) const SUBJECT: &str = "nsubj";

/// Sentence predicate.
pub trait Predicate {
    /// Returns `true` when the sentence should be excluded.
    fn exclude(&self, sentence: &Sentence) -> bool;
}

impl<P> Predicate for Box<P>
where
    P: Predicate + ?Sized,
{
    fn exclude(&self, sentence: &Sentence) -> bool {
        (**self).exclude(sentence)
    }
}

/// Predicates that can be constructed from filter options.
///
/// Implementors are registered under `NAME` in the built-in registry.
pub trait FromOptions: Predicate + Sized + 'static {
    /// Registry name.
    const NAME: &'static str;

    /// One-line description, shown in filter listings.
    const DESCRIPTION: &'static str;

    /// Construction fails without a word list.
    const REQUIRES_WORD_LIST: bool = false;

    fn from_options(options: &FilterOptions) -> Result<Self, Error>;
}
