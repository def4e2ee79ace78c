//! Mentions and the documents that own them.
//!
//! A [`Mention`] is a span of text that may refer to some real-world entity
//! ("Barack Obama", "he", "the president"). Parsing and tagging happen
//! upstream; a mention arrives here with its surface text (the *gloss*) and,
//! optionally, the linguistic annotations head-word features compare.
//!
//! # Example
//!
//! ```rust
//! use corefer_core::{Document, Gender, Mention};
//!
//! let doc = Document::new(
//!     "doc-1",
//!     vec![
//!         Mention::new("Barack Obama").in_sentence(0),
//!         Mention::new("he").in_sentence(1).with_gender(Gender::Male),
//!     ],
//! );
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.mention(1).map(|m| m.index()), Some(1));
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Agreement attributes
// =============================================================================

/// Agreement check shared by gender, number and person.
///
/// *Loose* agreement accepts an unknown value on either side; *strict*
/// agreement requires both sides known and equal.
pub trait Agreement: PartialEq + Copy {
    /// Whether the value was actually annotated.
    fn is_known(&self) -> bool;

    /// Equal, or at least one side unknown.
    fn agrees_loosely(&self, other: &Self) -> bool {
        !self.is_known() || !other.is_known() || self == other
    }

    /// Both known and equal.
    fn agrees_strictly(&self, other: &Self) -> bool {
        self.is_known() && other.is_known() && self == other
    }
}

/// Grammatical gender of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    /// Masculine ("he", "him")
    Male,
    /// Feminine ("she", "her")
    Female,
    /// Inanimate or gender-neutral ("it", singular "they")
    Neutral,
    /// Not annotated
    #[default]
    Unknown,
}

impl Agreement for Gender {
    fn is_known(&self) -> bool {
        !matches!(self, Gender::Unknown)
    }
}

/// Grammatical number of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Number {
    /// One referent
    Singular,
    /// Several referents
    Plural,
    /// Not annotated
    #[default]
    Unknown,
}

impl Agreement for Number {
    fn is_known(&self) -> bool {
        !matches!(self, Number::Unknown)
    }
}

/// Grammatical person of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Person {
    /// "I", "we"
    First,
    /// "you"
    Second,
    /// Everything else
    Third,
    /// Not annotated
    #[default]
    Unknown,
}

impl Agreement for Person {
    fn is_known(&self) -> bool {
        !matches!(self, Person::Unknown)
    }
}

/// The lexical anchor of a mention, as tagged upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadWord {
    /// Surface form of the head token
    pub word: String,
    /// Part-of-speech tag (Penn Treebank, e.g. `NNP`)
    pub pos: Option<String>,
    /// Lemma of the head token
    pub lemma: Option<String>,
    /// Named-entity tag (e.g. `PERSON`)
    pub ner: Option<String>,
}

impl HeadWord {
    /// Create a head word with no tags.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: None,
            lemma: None,
            ner: None,
        }
    }

    /// Attach a part-of-speech tag.
    #[must_use]
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Attach a lemma.
    #[must_use]
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Attach a named-entity tag.
    #[must_use]
    pub fn with_ner(mut self, ner: impl Into<String>) -> Self {
        self.ner = Some(ner.into());
        self
    }
}

// =============================================================================
// Mention
// =============================================================================

/// A span of text within one document.
///
/// The document-order index is assigned by [`Document::new`]; a mention that
/// has not been placed in a document reports index 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mention {
    #[serde(skip)]
    index: usize,
    /// Literal surface text
    pub gloss: String,
    /// Sentence the mention occurs in (0-based)
    pub sentence: usize,
    /// Head word, if the tagger supplied one
    pub head: Option<HeadWord>,
    /// Grammatical gender
    pub gender: Gender,
    /// Grammatical number
    pub number: Number,
    /// Grammatical person
    pub person: Person,
}

impl Mention {
    /// Create an unannotated mention from its surface text.
    #[must_use]
    pub fn new(gloss: impl Into<String>) -> Self {
        Self {
            index: 0,
            gloss: gloss.into(),
            sentence: 0,
            head: None,
            gender: Gender::Unknown,
            number: Number::Unknown,
            person: Person::Unknown,
        }
    }

    /// Set the sentence index.
    #[must_use]
    pub fn in_sentence(mut self, sentence: usize) -> Self {
        self.sentence = sentence;
        self
    }

    /// Set the head word.
    #[must_use]
    pub fn with_head(mut self, head: HeadWord) -> Self {
        self.head = Some(head);
        self
    }

    /// Set the gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Set the number.
    #[must_use]
    pub fn with_number(mut self, number: Number) -> Self {
        self.number = number;
        self
    }

    /// Set the person.
    #[must_use]
    pub fn with_person(mut self, person: Person) -> Self {
        self.person = person;
        self
    }

    /// Position of this mention in its document.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Surface text.
    #[must_use]
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    /// Lowercased surface text, the key exact matching compares on.
    #[must_use]
    pub fn lowercase(&self) -> String {
        self.gloss.to_lowercase()
    }

    /// Whitespace-delimited tokens of the gloss.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.gloss.split_whitespace()
    }
}

impl std::fmt::Display for Mention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" [m{} s{}]", self.gloss, self.index, self.sentence)
    }
}

// =============================================================================
// Document
// =============================================================================

/// An ordered, finite sequence of mentions.
///
/// Mention indices are not serialized; loading renumbers mentions in the
/// order they appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Document {
    /// Document identifier
    pub id: String,
    mentions: Vec<Mention>,
}

#[derive(Deserialize)]
struct RawDocument {
    id: String,
    mentions: Vec<Mention>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        Document::new(raw.id, raw.mentions)
    }
}

impl Document {
    /// Create a document, numbering mentions in the order given.
    #[must_use]
    pub fn new(id: impl Into<String>, mentions: impl IntoIterator<Item = Mention>) -> Self {
        let mentions = mentions
            .into_iter()
            .enumerate()
            .map(|(index, mut mention)| {
                mention.index = index;
                mention
            })
            .collect();
        Self {
            id: id.into(),
            mentions,
        }
    }

    /// Convenience constructor from bare glosses, one mention each, all in
    /// sentence 0.
    #[must_use]
    pub fn from_glosses<S: AsRef<str>>(id: impl Into<String>, glosses: &[S]) -> Self {
        Self::new(id, glosses.iter().map(|g| Mention::new(g.as_ref())))
    }

    /// All mentions in document order.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Mention at `index`, if any.
    #[must_use]
    pub fn mention(&self, index: usize) -> Option<&Mention> {
        self.mentions.get(index)
    }

    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Whether the document has no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}
