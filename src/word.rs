use chrono::{DateTime, Utc};

pub type UserId = i64;
pub type WordId = i64;

/// Word category. Stored as a text column; see [`WordKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Translation,
    IrregularVerb,
}

impl WordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordKind::Translation => "translation",
            WordKind::IrregularVerb => "irregular_verb",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "translation" => Some(WordKind::Translation),
            "irregular_verb" => Some(WordKind::IrregularVerb),
            _ => None,
        }
    }
}

/// Which two of the three irregular-verb forms an entry links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPair {
    InfinitiveToPast,
    PastToParticiple,
}

impl FormPair {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormPair::InfinitiveToPast => "infinitive_to_past",
            FormPair::PastToParticiple => "past_to_participle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "infinitive_to_past" => Some(FormPair::InfinitiveToPast),
            "past_to_participle" => Some(FormPair::PastToParticiple),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormPair::InfinitiveToPast => "Infinitive → Past Simple",
            FormPair::PastToParticiple => "Past Simple → Past Participle",
        }
    }
}

/// In-memory shape of a stored word pair. The storage row keeps a single
/// shape with a nullable `form_pair` column; the variant exists so illegal
/// combinations (a translation with a form pair) are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordEntry {
    Translation {
        source: String,
        target: String,
    },
    IrregularVerb {
        pair: FormPair,
        from_form: String,
        to_form: String,
    },
}

impl WordEntry {
    pub fn kind(&self) -> WordKind {
        match self {
            WordEntry::Translation { .. } => WordKind::Translation,
            WordEntry::IrregularVerb { .. } => WordKind::IrregularVerb,
        }
    }

    pub fn first_term(&self) -> &str {
        match self {
            WordEntry::Translation { source, .. } => source,
            WordEntry::IrregularVerb { from_form, .. } => from_form,
        }
    }

    pub fn second_term(&self) -> &str {
        match self {
            WordEntry::Translation { target, .. } => target,
            WordEntry::IrregularVerb { to_form, .. } => to_form,
        }
    }

    pub fn form_pair(&self) -> Option<FormPair> {
        match self {
            WordEntry::Translation { .. } => None,
            WordEntry::IrregularVerb { pair, .. } => Some(*pair),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: WordId,
    pub user_id: UserId,
    pub entry: WordEntry,
    pub created_at: DateTime<Utc>,
}
