use crate::order::OrderField;
use crate::section::TalentField;

#[derive(thiserror::Error, Debug)]
pub enum FormError {
    #[error("No requisition section at index {index} ({len} sections)")]
    SectionOutOfRange { index: usize, len: usize },
    #[error("Section {section} has no talent '{talent_id}'")]
    UnknownTalent { section: usize, talent_id: String },
    #[error("Form is showing the submitted order; go back to edit first")]
    ReadOnly,
    #[error("Form has not been submitted")]
    NotSubmitted,
    #[error("Submission blocked by {count} validation error(s)")]
    Invalid { count: usize },
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),
    #[error("Unknown purchase order type '{0}'")]
    UnknownPoType(String),
    #[error("Invalid date '{0}'")]
    InvalidDate(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Where a validation message belongs on the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Order(OrderField),
    Section {
        index: usize,
    },
    Talent {
        section: usize,
        talent_id: String,
        field: TalentField,
    },
    TalentCount, // the cross-section selection rule
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: ErrorKey,
    pub message: String,
}

/// Every rule the last validation run found broken, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ErrorKey {
    /// Flat legacy key, e.g. `req_0_talent_t1_billRate`.
    pub fn path(&self) -> String {
        match self {
            ErrorKey::Order(field) => field.key().into(),
            ErrorKey::Section { index } => format!("req_{index}"),
            ErrorKey::Talent {
                section,
                talent_id,
                field,
            } => format!("req_{section}_talent_{talent_id}_{}", field.key()),
            ErrorKey::TalentCount => "talents".into(),
        }
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }
    // a key holds one message; a later rule on the same key replaces it
    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError { key, message }),
        }
    }
    pub fn get(&self, key: &ErrorKey) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.message.as_str())
    }
    pub fn order(&self, field: OrderField) -> Option<&str> {
        self.get(&ErrorKey::Order(field))
    }
    pub fn section(&self, index: usize) -> Option<&str> {
        self.get(&ErrorKey::Section { index })
    }
    pub fn talent(&self, section: usize, talent_id: &str, field: TalentField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| match &e.key {
                ErrorKey::Talent {
                    section: s,
                    talent_id: t,
                    field: f,
                } => *s == section && t == talent_id && *f == field,
                _ => false,
            })
            .map(|e| e.message.as_str())
    }
    pub fn talent_count(&self) -> Option<&str> {
        self.get(&ErrorKey::TalentCount)
    }
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
    pub fn len(&self) -> usize {
        self.errors.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
