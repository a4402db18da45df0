use std::fmt;

use serde::{Serialize, Serializer};

use super::error::{ReliabilityError, ReliabilityResult};

pub const DEFAULT_MISSING_MARKER: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Category(String),
    Missing,
}

impl Label {
    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(value) => f.write_str(value),
            Self::Missing => f.write_str("(missing)"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Category(value) => serializer.serialize_str(value),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

impl From<Option<String>> for Label {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMarker(Option<String>);

impl MissingMarker {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.0.as_deref() == Some(raw)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Default for MissingMarker {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_MARKER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSequence(Vec<Label>);

impl LabelSequence {
    pub fn new(labels: Vec<Label>) -> Self {
        Self(labels)
    }

    pub fn from_categories<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(|v| Label::Category(v.into())).collect())
    }

    pub fn from_raw<I, S>(values: I, marker: &MissingMarker) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .map(|raw| {
                    let raw = raw.as_ref();
                    if marker.matches(raw) {
                        Label::Missing
                    } else {
                        Label::Category(raw.to_string())
                    }
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    pub fn get(&self, position: usize) -> Option<&Label> {
        self.0.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn missing_count(&self) -> usize {
        self.0.iter().filter(|label| label.is_missing()).count()
    }

    /// Category values of the units both sequences coded, in unit order.
    pub fn jointly_coded<'a>(
        &'a self,
        other: &'a LabelSequence,
    ) -> ReliabilityResult<(Vec<&'a str>, Vec<&'a str>)> {
        if self.len() != other.len() {
            return Err(ReliabilityError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        Ok(self
            .iter()
            .zip(other.iter())
            .filter_map(|(a, b)| Some((a.as_category()?, b.as_category()?)))
            .unzip())
    }
}

impl FromIterator<Label> for LabelSequence {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LabelSequence {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
