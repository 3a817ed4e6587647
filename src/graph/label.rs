use std::str::FromStr;

use derive_more::{Display, From};

use super::GraphError;

/// Name of a vertex: either an integer or a (non-empty) string.
///
/// Integers sort before strings, integers numerically and strings lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Label {
    #[display(fmt = "{}", _0)]
    Int(i64),
    #[display(fmt = "{}", _0)]
    Str(String),
}

impl Label {
    /// Interprets a token from a text format: anything that parses as an `i64` becomes
    /// [`Label::Int`], everything else a [`Label::Str`].
    pub fn parse(token: &str) -> Result<Self, GraphError> {
        let token = token.trim();
        let label = match token.parse::<i64>() {
            Ok(i) => Label::Int(i),
            Err(_) => Label::Str(token.to_owned()),
        };
        label.validate()?;
        Ok(label)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        match self {
            Label::Str(s) if s.trim().is_empty() => {
                Err(GraphError::InvalidVertexLabel(s.clone()))
            }
            _ => Ok(()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(i) => Some(*i),
            Label::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Label::Int(_) => None,
            Label::Str(s) => Some(s),
        }
    }
}

impl FromStr for Label {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::parse(s)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_owned())
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

macro_rules! label_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Label {
                fn from(value: $t) -> Self {
                    Label::Int(i64::from(value))
                }
            }
        )*
    };
}

label_from_int!(i8, i16, i32, u8, u16, u32);
