use std::fmt;
use thiserror::Error as ThisError;

///
/// NullError
///
/// Failure raised while coercing, projecting, or rendering a nullable value.
/// Whenever one of these is returned from a scan or decode, the receiver has
/// already been reset to null with a zero payload.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum NullError {
    #[error("value {value} of type {source_kind} is not acceptable for {target}")]
    TypeNotAcceptable {
        value: String,
        source_kind: &'static str,
        target: &'static str,
    },

    #[error("cannot parse {text:?} as {target}: {reason}")]
    Parse {
        text: String,
        target: &'static str,
        reason: String,
    },

    #[error("{target} value out of range: {detail}")]
    Range {
        target: &'static str,
        detail: String,
    },

    #[error("invalid timestamp layout {layout:?}: {reason}")]
    Layout { layout: String, reason: String },
}

impl NullError {
    pub(crate) fn type_not_acceptable(
        value: impl fmt::Debug,
        source_kind: &'static str,
        target: &'static str,
    ) -> Self {
        Self::TypeNotAcceptable {
            value: format!("{value:?}"),
            source_kind,
            target,
        }
    }

    pub(crate) fn parse(
        text: impl Into<String>,
        target: &'static str,
        reason: impl fmt::Display,
    ) -> Self {
        Self::Parse {
            text: text.into(),
            target,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn range(target: &'static str, detail: impl Into<String>) -> Self {
        Self::Range {
            target,
            detail: detail.into(),
        }
    }

    pub(crate) fn layout(layout: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Layout {
            layout: layout.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NullErrorKind {
        match self {
            Self::TypeNotAcceptable { .. } => NullErrorKind::TypeNotAcceptable,
            Self::Parse { .. } => NullErrorKind::Parse,
            Self::Range { .. } => NullErrorKind::Range,
            Self::Layout { .. } => NullErrorKind::Layout,
        }
    }
}

///
/// NullErrorKind
/// Coarse classification of [`NullError`], stable for matching in callers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullErrorKind {
    TypeNotAcceptable,
    Parse,
    Range,
    Layout,
}

impl fmt::Display for NullErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeNotAcceptable => "type_not_acceptable",
            Self::Parse => "parse",
            Self::Range => "range",
            Self::Layout => "layout",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
