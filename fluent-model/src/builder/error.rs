use thiserror::Error;

/// Misuse of a fluent builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("can't access `{field}`: index {index} exceeds size {len}")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("can't access `{field}`: the list is empty")]
    Empty { field: &'static str },

    #[error("can't edit matching `{field}`: no match found")]
    NoMatch { field: &'static str },

    #[error("`{builder}` is missing required field `{field}`")]
    Missing {
        builder: &'static str,
        field: &'static str,
    },
}
