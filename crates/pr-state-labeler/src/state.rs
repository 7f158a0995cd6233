use crate::label::Label;
use std::fmt;

/// Review state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// A state backed by a managed label
    Labeled(Label),
    /// Work in progress, never persisted as a label
    Wip,
    /// Reviews exist but match no rule
    Undefined,
}

impl State {
    pub const DRAFT: State = State::Labeled(Label::Draft);
    pub const UNREVIEWED: State = State::Labeled(Label::Unreviewed);
    pub const APPROVED: State = State::Labeled(Label::Approved);
    pub const PARTIALLY_APPROVED: State = State::Labeled(Label::PartiallyApproved);
    pub const CHANGES_REQUESTED: State = State::Labeled(Label::ChangesRequested);
    pub const MERGED: State = State::Labeled(Label::Merged);

    pub fn label(self) -> Option<Label> {
        match self {
            State::Labeled(label) => Some(label),
            State::Wip | State::Undefined => None,
        }
    }
}

impl From<Label> for State {
    fn from(label: Label) -> Self {
        State::Labeled(label)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Labeled(label) => label.fmt(f),
            State::Wip => f.write_str("wip"),
            State::Undefined => f.write_str("undefined"),
        }
    }
}
