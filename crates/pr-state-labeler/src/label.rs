//! The managed label catalog
//!
//! Six labels, one per review state. The catalog is a process-wide constant;
//! the name → label reverse lookup is built on first use and never changes.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A label managed by the labeler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Draft,
    Unreviewed,
    Approved,
    PartiallyApproved,
    ChangesRequested,
    Merged,
}

/// Name, color and description of a managed label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPreset {
    pub label: Label,
    pub name: &'static str,
    /// Hex color without leading `#`
    pub color: &'static str,
    pub description: &'static str,
}

pub const LABEL_PRESETS: [LabelPreset; 6] = [
    LabelPreset {
        label: Label::Draft,
        name: "PR: draft",
        color: "eeeeee",
        description: "PR is draft.",
    },
    LabelPreset {
        label: Label::Unreviewed,
        name: "PR: unreviewed",
        color: "fbca04",
        description: "PR does not have any reviews.",
    },
    LabelPreset {
        label: Label::Approved,
        name: "PR: reviewed-approved",
        color: "0e8a16",
        description: "PR has reviewd and got Approve from one of the reviewers.",
    },
    LabelPreset {
        label: Label::PartiallyApproved,
        name: "PR: partially-approved",
        color: "c2e2a2",
        description: "PR has reviewd and got Approve from one of the reviewers.",
    },
    LabelPreset {
        label: Label::ChangesRequested,
        name: "PR: reviewed-changes-requested",
        color: "fbca04",
        description: "PR has reviewed and got Change request event.",
    },
    LabelPreset {
        label: Label::Merged,
        name: "PR: merged",
        color: "662daf",
        description: "PR has merged.",
    },
];

impl Label {
    pub const ALL: [Label; 6] = [
        Label::Draft,
        Label::Unreviewed,
        Label::Approved,
        Label::PartiallyApproved,
        Label::ChangesRequested,
        Label::Merged,
    ];

    pub fn preset(self) -> &'static LabelPreset {
        // LABEL_PRESETS is ordered like Label::ALL
        &LABEL_PRESETS[self as usize]
    }

    /// GitHub label name
    pub fn name(self) -> &'static str {
        self.preset().name
    }

    /// Look up a managed label by its GitHub name
    pub fn from_name(name: &str) -> Option<Label> {
        static BY_NAME: OnceLock<HashMap<&'static str, Label>> = OnceLock::new();

        BY_NAME
            .get_or_init(|| {
                LABEL_PRESETS
                    .iter()
                    .map(|preset| (preset.name, preset.label))
                    .collect()
            })
            .get(name)
            .copied()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Label::Draft => "draft",
            Label::Unreviewed => "unreviewed",
            Label::Approved => "approved",
            Label::PartiallyApproved => "partiallyApproved",
            Label::ChangesRequested => "changesRequested",
            Label::Merged => "merged",
        };
        f.write_str(key)
    }
}
