use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Position of a deal in the provider's lifecycle state machine.
///
/// On the wire the service may send either the checkpoint name or its ordinal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "CheckpointRepr", into = "String")]
pub enum Checkpoint {
    Accepted,
    Transferred,
    Published,
    PublishConfirmed,
    AddedPiece,
    IndexedAndAnnounced,
    Complete,
}

impl Checkpoint {
    /// Every checkpoint, in lifecycle order.
    pub const ALL: [Checkpoint; 7] = [
        Checkpoint::Accepted,
        Checkpoint::Transferred,
        Checkpoint::Published,
        Checkpoint::PublishConfirmed,
        Checkpoint::AddedPiece,
        Checkpoint::IndexedAndAnnounced,
        Checkpoint::Complete,
    ];

    /// Only an accepted deal can still take its data.
    pub fn accepts_data(self) -> bool {
        self == Checkpoint::Accepted
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Checkpoint::Accepted => "Accepted",
            Checkpoint::Transferred => "Transferred",
            Checkpoint::Published => "Published",
            Checkpoint::PublishConfirmed => "PublishConfirmed",
            Checkpoint::AddedPiece => "AddedPiece",
            Checkpoint::IndexedAndAnnounced => "IndexedAndAnnounced",
            Checkpoint::Complete => "Complete",
        }
    }
}

impl Display for Checkpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Checkpoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Checkpoint::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid checkpoint: {}", s))
    }
}

impl TryFrom<u8> for Checkpoint {
    type Error = anyhow::Error;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Checkpoint::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Invalid checkpoint ordinal: {}", ordinal))
    }
}

impl From<Checkpoint> for String {
    fn from(checkpoint: Checkpoint) -> Self {
        checkpoint.as_str().to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CheckpointRepr {
    Ordinal(u8),
    Name(String),
}

impl TryFrom<CheckpointRepr> for Checkpoint {
    type Error = anyhow::Error;

    fn try_from(repr: CheckpointRepr) -> Result<Self, Self::Error> {
        match repr {
            CheckpointRepr::Ordinal(ordinal) => Checkpoint::try_from(ordinal),
            CheckpointRepr::Name(name) => name.parse(),
        }
    }
}
