use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two banks of the river. Every actor and the torch occupy
/// exactly one side at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Start,
    End,
}

impl Side {
    /// The other bank.
    pub fn opposite(self) -> Side {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }

    /// The external spelling used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Start => "start",
            Side::End => "end",
        }
    }

    /// Parse the external spelling. Anything other than `start` or `end` is
    /// rejected.
    pub fn parse(s: &str) -> Option<Side> {
        match s {
            "start" => Some(Side::Start),
            "end" => Some(Side::End),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
