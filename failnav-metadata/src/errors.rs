// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// An error that occurs while reading or writing a test-tree snapshot.
#[derive(Debug)]
#[non_exhaustive]
pub enum SnapshotError {
    /// Deserializing a snapshot from JSON failed.
    Deserialize(serde_json::Error),

    /// Serializing a snapshot to JSON failed.
    Serialize(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Deserialize(_) => {
                write!(f, "parsing test-tree snapshot from JSON failed")
            }
            Self::Serialize(_) => {
                write!(f, "serializing test-tree snapshot to JSON failed")
            }
        }
    }
}

impl error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Deserialize(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}
