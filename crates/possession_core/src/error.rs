use thiserror::Error;

use crate::model::EntityId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Data alignment error: {reason}")]
    DataAlignment { reason: String },

    #[error("Unknown entity {entity}; available: [{}]", format_roster(.available))]
    UnknownEntity {
        entity: EntityId,
        available: Vec<EntityId>,
    },

    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    #[error("Invalid period {period}; available: {available:?}")]
    InvalidPeriod { period: u32, available: Vec<u32> },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl AnalysisError {
    pub fn alignment(reason: impl Into<String>) -> Self {
        AnalysisError::DataAlignment {
            reason: reason.into(),
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        AnalysisError::UnsupportedFormat {
            reason: reason.into(),
        }
    }
}

fn format_roster(roster: &[EntityId]) -> String {
    roster
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
