//! Intake field state machine — tracks which attribute is being collected.

use serde::{Deserialize, Serialize};

/// The fields of the intake conversation.
///
/// Progresses linearly: Name → Age → Income → State → Phone → Email →
/// Complete. A field never re-opens once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Age,
    Income,
    State,
    Phone,
    Email,
    Complete,
}

impl Field {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Field) -> bool {
        use Field::*;
        matches!(
            (self, target),
            (Name, Age)
                | (Age, Income)
                | (Income, State)
                | (State, Phone)
                | (Phone, Email)
                | (Email, Complete)
        )
    }

    /// Whether all fields have been collected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next field in the linear progression, if any.
    pub fn next(&self) -> Option<Field> {
        use Field::*;
        match self {
            Name => Some(Age),
            Age => Some(Income),
            Income => Some(State),
            State => Some(Phone),
            Phone => Some(Email),
            Email => Some(Complete),
            Complete => None,
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::Name
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Income => "income",
            Self::State => "state",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}
