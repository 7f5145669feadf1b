//! Session and profile models.

use serde::{Deserialize, Serialize};

use super::field::Field;

/// Who said a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the append-only conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub message: String,
}

/// The finalized profile — all six fields validated and normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub state_name: String,
    pub phone: String,
    pub email: String,
}

/// The mutable record of one user's intake conversation.
///
/// Created on the first message for a new identifier and kept in the
/// session store for the life of the process. Fields are populated
/// strictly in `Field` order and never overwritten once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub income: Option<f64>,
    pub state_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Set exactly once, on the completion transition.
    pub eligible_schemes: Option<Vec<String>>,
    pub current_field: Field,
    pub conversation_history: Vec<ConversationTurn>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            name: None,
            age: None,
            income: None,
            state_name: None,
            phone: None,
            email: None,
            eligible_schemes: None,
            current_field: Field::default(),
            conversation_history: Vec::new(),
        }
    }

    /// The first field in collection order that has no value, or
    /// `Complete`. `current_field` must always equal this.
    pub fn first_unset(&self) -> Field {
        if self.name.is_none() {
            Field::Name
        } else if self.age.is_none() {
            Field::Age
        } else if self.income.is_none() {
            Field::Income
        } else if self.state_name.is_none() {
            Field::State
        } else if self.phone.is_none() {
            Field::Phone
        } else if self.email.is_none() {
            Field::Email
        } else {
            Field::Complete
        }
    }

    /// Advance to the next field. Returns an error if already complete.
    pub fn advance(&mut self) -> Result<Field, String> {
        let next = self
            .current_field
            .next()
            .ok_or_else(|| "Already at terminal field".to_string())?;
        if !self.current_field.can_transition_to(next) {
            return Err(format!(
                "Cannot transition from {} to {}",
                self.current_field, next
            ));
        }
        self.current_field = next;
        Ok(next)
    }

    pub fn is_complete(&self) -> bool {
        self.current_field.is_terminal()
    }

    /// The finalized profile, available once all six fields are set.
    pub fn profile(&self) -> Option<Profile> {
        Some(Profile {
            name: self.name.clone()?,
            age: self.age?,
            income: self.income?,
            state_name: self.state_name.clone()?,
            phone: self.phone.clone()?,
            email: self.email.clone()?,
        })
    }

    pub fn push_user(&mut self, message: impl Into<String>) {
        self.conversation_history.push(ConversationTurn {
            role: Role::User,
            message: message.into(),
        });
    }

    pub fn push_assistant(&mut self, message: impl Into<String>) {
        self.conversation_history.push(ConversationTurn {
            role: Role::Assistant,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_name() {
        let session = Session::new("abc");
        assert_eq!(session.current_field, Field::Name);
        assert_eq!(session.first_unset(), Field::Name);
        assert!(session.conversation_history.is_empty());
        assert!(session.profile().is_none());
    }

    #[test]
    fn first_unset_tracks_population_order() {
        let mut session = Session::new("abc");
        session.name = Some("Priya".to_string());
        assert_eq!(session.first_unset(), Field::Age);
        session.age = Some(30);
        assert_eq!(session.first_unset(), Field::Income);
        session.income = Some(300000.0);
        assert_eq!(session.first_unset(), Field::State);
        session.state_name = Some("Maharashtra".to_string());
        assert_eq!(session.first_unset(), Field::Phone);
        session.phone = Some("9876543210".to_string());
        assert_eq!(session.first_unset(), Field::Email);
        session.email = Some("priya@example.com".to_string());
        assert_eq!(session.first_unset(), Field::Complete);
    }

    #[test]
    fn advance_walks_all_fields() {
        let mut session = Session::new("abc");
        let expected = [
            Field::Age,
            Field::Income,
            Field::State,
            Field::Phone,
            Field::Email,
            Field::Complete,
        ];
        for field in expected {
            assert_eq!(session.advance().unwrap(), field);
        }
        assert!(session.advance().is_err());
    }

    #[test]
    fn zero_income_counts_as_set() {
        let mut session = Session::new("abc");
        session.name = Some("Ravi".to_string());
        session.age = Some(40);
        session.income = Some(0.0);
        assert_eq!(session.first_unset(), Field::State);
    }

    #[test]
    fn profile_requires_all_fields() {
        let mut session = Session::new("abc");
        session.name = Some("Priya".to_string());
        session.age = Some(30);
        assert!(session.profile().is_none());

        session.income = Some(300000.0);
        session.state_name = Some("Maharashtra".to_string());
        session.phone = Some("9876543210".to_string());
        session.email = Some("priya@example.com".to_string());

        let profile = session.profile().unwrap();
        assert_eq!(profile.name, "Priya");
        assert_eq!(profile.age, 30);
        assert_eq!(profile.income, 300000.0);
        assert_eq!(profile.email, "priya@example.com");
    }

    #[test]
    fn history_is_append_only_in_order() {
        let mut session = Session::new("abc");
        session.push_user("hi");
        session.push_assistant("What is your name?");
        session.push_user("priya");

        let roles: Vec<Role> = session
            .conversation_history
            .iter()
            .map(|t| t.role)
            .collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(session.conversation_history[2].message, "priya");
    }

    #[test]
    fn session_serde_roundtrip() {
        let mut session = Session::new("abc");
        session.name = Some("Priya".to_string());
        session.current_field = Field::Age;
        session.push_user("priya");

        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.session_id, "abc");
        assert_eq!(parsed.name.as_deref(), Some("Priya"));
        assert_eq!(parsed.current_field, Field::Age);
        assert_eq!(parsed.conversation_history.len(), 1);
    }
}
