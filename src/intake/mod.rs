//! The linear intake flow.
//!
//! Six fields collected in fixed order by the [`controller`], validated
//! by [`validate`], tracked by the [`field`] state machine, and held in
//! [`session`]s behind the [`store`] abstraction.

pub mod controller;
pub mod field;
pub mod prompts;
pub mod session;
pub mod store;
pub mod validate;

pub use controller::IntakeController;
pub use field::Field;
pub use session::{ConversationTurn, Profile, Role, Session};
pub use store::{InMemorySessionStore, SessionStore};
