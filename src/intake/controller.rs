//! Conversation controller — drives the field-collection state machine.
//!
//! On each inbound message the controller validates the field currently
//! being collected, advances on acceptance, re-prompts on rejection, and
//! on the completion transition runs exactly one evaluation followed by
//! the persistence and notification sinks, in that order. Sink failures
//! are logged and never affect the reply.

use std::sync::Arc;

use crate::eligibility::EligibilityEvaluator;
use crate::error::Error;
use crate::notify::NotificationSink;
use crate::persist::{EligibilityRecord, RecordSink};

use super::field::Field;
use super::prompts;
use super::session::Session;
use super::store::SessionStore;
use super::validate;

pub struct IntakeController {
    store: Arc<dyn SessionStore>,
    evaluator: EligibilityEvaluator,
    records: Arc<dyn RecordSink>,
    notifier: Option<Arc<dyn NotificationSink>>,
}

impl IntakeController {
    pub fn new(
        store: Arc<dyn SessionStore>,
        evaluator: EligibilityEvaluator,
        records: Arc<dyn RecordSink>,
        notifier: Option<Arc<dyn NotificationSink>>,
    ) -> Self {
        Self {
            store,
            evaluator,
            records,
            notifier,
        }
    }

    /// Process one inbound message and return the reply text.
    pub async fn handle_message(&self, session_id: &str, raw: &str) -> Result<String, Error> {
        let text = raw.trim().to_lowercase();

        let mut session = self.store.get_or_create(session_id).await?;
        session.push_user(&text);

        let reply = match session.current_field {
            Field::Name => match validate::validate_name(&text) {
                Some(name) => {
                    session.name = Some(name);
                    advance_and_prompt(&mut session)
                }
                None => prompts::rejection_prompt(Field::Name).to_string(),
            },
            Field::Age => match validate::validate_age(&text) {
                Some(age) => {
                    session.age = Some(age);
                    advance_and_prompt(&mut session)
                }
                None => prompts::rejection_prompt(Field::Age).to_string(),
            },
            Field::Income => match validate::validate_income(&text) {
                Some(income) => {
                    session.income = Some(income);
                    advance_and_prompt(&mut session)
                }
                None => prompts::rejection_prompt(Field::Income).to_string(),
            },
            Field::State => match validate::validate_state(&text) {
                Some(state) => {
                    session.state_name = Some(state);
                    advance_and_prompt(&mut session)
                }
                None => prompts::rejection_prompt(Field::State).to_string(),
            },
            Field::Phone => match validate::validate_phone(&text) {
                Some(phone) => {
                    session.phone = Some(phone);
                    advance_and_prompt(&mut session)
                }
                None => prompts::rejection_prompt(Field::Phone).to_string(),
            },
            Field::Email => match validate::validate_email(&text) {
                Some(email) => {
                    session.email = Some(email);
                    self.finalize(&mut session).await
                }
                None => prompts::rejection_prompt(Field::Email).to_string(),
            },
            Field::Complete => follow_up_reply(&text),
        };

        session.push_assistant(&reply);
        self.store.update(session).await?;

        Ok(reply)
    }

    /// Completion transition: evaluate once, then persistence sink, then
    /// notification sink. Both sinks are non-fatal.
    async fn finalize(&self, session: &mut Session) -> String {
        if let Err(e) = session.advance() {
            tracing::warn!(session_id = %session.session_id, "Failed to advance field: {e}");
        }

        let Some(profile) = session.profile() else {
            // Unreachable when fields were populated in order.
            tracing::error!(
                session_id = %session.session_id,
                "Completion reached with unset fields"
            );
            return prompts::APOLOGY.to_string();
        };

        let outcome = self.evaluator.evaluate(&profile).await;
        session.eligible_schemes = Some(outcome.eligible_schemes.clone());
        let reply = prompts::completion_summary(&outcome.eligible_schemes);

        let record =
            EligibilityRecord::new(&session.session_id, &profile, &outcome.eligible_schemes);
        if let Err(e) = self.records.store(&record).await {
            tracing::warn!(
                error = %e,
                session_id = %session.session_id,
                "Persistence sink failed"
            );
        }

        match &self.notifier {
            Some(notifier) => {
                if let Err(e) = notifier.send(&profile, &outcome.eligible_schemes).await {
                    tracing::warn!(
                        error = %e,
                        session_id = %session.session_id,
                        "Notification sink failed"
                    );
                }
            }
            None => tracing::info!("Notification sink not configured; skipping eligibility email"),
        }

        reply
    }
}

fn advance_and_prompt(session: &mut Session) -> String {
    match session.advance() {
        Ok(next) => prompts::field_prompt(next).to_string(),
        Err(e) => {
            tracing::warn!(session_id = %session.session_id, "Failed to advance field: {e}");
            prompts::ALREADY_ASSESSED.to_string()
        }
    }
}

/// Once complete, messages are answered from a small fixed set.
fn follow_up_reply(text: &str) -> String {
    if text.contains("tell me more") || text.contains("more about") {
        prompts::SCHEME_DETAILS.to_string()
    } else {
        prompts::ALREADY_ASSESSED.to_string()
    }
}
