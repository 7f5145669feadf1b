//! Persistence sink — writes the finalized eligibility record.
//!
//! The REST sink posts to a Supabase-style endpoint; without configured
//! credentials the record is logged instead. Either way a failure never
//! affects the reply or the session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PersistConfig;
use crate::error::PersistError;
use crate::intake::session::Profile;

/// The finalized record written once per completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub id: Uuid,
    pub session_id: String,
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub state: String,
    pub phone: String,
    pub email: String,
    pub eligible_schemes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl EligibilityRecord {
    pub fn new(session_id: &str, profile: &Profile, schemes: &[String]) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            name: profile.name.clone(),
            age: profile.age,
            income: profile.income,
            state: profile.state_name.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            eligible_schemes: schemes.to_vec(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn store(&self, record: &EligibilityRecord) -> Result<(), PersistError>;
}

/// REST sink posting records to `{base_url}/rest/v1/user_eligibility`.
pub struct RestRecordSink {
    config: PersistConfig,
    client: reqwest::Client,
}

impl RestRecordSink {
    pub fn new(config: PersistConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/user_eligibility", self.config.base_url)
    }
}

#[async_trait]
impl RecordSink for RestRecordSink {
    async fn store(&self, record: &EligibilityRecord) -> Result<(), PersistError> {
        let key = self.config.service_key.expose_secret();
        let response = self
            .client
            .post(self.endpoint())
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(session_id = %record.session_id, "Eligibility record stored");
        Ok(())
    }
}

/// Degraded sink used when no credentials are configured: the record is
/// logged and dropped.
pub struct LogOnlySink;

#[async_trait]
impl RecordSink for LogOnlySink {
    async fn store(&self, record: &EligibilityRecord) -> Result<(), PersistError> {
        match serde_json::to_string(record) {
            Ok(json) => tracing::info!(
                record = %json,
                "Persistence sink not configured; record logged only"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize eligibility record"),
        }
        Ok(())
    }
}
