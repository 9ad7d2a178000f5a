//! Scheduled delivery queue — deferred one-shot sends.
//!
//! A scheduled send is armed as an independent one-shot timer and fires
//! regardless of other traffic. Nothing is persisted: a restart drops all
//! pending sends.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;
use tracing::{info, warn};

use hermit_core::types::ConversationId;
use hermit_transport::{OutboundPayload, SessionHandle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unparseable timestamp: {0}")]
    Unparseable(String),

    #[error("scheduled time is not in the future")]
    NotInFuture,
}

/// A registered deferred send. Owned by its timer task from registration
/// until it fires or the process exits.
#[derive(Debug, Clone)]
pub struct ScheduledSend {
    pub conversation: ConversationId,
    pub text: String,
    pub fire_at: DateTime<Utc>,
}

/// Parse a schedule timestamp: RFC 3339, or a naive
/// `YYYY-MM-DDTHH:MM[:SS]` interpreted in local time.
pub fn parse_fire_at(raw: &str) -> Result<DateTime<Utc>, ScheduleError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ScheduleError::Unparseable(raw.to_string()))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::Unparseable(raw.to_string()))
}

pub struct DeliveryQueue;

impl DeliveryQueue {
    /// Validate `fire_at_raw` and arm a one-shot timer that attempts exactly
    /// one send at the target time. Send failure is logged, not retried.
    pub fn schedule(
        handle: Arc<dyn SessionHandle>,
        conversation: ConversationId,
        text: String,
        fire_at_raw: &str,
    ) -> Result<ScheduledSend, ScheduleError> {
        let fire_at = parse_fire_at(fire_at_raw)?;
        let now = Utc::now();
        if fire_at <= now {
            return Err(ScheduleError::NotInFuture);
        }

        let delay = (fire_at - now)
            .to_std()
            .map_err(|_| ScheduleError::NotInFuture)?;

        let send = ScheduledSend {
            conversation: conversation.clone(),
            text: text.clone(),
            fire_at,
        };

        info!(conversation = %conversation, fire_at = %fire_at, "send scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = handle
                .send(&conversation, OutboundPayload::text(text))
                .await
            {
                warn!(conversation = %conversation, error = %e, "scheduled send failed");
            }
        });

        Ok(send)
    }
}
