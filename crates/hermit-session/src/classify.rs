//! Turns raw transport events into normalized [`InboundMessage`]s.

use std::collections::HashMap;

use tracing::debug;

use hermit_core::types::{ConversationId, InboundMessage};
use hermit_transport::{InboundEvent, SessionHandle};

/// Stateful classifier. Holds the lazily populated group-name cache, which is
/// never invalidated — group subjects rarely change within a session.
#[derive(Default)]
pub struct Classifier {
    group_names: HashMap<ConversationId, String>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one transport event. Only the first envelope is processed;
    /// events without a message payload, a routing id, or any text are
    /// discarded.
    pub async fn classify(
        &mut self,
        handle: &dyn SessionHandle,
        event: InboundEvent,
    ) -> Option<InboundMessage> {
        if event.envelopes.len() > 1 {
            debug!(dropped = event.envelopes.len() - 1, "extra envelopes in event dropped");
        }
        let envelope = event.envelopes.into_iter().next()?;

        envelope.content.as_ref()?;
        let conversation = envelope.key.conversation.clone()?;
        let text = envelope.text()?.to_string();

        let is_group = conversation.is_group();
        let (chat_name, sender_name) = if is_group {
            let chat = self.group_name(handle, &conversation).await;
            let sender = envelope
                .push_name
                .clone()
                .or_else(|| {
                    envelope
                        .key
                        .participant
                        .as_deref()
                        .map(|p| p.split('@').next().unwrap_or(p).to_string())
                })
                .unwrap_or_else(|| "Unknown".to_string());
            (chat, sender)
        } else {
            let chat = envelope
                .push_name
                .clone()
                .unwrap_or_else(|| conversation.local_part().to_string());
            (chat.clone(), chat)
        };

        let quoted_text = envelope.quoted_text().map(String::from);
        let mentioned = envelope.first_mention().map(String::from);

        Some(InboundMessage {
            conversation,
            is_group,
            chat_name,
            sender_name,
            text,
            from_operator: envelope.key.from_operator,
            message_id: envelope.key.id,
            quoted_text,
            mentioned,
            timestamp: envelope.timestamp,
        })
    }

    /// Resolve a group's display subject via the cache. Lookup failures fall
    /// back to the id's local part and are not cached, so a later event
    /// retries the lookup.
    async fn group_name(&mut self, handle: &dyn SessionHandle, id: &ConversationId) -> String {
        if let Some(name) = self.group_names.get(id) {
            return name.clone();
        }
        match handle.group_subject(id).await {
            Ok(subject) => {
                self.group_names.insert(id.clone(), subject.clone());
                subject
            }
            Err(e) => {
                debug!(conversation = %id, error = %e, "group subject lookup failed");
                id.local_part().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hermit_transport::{
        Envelope, MessageContent, MessageKey, OutboundPayload, TransportError,
    };

    struct SubjectHandle {
        lookups: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SessionHandle for SubjectHandle {
        async fn send(
            &self,
            _to: &ConversationId,
            _payload: OutboundPayload,
        ) -> Result<(), TransportError> {
            Ok(())
        }

        async fn group_subject(&self, _id: &ConversationId) -> Result<String, TransportError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(TransportError::GroupLookup("offline".into()))
            } else {
                Ok("Project Chat".to_string())
            }
        }
    }

    fn envelope(jid: &str, text: &str, from_operator: bool) -> Envelope {
        Envelope {
            key: MessageKey {
                conversation: Some(ConversationId::new(jid)),
                id: "m1".into(),
                from_operator,
                participant: Some("77@s.whatsapp.net".into()),
            },
            push_name: Some("Dev".into()),
            timestamp: 1_700_000_000,
            content: Some(MessageContent {
                text: Some(text.into()),
                ..Default::default()
            }),
        }
    }

    fn event(envelopes: Vec<Envelope>) -> InboundEvent {
        InboundEvent { envelopes }
    }

    #[tokio::test]
    async fn empty_event_is_discarded() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        assert!(classifier.classify(&handle, event(vec![])).await.is_none());
    }

    #[tokio::test]
    async fn envelope_without_content_is_discarded() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        let mut env = envelope("1@s.whatsapp.net", "x", false);
        env.content = None;
        assert!(classifier.classify(&handle, event(vec![env])).await.is_none());
    }

    #[tokio::test]
    async fn envelope_without_conversation_is_discarded() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        let mut env = envelope("1@s.whatsapp.net", "x", false);
        env.key.conversation = None;
        assert!(classifier.classify(&handle, event(vec![env])).await.is_none());
    }

    #[tokio::test]
    async fn only_first_envelope_is_processed() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        let msg = classifier
            .classify(
                &handle,
                event(vec![
                    envelope("1@s.whatsapp.net", "first", false),
                    envelope("2@s.whatsapp.net", "second", false),
                ]),
            )
            .await
            .unwrap();
        assert_eq!(msg.text, "first");
    }

    #[tokio::test]
    async fn direct_chat_uses_push_name() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        let msg = classifier
            .classify(&handle, event(vec![envelope("91999@s.whatsapp.net", "hi", false)]))
            .await
            .unwrap();
        assert!(!msg.is_group);
        assert_eq!(msg.chat_name, "Dev");
        assert_eq!(msg.sender_name, "Dev");
        assert_eq!(handle.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn quoted_text_and_mention_survive_with_the_message_id() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        let mut env = envelope("120@g.us", "/rizz", true);
        {
            let content = env.content.as_mut().unwrap();
            content.quoted = Some(hermit_transport::QuotedContent {
                text: Some("the quoted line".into()),
            });
            content.mentions = vec!["42@s.whatsapp.net".into()];
        }
        let msg = classifier.classify(&handle, event(vec![env])).await.unwrap();
        assert_eq!(msg.message_id, "m1");
        assert_eq!(msg.quoted_text.as_deref(), Some("the quoted line"));
        assert_eq!(msg.mentioned.as_deref(), Some("42@s.whatsapp.net"));
    }

    #[tokio::test]
    async fn group_subject_is_cached() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: false };
        let mut classifier = Classifier::new();
        for _ in 0..3 {
            let msg = classifier
                .classify(&handle, event(vec![envelope("120@g.us", "hello", false)]))
                .await
                .unwrap();
            assert!(msg.is_group);
            assert_eq!(msg.chat_name, "Project Chat");
        }
        assert_eq!(handle.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_group_lookup_falls_back_and_is_not_cached() {
        let handle = SubjectHandle { lookups: AtomicUsize::new(0), fail: true };
        let mut classifier = Classifier::new();
        for _ in 0..2 {
            let msg = classifier
                .classify(&handle, event(vec![envelope("120@g.us", "hello", false)]))
                .await
                .unwrap();
            assert_eq!(msg.chat_name, "120");
        }
        assert_eq!(handle.lookups.load(Ordering::SeqCst), 2);
    }
}
