//! Per-session runtime state and the single-consumer event path.

use std::sync::Arc;

use tracing::debug;

use hermit_agent::persona::PersonaPrompt;
use hermit_agent::provider::ReplyProvider;
use hermit_core::config::HermitConfig;
use hermit_fetch::FetchSource;
use hermit_transport::{InboundEvent, SessionHandle};

use crate::allowlist::AllowList;
use crate::classify::Classifier;
use crate::context::ContextBuffer;
use crate::router;
use crate::saved::SavedMessages;

/// All mutable session state, owned by one object and threaded through the
/// event path. Events are handled strictly one at a time — the supervisor
/// awaits [`Runtime::handle_event`] to completion before taking the next
/// event — so appends and allow-list mutations need no locking.
pub struct Runtime {
    pub(crate) allowlist: AllowList,
    pub(crate) context: ContextBuffer,
    pub(crate) classifier: Classifier,
    pub(crate) saved: SavedMessages,
    pub(crate) provider: Arc<dyn ReplyProvider>,
    pub(crate) fetcher: Arc<dyn FetchSource>,
    pub(crate) persona: PersonaPrompt,
    pub(crate) model: String,
    pub(crate) max_tokens: u32,
}

impl Runtime {
    pub fn new(
        config: &HermitConfig,
        provider: Arc<dyn ReplyProvider>,
        fetcher: Arc<dyn FetchSource>,
    ) -> Self {
        Self {
            allowlist: AllowList::load(config.session.allow_file()),
            context: ContextBuffer::new(),
            classifier: Classifier::new(),
            saved: SavedMessages::new(config.session.saved_file()),
            provider,
            fetcher,
            persona: PersonaPrompt::load(config.agent.persona_path.as_deref()),
            model: config.agent.model.clone(),
            max_tokens: config.agent.max_tokens,
        }
    }

    /// Process one inbound transport event to completion.
    ///
    /// Operator messages are routed through the command table first; exactly
    /// one handler fires on a match. Everything else — including unmatched
    /// operator messages — falls through to auto-reply evaluation.
    pub async fn handle_event(&mut self, handle: &Arc<dyn SessionHandle>, event: InboundEvent) {
        let Some(msg) = self.classifier.classify(handle.as_ref(), event).await else {
            return;
        };

        debug!(
            conversation = %msg.conversation,
            is_group = msg.is_group,
            from_operator = msg.from_operator,
            "inbound message"
        );

        if msg.from_operator {
            if let Some((spec, args)) = router::route(&msg.text) {
                self.run_command(handle, &msg, spec.command, args).await;
                return;
            }
        }

        self.auto_reply(handle, &msg).await;
    }

    /// Read access for tests and diagnostics.
    pub fn allowlist(&self) -> &AllowList {
        &self.allowlist
    }

    pub fn context(&self) -> &ContextBuffer {
        &self.context
    }
}
