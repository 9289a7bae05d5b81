//! Chat service: streamed replies with durable memory and optional search.
//!
//! Two reply paths:
//! - Plain: the user message is appended to memory, the last
//!   `MEMORY_WINDOW` messages form the prompt, and the assistant reply is
//!   appended once the stream completes.
//! - Search-augmented: the provider's hits are classified and encoded into
//!   the search payload, which is emitted first inside marker comments so
//!   the client can render it separately from the model's prose. Memory is
//!   managed manually on this path: the *original* user question is stored
//!   (not the search-context prompt), and the stored assistant message
//!   includes the marker block so replays render identically.

use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info};

use parlance_types::llm::ChatRequest;
use parlance_types::message::ChatMessage;
use parlance_types::session::SessionSummary;

use crate::chat::client::{ChatClient, ChunkStream};
use crate::memory::ConversationMemory;
use crate::search::classifier::group_by_category;
use crate::search::encoder::encode_search_payload;
use crate::search::provider::SearchProvider;

/// Default system prompt for every reply.
const DEFAULT_SYSTEM_PROMPT: &str = "请使用中文回答所有问题。";

/// How many trailing messages of history are sent to the model.
const MEMORY_WINDOW: usize = 100;

/// Status string embedded in every search payload.
const SEARCH_STATUS: &str = "搜索完成";

/// Markers wrapping the search payload in the outgoing stream. The client
/// splits on these to render the payload separately from the reply text.
pub const SEARCH_BLOCK_START: &str = "<!--SEARCH_START-->";
pub const SEARCH_BLOCK_END: &str = "<!--SEARCH_END-->";

/// Prompt sent on the search path. Ends with the question marker that title
/// derivation strips when a stored prompt leaks into a session's history.
fn search_context_prompt(payload: &str, question: &str) -> String {
    format!(
        "你是一个知识渊博的助手。请基于以下搜索结果，用自然流畅的中文回答用户的问题。\n\
         \n\
         格式要求（非常重要）：\n\
         - 使用 Markdown 格式输出\n\
         - 段落之间必须空一行\n\
         - 如果有多个要点，使用列表格式，每个要点单独一行\n\
         - 不要把所有内容挤在一段里\n\
         \n\
         内容要求：\n\
         - 用自己的语言组织答案，不要复制原文\n\
         - 提炼关键信息，回答要有逻辑性\n\
         - 不要显示URL链接\n\
         \n\
         搜索结果（JSON格式）：\n\
         {payload}\n\
         \n\
         用户问题：{question}"
    )
}

/// Orchestrates conversation memory, the LLM client, and the search
/// provider into streamed chat replies.
pub struct ChatService<M, C, S> {
    memory: Arc<M>,
    client: Arc<C>,
    search: Arc<S>,
}

impl<M, C, S> ChatService<M, C, S>
where
    M: ConversationMemory + 'static,
    C: ChatClient + 'static,
    S: SearchProvider + 'static,
{
    pub fn new(memory: Arc<M>, client: Arc<C>, search: Arc<S>) -> Self {
        Self {
            memory,
            client,
            search,
        }
    }

    /// Stream a reply for one user message.
    ///
    /// The returned stream is `'static`: it owns clones of the service's
    /// collaborators and can outlive the call.
    pub fn stream_chat(&self, session_id: &str, message: &str, enable_search: bool) -> ChunkStream {
        info!(session_id, enable_search, "starting chat stream");
        if enable_search {
            self.stream_with_search(session_id.to_string(), message.to_string())
        } else {
            self.stream_plain(session_id.to_string(), message.to_string())
        }
    }

    /// Read the session's recent history (bounded by the memory window).
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.memory.read(session_id, MEMORY_WINDOW).await
    }

    /// Remove the session and all its state.
    pub async fn clear_history(&self, session_id: &str) {
        self.memory.clear(session_id).await;
    }

    /// List all stored sessions, most recent first.
    pub async fn sessions(&self) -> Vec<SessionSummary> {
        self.memory.list_sessions().await
    }

    /// Set a session's custom title.
    pub async fn update_title(&self, session_id: &str, title: &str) {
        self.memory.set_title(session_id, title).await;
    }

    fn stream_plain(&self, session_id: String, message: String) -> ChunkStream {
        let memory = Arc::clone(&self.memory);
        let client = Arc::clone(&self.client);

        Box::pin(async_stream::try_stream! {
            memory
                .append(&session_id, vec![ChatMessage::user(&message)])
                .await?;
            let history = memory.read(&session_id, MEMORY_WINDOW).await;
            let request = ChatRequest::new(DEFAULT_SYSTEM_PROMPT, history);

            let mut chunks = client.stream(request);
            let mut reply = String::new();
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk?;
                reply.push_str(&chunk);
                yield chunk;
            }

            memory
                .append(&session_id, vec![ChatMessage::assistant(&reply)])
                .await?;
        })
    }

    fn stream_with_search(&self, session_id: String, message: String) -> ChunkStream {
        let memory = Arc::clone(&self.memory);
        let client = Arc::clone(&self.client);
        let search = Arc::clone(&self.search);

        Box::pin(async_stream::try_stream! {
            let hits = search.search(&message).await?;
            debug!(session_id, hit_count = hits.len(), "search completed");

            let groups = group_by_category(&hits);
            let payload = encode_search_payload(SEARCH_STATUS, &message, hits.len(), &groups);
            let block = format!("{SEARCH_BLOCK_START}{payload}{SEARCH_BLOCK_END}\n\n");

            // Store the original question, not the search-context prompt.
            memory
                .append(&session_id, vec![ChatMessage::user(&message)])
                .await?;

            let mut reply = block.clone();
            yield block;

            let prompt = search_context_prompt(&payload, &message);
            let request = ChatRequest::new(DEFAULT_SYSTEM_PROMPT, vec![ChatMessage::user(prompt)]);

            let mut chunks = client.stream(request);
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk?;
                reply.push_str(&chunk);
                yield chunk;
            }

            // The stored reply keeps the marker block so replays render
            // identically to the live stream.
            memory
                .append(&session_id, vec![ChatMessage::assistant(&reply)])
                .await?;
        })
    }
}
