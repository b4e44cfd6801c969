//! Composability patterns across the workspace, without live backends:
//!
//! 1. **Transport swap** — the same session logic over different transport
//!    implementations.
//! 2. **Reasoner swap** — the same session, different reasoning backends.
//! 3. **Isolated conversations** — independent sessions through one store,
//!    each owning its own transport and snapshot.
//! 4. **Web-layer shapes** — everything the facade returns serializes the
//!    way a route handler would emit it.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::{Map, Value, json};

use synapse::prelude::*;
use synapse_agent::test_utils::{EchoReasoner, ScriptedReasoner};
use synapse_mcp::test_utils::StaticTransport;

fn catalog() -> Value {
    json!([
        {"name": "text_to_speech", "description": "Synthesize audio from text"},
        {"name": "list_voices", "description": "Enumerate available voices"},
    ])
}

// ── 1. Transport swap ────────────────────────────────────────────────────

/// Minimal hand-rolled transport: same contract, different wiring.
struct SingleToolTransport;

#[async_trait::async_trait]
impl Transport for SingleToolTransport {
    async fn connect(&self) -> Result<bool, TransportError> {
        Ok(true)
    }
    async fn server_info(&self) -> Result<Value, TransportError> {
        Ok(json!({"name": "single"}))
    }
    async fn list_tools(&self) -> Result<Value, TransportError> {
        // Wrapper-object shape on purpose; normalization must absorb it.
        Ok(json!({"tools": [{"name": "only_tool", "description": "The one"}]}))
    }
    async fn list_resources(&self) -> Result<Value, TransportError> {
        Ok(json!([]))
    }
    async fn list_prompts(&self) -> Result<Value, TransportError> {
        Ok(json!([]))
    }
    async fn call_tool(
        &self,
        name: &str,
        _arguments: Map<String, Value>,
    ) -> Result<Value, TransportError> {
        Ok(json!({"echoed": name}))
    }
    async fn read_resource(&self, _uri: &str) -> Result<Value, TransportError> {
        Err(TransportError::Protocol("no resources".into()))
    }
    async fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

#[tokio::test]
async fn same_session_logic_over_either_transport() {
    for transport in [
        Arc::new(StaticTransport::new().with_tools(catalog())) as Arc<dyn Transport>,
        Arc::new(SingleToolTransport) as Arc<dyn Transport>,
    ] {
        let mut session = Session::new(transport, None, SessionConfig::default());
        session.initialize().await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert!(!session.get_tools().is_empty());

        let first = session.get_tools()[0].name.clone();
        let result = session.call_tool(&first, Map::new()).await;
        assert!(result.success);
        session.cleanup().await;
    }
}

// ── 2. Reasoner swap ─────────────────────────────────────────────────────

#[tokio::test]
async fn same_session_different_reasoners() {
    let make_transport =
        || Arc::new(StaticTransport::new().with_tools(catalog())) as Arc<dyn Transport>;

    let mut echoing = Session::new(
        make_transport(),
        Some(Box::new(EchoReasoner::new())),
        SessionConfig::default(),
    );
    assert_eq!(echoing.query("hi").await.unwrap(), "echo: hi");

    let mut scripted = Session::new(
        make_transport(),
        Some(Box::new(ScriptedReasoner::new(vec!["as scripted"]))),
        SessionConfig::default(),
    );
    assert_eq!(scripted.query("hi").await.unwrap(), "as scripted");
}

// ── 3. Isolated conversations through one store ──────────────────────────

#[tokio::test]
async fn conversations_in_one_store_stay_isolated() {
    let store = Arc::new(SessionStore::new());

    let spy_a = Arc::new(StaticTransport::new().with_tools(catalog()));
    let spy_b = Arc::new(StaticTransport::new().with_tools(json!([{"name": "other"}])));
    store
        .insert(
            "conv-a",
            Session::new(
                spy_a.clone() as Arc<dyn Transport>,
                Some(Box::new(EchoReasoner::new())),
                SessionConfig::default(),
            ),
        )
        .await;
    store
        .insert(
            "conv-b",
            Session::new(
                spy_b.clone() as Arc<dyn Transport>,
                Some(Box::new(EchoReasoner::new())),
                SessionConfig::default(),
            ),
        )
        .await;

    let mut tasks = Vec::new();
    for id in ["conv-a", "conv-b"] {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            let handle = store.get(id).await.unwrap();
            let mut session = handle.lock().await;
            session.query(id).await.unwrap()
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().starts_with("echo: conv-"));
    }

    // Each conversation dispatched against its own transport only.
    let a = store.get("conv-a").await.unwrap();
    a.lock().await.call_tool("text_to_speech", Map::new()).await;
    assert_eq!(spy_a.call_count(), 1);
    assert_eq!(spy_b.call_count(), 0);

    // Tear down through the store, releasing each transport once.
    for id in ["conv-a", "conv-b"] {
        let handle = store.remove(id).await.unwrap();
        handle.lock().await.cleanup().await;
    }
    assert!(store.is_empty().await);
    assert_eq!(spy_a.close_count(), 1);
    assert_eq!(spy_b.close_count(), 1);
}

// ── 4. Web-layer shapes ──────────────────────────────────────────────────

#[tokio::test]
async fn facade_outputs_serialize_for_route_handlers() {
    let transport: Arc<dyn Transport> =
        Arc::new(StaticTransport::new().with_tools(catalog()).with_resources(json!([
            {"uri": "voice://library", "name": "voices", "mimeType": "application/json"},
        ])));
    let mut session = Session::new(
        transport,
        Some(Box::new(EchoReasoner::new())),
        SessionConfig::default(),
    );
    session.initialize().await.unwrap();

    let capabilities = serde_json::to_value(session.get_capabilities()).unwrap();
    assert_eq!(capabilities["tools"].as_array().unwrap().len(), 2);
    assert_eq!(
        capabilities["resources"][0]["uri"],
        json!("voice://library")
    );
    assert!(capabilities.get("error").is_none());

    let call = session.call_tool("list_voices", Map::new()).await;
    let call_json = serde_json::to_value(&call).unwrap();
    assert_eq!(call_json["success"], json!(true));
    assert_eq!(call_json["tool_name"], json!("list_voices"));

    // Stream fragments serialize one by one, SSE-style.
    let fragments: Vec<StreamFragment> = session.stream("hello", None).await.collect().await;
    for fragment in &fragments {
        let event = serde_json::to_string(fragment).unwrap();
        assert!(event.contains("\"type\""));
    }
}
