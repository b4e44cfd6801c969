//! The dispatch gate: existence-checked, failure-absorbing tool invocation.

use std::sync::Arc;

use serde_json::{Map, Value};

use synapse_types::{SessionTool, ToolCallResult};

/// Holds the adapted-tool table for the current snapshot and dispatches
/// calls against it.
///
/// The gate is the second enforcement layer for tool existence: the
/// reasoner is already limited to the configured set, but direct callers
/// (the web layer's call-tool endpoint) go through here, and an unknown
/// name is answered locally without ever reaching the transport.
pub struct DispatchGate {
    tools: Vec<Arc<dyn SessionTool>>,
}

impl DispatchGate {
    /// An empty gate. Every call fails until a table is installed.
    #[must_use]
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Swap in a new tool table wholesale.
    pub fn replace(&mut self, tools: Vec<Arc<dyn SessionTool>>) {
        self.tools = tools;
    }

    /// The current table, in catalog order.
    #[must_use]
    pub fn tools(&self) -> &[Arc<dyn SessionTool>] {
        &self.tools
    }

    /// Whether a tool with this name is in the current table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// Invoke a tool by name.
    ///
    /// Unknown names fail locally; transport failures are captured into
    /// the result. Neither case propagates, and neither affects other
    /// tools or the enclosing session.
    pub async fn call(&self, name: &str, arguments: Map<String, Value>) -> ToolCallResult {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            tracing::warn!(tool = %name, "tool not in current snapshot; call refused");
            return ToolCallResult::err(
                name,
                format!("tool '{name}' was not found in the discovered tool set"),
            );
        };

        match tool.invoke(arguments).await {
            Ok(result) => ToolCallResult::ok(name, result),
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool invocation failed");
                ToolCallResult::err(name, e.to_string())
            }
        }
    }
}

impl Default for DispatchGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use synapse_mcp::adapter::AdaptedTool;
    use synapse_mcp::test_utils::StaticTransport;
    use synapse_mcp::transport::Transport;
    use synapse_types::ToolDescriptor;

    fn gate_over(spy: &Arc<StaticTransport>, names: &[&str]) -> DispatchGate {
        let transport: Arc<dyn Transport> = Arc::clone(spy) as Arc<dyn Transport>;
        let mut gate = DispatchGate::new();
        gate.replace(
            names
                .iter()
                .map(|n| {
                    Arc::new(AdaptedTool::new(
                        ToolDescriptor::new(*n, "test tool"),
                        Arc::clone(&transport),
                    )) as Arc<dyn SessionTool>
                })
                .collect(),
        );
        gate
    }

    #[tokio::test]
    async fn unknown_name_never_reaches_the_transport() {
        let spy = Arc::new(StaticTransport::new());
        let gate = gate_over(&spy, &["known"]);

        let result = gate.call("missing", Map::new()).await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("missing"));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn known_name_dispatches_under_its_own_name() {
        let spy = Arc::new(StaticTransport::new());
        let gate = gate_over(&spy, &["a", "b"]);

        let mut args = Map::new();
        args.insert("x".into(), serde_json::json!(1));
        let result = gate.call("b", args).await;

        assert!(result.success);
        assert_eq!(result.tool_name, "b");
        let calls = spy.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "b");
        assert_eq!(calls[0].arguments["x"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn transport_failure_is_captured_and_gate_stays_usable() {
        let spy = Arc::new(StaticTransport::new().with_call_tool_failure("server fell over"));
        let gate = gate_over(&spy, &["t"]);

        let failed = gate.call("t", Map::new()).await;
        assert!(!failed.success);
        assert!(failed.error.as_deref().unwrap().contains("server fell over"));

        // A later call still goes through the gate normally.
        let again = gate.call("t", Map::new()).await;
        assert!(!again.success);
        assert_eq!(spy.call_count(), 2);
    }

    #[tokio::test]
    async fn replace_swaps_the_table_wholesale() {
        let spy = Arc::new(StaticTransport::new());
        let mut gate = gate_over(&spy, &["old"]);
        assert!(gate.contains("old"));

        let transport: Arc<dyn Transport> = Arc::clone(&spy) as Arc<dyn Transport>;
        gate.replace(vec![Arc::new(AdaptedTool::new(
            ToolDescriptor::new("new", "replacement"),
            transport,
        ))]);

        assert!(!gate.contains("old"));
        assert!(gate.contains("new"));
        let result = gate.call("old", Map::new()).await;
        assert!(!result.success);
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_gate_refuses_everything() {
        let gate = DispatchGate::new();
        let result = gate.call("anything", Map::new()).await;
        assert!(!result.success);
        assert!(gate.tools().is_empty());
    }
}
