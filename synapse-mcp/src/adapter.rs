//! Adapt discovered descriptors into callable [`SessionTool`]s.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use synapse_types::{BoxFuture, CapabilitySnapshot, SessionTool, ToolDescriptor, ToolError};

use crate::transport::Transport;

/// One discovered tool, bound to the transport that advertised it.
///
/// Each adapter owns its descriptor outright; the dispatch name is read
/// from that owned copy, never from shared iteration state. Invoking
/// adapter #k therefore always sends descriptor #k's name, whatever order
/// the set was built or called in.
pub struct AdaptedTool {
    descriptor: ToolDescriptor,
    transport: Arc<dyn Transport>,
}

impl AdaptedTool {
    /// Bind a descriptor to the transport it was discovered on.
    #[must_use]
    pub fn new(descriptor: ToolDescriptor, transport: Arc<dyn Transport>) -> Self {
        Self {
            descriptor,
            transport,
        }
    }

    /// The descriptor this adapter was built from.
    #[must_use]
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }
}

impl SessionTool for AdaptedTool {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn description(&self) -> &str {
        &self.descriptor.description
    }

    fn input_schema(&self) -> Value {
        self.descriptor
            .input_schema
            .clone()
            .unwrap_or_else(|| json!({"type": "object"}))
    }

    fn invoke(&self, arguments: Map<String, Value>) -> BoxFuture<'_, Result<Value, ToolError>> {
        let name = self.descriptor.name.clone();
        let transport = Arc::clone(&self.transport);

        Box::pin(async move {
            tracing::debug!(tool = %name, "forwarding tool invocation");
            transport
                .call_tool(&name, arguments)
                .await
                .map_err(ToolError::from)
        })
    }
}

/// Adapt every tool in a snapshot, preserving catalog order.
///
/// The returned set is rebuilt wholesale on every discovery pass; handles
/// cloned out of an older set stay valid and keep dispatching against the
/// transport they captured.
#[must_use]
pub fn adapt_all(
    snapshot: &CapabilitySnapshot,
    transport: &Arc<dyn Transport>,
) -> Vec<Arc<dyn SessionTool>> {
    snapshot
        .tools
        .iter()
        .map(|descriptor| {
            Arc::new(AdaptedTool::new(descriptor.clone(), Arc::clone(transport)))
                as Arc<dyn SessionTool>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CapabilityRegistry;
    use crate::test_utils::StaticTransport;
    use serde_json::json;

    fn arc_transport(transport: StaticTransport) -> Arc<dyn Transport> {
        Arc::new(transport)
    }

    #[tokio::test]
    async fn each_adapter_dispatches_its_own_name() {
        // Regression for the shared-loop-variable hazard: with several
        // tools adapted in one pass, every adapter must dispatch under its
        // own descriptor's name, not the last one seen.
        let spy = Arc::new(
            StaticTransport::new().with_tools(json!([
                {"name": "alpha", "description": "first"},
                {"name": "beta", "description": "second"},
                {"name": "gamma", "description": "third"},
            ])),
        );
        let transport: Arc<dyn Transport> = spy.clone();

        let snapshot = CapabilityRegistry::new(Arc::clone(&transport))
            .discover()
            .await;
        let adapted = adapt_all(&snapshot, &transport);
        assert_eq!(adapted.len(), 3);

        for tool in &adapted {
            tool.invoke(Map::new()).await.unwrap();
        }

        let names: Vec<String> = spy.recorded_calls().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn invoke_forwards_arguments_verbatim() {
        let spy = Arc::new(StaticTransport::new());
        let transport: Arc<dyn Transport> = spy.clone();

        let tool = AdaptedTool::new(ToolDescriptor::new("speak", "Speak"), transport);
        let mut args = Map::new();
        args.insert("text".into(), json!("hello"));
        args.insert("voice".into(), json!("calm"));
        tool.invoke(args.clone()).await.unwrap();

        let calls = spy.recorded_calls();
        assert_eq!(calls[0].name, "speak");
        assert_eq!(calls[0].arguments, args);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_execution_failed() {
        let transport = arc_transport(StaticTransport::new().with_call_tool_failure("boom"));
        let tool = AdaptedTool::new(ToolDescriptor::new("t", "T"), transport);

        let err = tool.invoke(Map::new()).await.unwrap_err();
        match err {
            ToolError::ExecutionFailed(msg) => assert!(msg.contains("boom")),
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn schema_defaults_to_object_when_absent() {
        let transport = arc_transport(StaticTransport::new());
        let tool = AdaptedTool::new(ToolDescriptor::new("t", "T"), transport);
        assert_eq!(tool.input_schema(), json!({"type": "object"}));
    }

    #[tokio::test]
    async fn stale_handle_keeps_dispatching_after_rebuild() {
        // The adapter set is replaced wholesale on re-discovery; a handle
        // cloned out of the old set still dispatches its captured name.
        let spy = Arc::new(StaticTransport::new().with_tools(json!([{"name": "old"}])));
        let transport: Arc<dyn Transport> = spy.clone();

        let snapshot = CapabilityRegistry::new(Arc::clone(&transport))
            .discover()
            .await;
        let first = adapt_all(&snapshot, &transport);
        let stale = Arc::clone(&first[0]);

        // Rebuild; the old vector is dropped.
        let snapshot = CapabilityRegistry::new(Arc::clone(&transport))
            .discover()
            .await;
        let _second = adapt_all(&snapshot, &transport);
        drop(first);

        stale.invoke(Map::new()).await.unwrap();
        assert_eq!(spy.recorded_calls()[0].name, "old");
    }
}
