//! Default directive construction.
//!
//! The directive is a behavioral contract, not a string template: it must
//! tell the reasoner to invoke a tool only when the user's request requires
//! the corresponding action. Callers can replace it, but whatever they
//! supply is expected to keep that instruction.

use synapse_types::ToolDescriptor;

/// Build the default directive for the given catalog.
///
/// Enumerates every tool by name and description so the reasoner knows
/// what it can reach, and gates invocation on user intent. An empty
/// catalog produces a tool-less variant that keeps the session
/// conversational.
#[must_use]
pub fn default_directive(tools: &[ToolDescriptor]) -> String {
    if tools.is_empty() {
        return "You are an AI assistant. No remote tools are currently available, \
                but you can still help with general questions and conversation."
            .to_string();
    }

    let listing: Vec<String> = tools
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect();

    format!(
        "You are an AI assistant with access to remote tools.\n\n\
         Available tools:\n{}\n\n\
         Understand each request before acting. Invoke a tool only when the \
         user's request requires that action; otherwise answer directly. \
         When you do invoke a tool, base your reply on its result.",
        listing.join("\n")
    )
}
