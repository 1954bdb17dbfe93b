use promptforge_core::ReasoningChain;

/// Render a chain as a block of text ready to be inserted into a prompt.
pub fn render_chain(chain: &ReasoningChain) -> String {
    let mut rendered = format!("Reasoning toward: {}\n", chain.goal);
    for (position, step) in chain.steps.iter().enumerate() {
        rendered.push_str(&format!(
            "{}. [{}] {}\n",
            position + 1,
            step.step_type,
            step.content
        ));
    }
    rendered
}
