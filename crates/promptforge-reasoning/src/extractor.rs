//! Goal and context extraction from free-form prompt text.
//!
//! Extraction is marker based: a prompt that says `Goal: ...` or
//! `Context: ...` is taken at its word. Anything missing degrades to the
//! template, then to a fixed default.

use promptforge_core::PromptTemplate;

use crate::text::{marker_end, take_chars, RE_CONTEXT_MARKERS, RE_GOAL_MARKERS};

pub const DEFAULT_GOAL: &str = "Process the given input";
pub const DEFAULT_CONTEXT: &str = "General context";
const TEMPLATE_CONTEXT_CHARS: usize = 200;

fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}

/// Goal stated in the prompt, else the template's description, else a default.
pub fn extract_goal(prompt: &str, template: &PromptTemplate) -> String {
    for marker in RE_GOAL_MARKERS.iter() {
        if let Some(end) = marker_end(prompt, marker) {
            let rest = &prompt[end..];
            let sentence = match rest.find(is_sentence_terminator) {
                Some(stop) => &rest[..stop],
                None => rest,
            };
            let goal = sentence.trim();
            if !goal.is_empty() {
                return goal.to_string();
            }
        }
    }

    let description = template.description.trim();
    if !description.is_empty() {
        return description.to_string();
    }
    DEFAULT_GOAL.to_string()
}

/// Every context-like line from the prompt joined with spaces, else the
/// head of the template content, else a default.
pub fn extract_context(prompt: &str, template: &PromptTemplate) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for marker in RE_CONTEXT_MARKERS.iter() {
        if let Some(end) = marker_end(prompt, marker) {
            let rest = &prompt[end..];
            let line = match rest.find('\n') {
                Some(stop) => &rest[..stop],
                None => rest,
            };
            let line = line.trim();
            if !line.is_empty() {
                parts.push(line);
            }
        }
    }

    if !parts.is_empty() {
        return parts.join(" ");
    }

    let content = template.content.trim();
    if !content.is_empty() {
        return take_chars(content, TEMPLATE_CONTEXT_CHARS);
    }
    DEFAULT_CONTEXT.to_string()
}

/// Goal and context in one pass.
pub fn extract_goal_and_context(prompt: &str, template: &PromptTemplate) -> (String, String) {
    (
        extract_goal(prompt, template),
        extract_context(prompt, template),
    )
}
