//! Prompt text sent to the generation backend.

use crate::generation::ChatMessage;

pub const WRITER_SYSTEM_PROMPT: &str = "You are a blog writer.";

pub const IDEAS_SYSTEM_PROMPT: &str = "You are a blog writer. Your response must be a JSON array contained in a key called ideas. Each idea should be a string.";

/// Number of ideas requested per `ideas gen`.
pub const IDEAS_PER_REQUEST: usize = 3;

pub fn ideas_messages(niche: &str, previous: &[String]) -> Vec<ChatMessage> {
    let prompt = format!(
        "Present {} article ideas for a niche blog post about {}. Do not repeat any ideas used previously.\n\nPreviously used ideas:\n{}",
        IDEAS_PER_REQUEST,
        niche,
        previous.join("\n")
    );
    vec![
        ChatMessage::system(IDEAS_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

pub fn thesis_messages(niche: &str, idea: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Create a thesis statement for a niche blog about {}. Use the idea: \"{}\". The thesis must contain 3 unique key points that support the thesis. Write in plain text and do not use markdown. Do not repeat the idea verbatim.",
        niche, idea
    );
    vec![
        ChatMessage::system(WRITER_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

pub fn body_messages(thesis: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Create an article body explaining the thesis. Use the thesis: \"{}\". Write in plain text and do not use markdown or section headers. Include a summary at the end.",
        thesis
    );
    vec![
        ChatMessage::system(WRITER_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

pub fn banner_prompt(idea: &str) -> String {
    format!(
        "Create a banner image for a blog post about {}. The image should be in PNG format and have a resolution of 1792x1024 pixels. Do not use text at all.",
        idea
    )
}
