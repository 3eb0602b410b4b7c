// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for legal questions.

use nyaya_core::{Attachment, InferenceRequest, Language, PromptPart};

const FILE_INSTRUCTION: &str =
    "Analyze the attached document/image and answer the question based on it.";

/// The fixed instruction that opens every prompt.
pub fn system_instruction(language: Language) -> String {
    format!(
        "You are a helpful Indian legal assistant. Provide simple, step-by-step legal guidance based on Indian law. Respond in {}. Always suggest consulting a lawyer if the issue is serious.",
        language.display_name()
    )
}

/// Builds the prompt text: instruction, then the question, then the file hint.
pub fn build_prompt(language: Language, question: Option<&str>, has_file: bool) -> String {
    let mut prompt = system_instruction(language);
    if let Some(question) = question {
        prompt.push_str("\n\nQuestion: ");
        prompt.push_str(question);
    }
    if has_file {
        prompt.push_str("\n\n");
        prompt.push_str(FILE_INSTRUCTION);
    }
    prompt
}

/// Pairs the prompt text with the inline attachment, text first.
pub fn build_request(prompt: String, attachment: Option<&Attachment>) -> InferenceRequest {
    let mut parts = vec![PromptPart::Text(prompt)];
    if let Some(file) = attachment {
        parts.push(PromptPart::InlineData {
            mime_type: file.mime_type.clone(),
            data: file.base64.clone(),
        });
    }
    InferenceRequest { parts }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH_INSTRUCTION: &str = "You are a helpful Indian legal assistant. Provide simple, step-by-step legal guidance based on Indian law. Respond in English. Always suggest consulting a lawyer if the issue is serious.";

    #[test]
    fn question_only_prompt() {
        let prompt = build_prompt(Language::English, Some("What is bail?"), false);
        assert_eq!(prompt, format!("{ENGLISH_INSTRUCTION}\n\nQuestion: What is bail?"));
    }

    #[test]
    fn hindi_prompt_names_hindi() {
        let prompt = build_prompt(Language::Hindi, Some("q"), false);
        assert!(prompt.contains("Respond in Hindi."));
        assert!(!prompt.contains("Respond in English."));
    }

    #[test]
    fn file_only_prompt_has_no_question_line() {
        let prompt = build_prompt(Language::English, None, true);
        assert_eq!(
            prompt,
            format!(
                "{ENGLISH_INSTRUCTION}\n\nAnalyze the attached document/image and answer the question based on it."
            )
        );
    }

    #[test]
    fn question_precedes_file_instruction() {
        let prompt = build_prompt(Language::English, Some("Is this valid?"), true);
        let q = prompt.find("Question: Is this valid?").unwrap();
        let f = prompt.find("Analyze the attached").unwrap();
        assert!(q < f);
    }

    #[test]
    fn request_puts_text_before_inline_data() {
        let file = Attachment::new("aGk=", "image/png");
        let request = build_request("prompt".into(), Some(&file));
        assert_eq!(
            request.parts,
            vec![
                PromptPart::Text("prompt".into()),
                PromptPart::InlineData {
                    mime_type: "image/png".into(),
                    data: "aGk=".into(),
                },
            ]
        );
        assert_eq!(build_request("p".into(), None).parts.len(), 1);
    }
}
