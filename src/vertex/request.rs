// Fixed generation settings for the /llm endpoint
// Author: kelexine (https://github.com/kelexine)

use crate::models::vertex::{
    Content, GenerateContentRequest, GenerationConfig, HarmBlockThreshold, HarmCategory,
    SafetySetting,
};

/// Model every prompt is sent to.
pub const TEXT_MODEL: &str = "gemini-1.0-pro";

pub const MAX_OUTPUT_TOKENS: u32 = 256;
pub const TEMPERATURE: f32 = 0.5;
pub const CANDIDATE_COUNT: u32 = 1;

pub const SYSTEM_INSTRUCTION: &str = "For example, you are a helpful customer service agent.";

/// Wraps a prompt in the fixed model configuration.
pub fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::with_text("user", prompt)],
        system_instruction: Some(Content::with_text("system", SYSTEM_INSTRUCTION)),
        safety_settings: vec![SafetySetting {
            category: HarmCategory::HarmCategoryDangerousContent,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        }],
        generation_config: Some(GenerationConfig {
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
            temperature: Some(TEMPERATURE),
            candidate_count: Some(CANDIDATE_COUNT),
        }),
    }
}
