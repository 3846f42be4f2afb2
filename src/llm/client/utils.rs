use crate::config::LLMConfig;
use crate::llm::{ChatMessage, Role};

/// 超过该长度的prompt直接使用高质量模型
const EFFICIENT_PROMPT_LIMIT: usize = 32 * 1024;

/// 根据prompt长度选择模型，返回（首选模型，备选模型）
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() <= EFFICIENT_PROMPT_LIMIT {
        let fallover = (llm_config.model_powerful != llm_config.model_efficient)
            .then(|| llm_config.model_powerful.clone());
        return (llm_config.model_efficient.clone(), fallover);
    }
    (llm_config.model_powerful.clone(), None)
}

/// 将消息列表拆分为系统提示词与用户提示词
///
/// system消息合并为preamble；其余消息按顺序拼接，非user角色的消息带上角色标记，
/// 以便单轮prompt的模型仍能看到完整对话。
pub fn split_messages(messages: &[ChatMessage]) -> (String, String) {
    let mut system_parts = Vec::new();
    let mut user_parts = Vec::new();

    for message in messages {
        match message.role {
            Role::System => system_parts.push(message.text.as_str()),
            Role::User => user_parts.push(message.text.clone()),
            Role::Assistant => user_parts.push(format!("Assistant: {}", message.text)),
        }
    }

    (system_parts.join("\n\n"), user_parts.join("\n\n"))
}
