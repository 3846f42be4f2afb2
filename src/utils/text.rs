//! 按字符（而非字节）处理文本长度，避免截断到多字节字符中间

/// 文本的字符数
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// 截取前`max_chars`个字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// 截取前`max_chars`个字符，发生截断时追加省略号
pub fn summarize_chars(text: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(text, max_chars);
    if truncated.len() < text.len() {
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
