//! ImageKit Error Classification
//!
//! 再送で回復し得るエラーかどうかの分類

/// Convert an error and all of its sources to a single string
pub fn error_chain_to_string(e: &(dyn std::error::Error + 'static)) -> String {
    let mut messages = vec![e.to_string()];
    let mut source = e.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages.join(" | ")
}

/// Check if an error message indicates a dropped or refused connection
pub fn is_connection_error(error_msg: &str) -> bool {
    error_msg.contains("Broken pipe")
        || error_msg.contains("broken pipe")
        || error_msg.contains("Connection reset")
        || error_msg.contains("connection reset")
        || error_msg.contains("Connection refused")
        || error_msg.contains("connection refused")
        || error_msg.contains("connection closed")
        || error_msg.contains("unexpected end of file")
}

/// Check if an error message indicates a transient server-side condition
pub fn is_transient_error(error_msg: &str) -> bool {
    error_msg.contains("timeout")
        || error_msg.contains("Timeout")
        || error_msg.contains("timed out")
        || error_msg.contains("rate limit")
        || error_msg.contains("Rate limit")
        || error_msg.contains("Too many requests")
        || error_msg.contains("temporarily unavailable")
}

pub fn is_retryable_error(error_msg: &str) -> bool {
    is_connection_error(error_msg) || is_transient_error(error_msg)
}

/// 429 と 5xx 系のみ再送対象
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}
