/// Maximum length, in characters, of a single outbound Telegram message.
pub const TELEGRAM_LIMIT: usize = 4096;

/// Split `text` into parts of at most `limit` characters.
///
/// Cuts prefer the last newline inside the window and fall back to a hard
/// cut. Leading whitespace of every continuation part is dropped. Empty
/// input yields no parts; otherwise no part is empty.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some((hard, ch)) = rest.char_indices().nth(limit) {
        let window = &rest[..hard + ch.len_utf8()];
        let cut = match window.rfind('\n') {
            Some(nl) if nl > 0 => nl,
            _ => hard,
        };
        parts.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start();
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}
