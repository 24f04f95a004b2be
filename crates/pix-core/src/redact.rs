//! Masking helpers for secrets and personal data in log lines.

/// Keep the first `head` and last `tail` characters, eliding the rest.
///
/// Values too short to mask meaningfully collapse to `***`.
pub fn mask(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return "***".to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}

/// `123...01`
pub fn mask_cpf(cpf: &str) -> String {
    mask(cpf, 3, 2)
}

/// `sk_...xyz`
pub fn mask_secret(secret: &str) -> String {
    mask(secret, 3, 3)
}
