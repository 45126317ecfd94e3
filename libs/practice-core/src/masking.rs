//! Redaction of provider API keys.

/// Mask an API key for display: first 4 and last 4 characters of keys
/// longer than 8 characters, otherwise fully hidden.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_key_keeps_edges() {
        assert_eq!(mask_api_key("sk-1234567890abcd"), "sk-1****abcd");
    }

    #[test]
    fn short_key_fully_hidden() {
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn masked_never_contains_middle() {
        let key = "sk-secretsecretsecret-tail";
        let masked = mask_api_key(key);
        assert!(!masked.contains("secretsecret"));
        assert_ne!(masked, key);
    }
}
