pub(crate) fn truncate_for_error(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub(crate) fn slack_error_label(error: Option<String>) -> String {
    error
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::{slack_error_label, truncate_for_error};

    #[test]
    fn regression_truncate_for_error_preserves_unicode_boundaries() {
        let value = "ta🌊u-message";
        assert_eq!(truncate_for_error(value, 20), value);
        assert_eq!(truncate_for_error(value, 3), "ta🌊...");
        assert_eq!(truncate_for_error(value, 0), "...");
    }

    #[test]
    fn unit_slack_error_label_defaults_blank_values() {
        assert_eq!(
            slack_error_label(Some("channel_not_found".to_string())),
            "channel_not_found"
        );
        assert_eq!(slack_error_label(Some("  ".to_string())), "unknown error");
        assert_eq!(slack_error_label(None), "unknown error");
    }
}
