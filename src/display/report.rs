//! Report formatting utilities for terminal output

/// Format a percentage with one decimal, or "N/A" when undefined
pub fn format_percentage_or_na(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:.1}%", p),
        None => "N/A".to_string(),
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage_or_na() {
        assert_eq!(format_percentage_or_na(Some(66.666)), "66.7%");
        assert_eq!(format_percentage_or_na(Some(100.0)), "100.0%");
        assert_eq!(format_percentage_or_na(None), "N/A");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("Test", 2), "..");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "───");
    }
}
