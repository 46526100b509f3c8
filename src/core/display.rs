// File: src/core/display.rs
//! Small formatting helpers shared by front ends.

/// `1234` → `1.2K`, `2500000` → `2.5M`.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Extracts the 11-character YouTube id from a watch or shorts URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    let start = ["v=", "/shorts/"]
        .iter()
        .filter_map(|marker| url.find(marker).map(|i| i + marker.len()))
        .min()?;
    let candidate = url.get(start..start + 11)?;
    candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        .then_some(candidate)
}

/// Cuts `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_abbreviated() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_240), "1.2K");
        assert_eq!(format_count(3_400_000), "3.4M");
    }

    #[test]
    fn video_ids_from_both_url_shapes() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?v=abcdefghijk&t=3"),
            Some("abcdefghijk")
        );
        assert_eq!(extract_video_id("https://example.com/clip"), None);
        assert_eq!(extract_video_id("https://youtube.com/shorts/short"), None);
    }

    #[test]
    fn titles_are_truncated_by_characters() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
