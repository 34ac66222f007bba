/// 초 단위 시간을 `M:SS`로 표시한다. 시간 단위는 쓰지 않는다.
/// NaN, 무한대, 음수는 `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// 밀리초 단위 곡 길이를 `M:SS`로 표시한다. 값이 없거나 0이면 `0:00`.
pub fn format_duration_ms(ms: Option<u64>) -> String {
    match ms {
        Some(ms) if ms > 0 => {
            let total = ms / 1000;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "0:00".to_string(),
    }
}

/// 재생 위치 / 전체 길이. 길이를 모르면 0.
pub fn progress_fraction(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration).clamp(0.0, 1.0)
}

/// 글자 수 기준으로 자르고 `...`를 붙인다.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_format_time_truncates_and_has_no_hours() {
        assert_eq!(format_time(29.97), "0:29");
        assert_eq!(format_time(3725.4), "62:05");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(None), "0:00");
        assert_eq!(format_duration_ms(Some(0)), "0:00");
        assert_eq!(format_duration_ms(Some(225_999)), "3:45");
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress_fraction(15.0, 30.0), 0.5);
        assert_eq!(progress_fraction(5.0, 0.0), 0.0);
        assert_eq!(progress_fraction(5.0, f64::NAN), 0.0);
        assert_eq!(progress_fraction(31.0, 30.0), 1.0);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("", 50), "");
        assert_eq!(truncate_text("short", 50), "short");
        assert_eq!(truncate_text("아이유 - 좋은날", 3), "아이유...");
    }
}
