// ── Formatting helpers ───────────────────────────────────────────────────────

pub fn format_ms(ms: Option<i64>) -> String {
    match ms {
        Some(ms) => format!("{ms}ms"),
        None => "-".to_string(),
    }
}

pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) if rate.is_finite() => format!("{rate:.2}%"),
        _ => "-".to_string(),
    }
}

/// Thousands-separated integer, e.g. `1234567` -> `1,234,567`
pub fn format_count(count: i64) -> String {
    let digits = count.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if count < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_requests(count: i64) -> String {
    format!("{} req", format_count(count))
}

pub fn format_avg_per_minute(rate: f64) -> String {
    format!("{rate:.1} req/min")
}

pub fn format_max_per_minute(rate: i64) -> String {
    format!("{} req/min", format_count(rate))
}

/// Round half away from zero to one decimal; display only
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
