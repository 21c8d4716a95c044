//! Display helpers shared by the views.

use chrono::{DateTime, Utc};

/// Relative age of a post: "Hace unos minutos", "Hace 3 horas", "Hace 1 día",
/// or the date once it is a week old.
pub fn post_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - created_at).num_hours();
    if hours < 1 {
        return "Hace unos minutos".to_string();
    }
    if hours < 24 {
        return format!("Hace {} hora{}", hours, plural(hours));
    }
    let days = hours / 24;
    if days < 7 {
        return format!("Hace {} día{}", days, plural(days));
    }
    short_date(created_at)
}

/// Compact age of a comment: "Ahora", "5m", "3h", "2d".
pub fn comment_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();
    if minutes < 1 {
        "Ahora".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / (60 * 24))
    }
}

/// `d/m/yyyy`.
pub fn short_date(at: DateTime<Utc>) -> String {
    at.format("%-d/%-m/%Y").to_string()
}

/// Long Spanish date, e.g. "3 de mayo de 2025".
pub fn long_date(at: DateTime<Utc>) -> String {
    const MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    use chrono::Datelike;
    let month = MONTHS[at.month0() as usize];
    format!("{} de {} de {}", at.day(), month, at.year())
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Up to two initials for an avatar placeholder.
///
/// Uses the first letters of the first two words of `name`, else the first
/// letter of `email`, else "U".
pub fn initials(name: Option<&str>, email: Option<&str>) -> String {
    let from_name: String = name
        .unwrap_or_default()
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect();
    if !from_name.is_empty() {
        return from_name.to_uppercase();
    }
    email
        .and_then(|e| e.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_post_age() {
        let now = now();
        assert_eq!(post_age(now - Duration::minutes(59), now), "Hace unos minutos");
        assert_eq!(post_age(now - Duration::hours(1), now), "Hace 1 hora");
        assert_eq!(post_age(now - Duration::hours(5), now), "Hace 5 horas");
        assert_eq!(post_age(now - Duration::hours(24), now), "Hace 1 día");
        assert_eq!(post_age(now - Duration::days(6), now), "Hace 6 días");
        assert_eq!(post_age(now - Duration::days(9), now), "1/5/2025");
    }

    #[test]
    fn test_comment_age() {
        let now = now();
        assert_eq!(comment_age(now - Duration::seconds(30), now), "Ahora");
        assert_eq!(comment_age(now - Duration::minutes(12), now), "12m");
        assert_eq!(comment_age(now - Duration::hours(3), now), "3h");
        assert_eq!(comment_age(now - Duration::days(2), now), "2d");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(now()), "10 de mayo de 2025");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials(Some("ana maría lópez"), None), "AM");
        assert_eq!(initials(Some("  Ragnar "), Some("x@y.z")), "R");
        assert_eq!(initials(Some(""), Some("zoe@example.com")), "Z");
        assert_eq!(initials(None, None), "U");
    }
}
