use chrono::Duration;

use crate::db::entity::transaction_status;
use crate::enums::TxStatus;

/// Project the current status out of a transaction's event log: the event
/// with the greatest `created_at`, ties broken by row id (insertion order).
/// Returns None for an empty log or an event whose stored status string is
/// unknown.
pub fn current_status(events: &[transaction_status::Model]) -> Option<TxStatus> {
    events
        .iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
        .and_then(|e| e.status.parse().ok())
}

/// Parse a duration of the form `<integer><h|m|d>`. Anything unparsable
/// falls back to 24 hours.
pub fn parse_duration(s: &str) -> Duration {
    let default = Duration::hours(24);

    let s = s.trim().to_lowercase();
    if s.len() < 2 {
        return default;
    }

    let (digits, unit) = s.split_at(s.len() - 1);
    let n = match digits.parse::<i64>() {
        Ok(n) if n >= 0 => n,
        _ => {
            return default;
        }
    };

    match unit {
        "h" => Duration::hours(n),
        "m" => Duration::minutes(n),
        "d" => Duration::days(n),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn event(id: i64, created_at: &str, status: &str) -> transaction_status::Model {
        let ts = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S").unwrap();
        transaction_status::Model {
            id,
            transaction_uuid: Uuid::new_v4(),
            time: ts,
            amount: 0.0,
            status: status.to_string(),
            comment: String::new(),
            created_at: ts,
        }
    }

    #[test]
    fn test_current_status_latest_wins() {
        let events = vec![
            event(1, "2025-01-01 10:00:00", "PENDING"),
            event(2, "2025-01-01 12:00:00", "COMPLETED")
        ];
        assert_eq!(current_status(&events), Some(TxStatus::Completed));
    }

    #[test]
    fn test_current_status_tie_breaks_on_id() {
        let events = vec![
            event(7, "2025-01-01 10:00:00", "FAILED"),
            event(3, "2025-01-01 10:00:00", "PENDING")
        ];
        assert_eq!(current_status(&events), Some(TxStatus::Failed));
    }

    #[test]
    fn test_current_status_empty_log() {
        assert_eq!(current_status(&[]), None);
    }

    #[test]
    fn test_current_status_unknown_string() {
        let events = vec![event(1, "2025-01-01 10:00:00", "SHIPPED")];
        assert_eq!(current_status(&events), None);
    }

    #[test]
    fn test_parse_duration_hours() {
        assert_eq!(parse_duration("336h"), Duration::hours(336));
        assert_eq!(parse_duration("24h"), Duration::hours(24));
    }

    #[test]
    fn test_parse_duration_days_and_minutes() {
        assert_eq!(parse_duration("7d"), Duration::hours(168));
        assert_eq!(parse_duration("30m"), Duration::minutes(30));
    }

    #[test]
    fn test_parse_duration_unparsable_defaults_to_24h() {
        assert_eq!(parse_duration(""), Duration::hours(24));
        assert_eq!(parse_duration("soon"), Duration::hours(24));
        assert_eq!(parse_duration("12x"), Duration::hours(24));
        assert_eq!(parse_duration("-5h"), Duration::hours(24));
    }

    #[test]
    fn test_parse_duration_trims_and_lowercases() {
        assert_eq!(parse_duration(" 48H "), Duration::hours(48));
    }
}
