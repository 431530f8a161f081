//! Rules that a draft must follow before it is accepted by the store

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::task::TaskDraft;

/// Check a draft against the submission rules.
///
/// * the name is required (blank names are rejected)
/// * a date, when supplied, must not be strictly earlier than `today`
/// * when both times are supplied, the start must be strictly before the end
pub fn validate(draft: &TaskDraft, today: NaiveDate) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if let Some(date) = draft.date {
        if date < today {
            return Err(ValidationError::PastDate);
        }
    }

    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
        if start >= end {
            return Err(ValidationError::InvertedTimeRange);
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn name_is_required() {
        let draft = TaskDraft::new("").on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
        assert_eq!(validate(&draft, today()), Err(ValidationError::EmptyName));
        assert_eq!(validate(&TaskDraft::new("   "), today()), Err(ValidationError::EmptyName));
    }

    #[test]
    fn past_dates_are_rejected() {
        let yesterday = today().pred_opt().unwrap();
        let draft = TaskDraft::new("Buy milk").on(yesterday);
        assert_eq!(validate(&draft, today()), Err(ValidationError::PastDate));

        assert_eq!(validate(&TaskDraft::new("Buy milk").on(today()), today()), Ok(()));
        assert_eq!(validate(&TaskDraft::new("Buy milk"), today()), Ok(()));
    }

    #[test]
    fn time_range_must_be_ordered() {
        let inverted = TaskDraft::new("X").starting_at(time("10:00")).ending_at(time("09:00"));
        assert_eq!(validate(&inverted, today()), Err(ValidationError::InvertedTimeRange));

        let empty = TaskDraft::new("X").starting_at(time("10:00")).ending_at(time("10:00"));
        assert_eq!(validate(&empty, today()), Err(ValidationError::InvertedTimeRange));

        let ok = TaskDraft::new("X").starting_at(time("09:00")).ending_at(time("10:00"));
        assert_eq!(validate(&ok, today()), Ok(()));

        let open_ended = TaskDraft::new("X").starting_at(time("23:00"));
        assert_eq!(validate(&open_ended, today()), Ok(()));
    }
}
