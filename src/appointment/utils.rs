use anyhow::{bail, Context};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::utils::{clinic_close, clinic_open, parse_hhmm, within_clinic_window};

use super::requests::CreateAppointmentRequest;

pub const MAX_SUGGESTED_SLOTS: usize = 6;

#[derive(Debug)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Form-level validation, run before any database access. Presence
/// checks first so each missing field gets its own message.
pub fn validate_booking(info: &CreateAppointmentRequest) -> anyhow::Result<BookingWindow> {
    if info.appointment_date.trim().is_empty() {
        bail!("Date is required");
    }
    if info.start_at.trim().is_empty() {
        bail!("Start time is required");
    }
    if info.end_at.trim().is_empty() {
        bail!("End time is required");
    }
    if info.reason.trim().is_empty() {
        bail!("Reason is required");
    }

    let date = NaiveDate::parse_from_str(&info.appointment_date, "%Y-%m-%d")
        .context("Date must be YYYY-MM-DD")?;
    let start = parse_hhmm(&info.start_at)?;
    let end = parse_hhmm(&info.end_at)?;
    if !within_clinic_window(start, end) {
        bail!("Appointments must fall within clinic hours, 10:00 to 20:00");
    }

    Ok(BookingWindow { date, start, end })
}

/// Half-open interval overlap: touching windows do not conflict.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn has_conflict(busy: &[(NaiveTime, NaiveTime)], start: NaiveTime, end: NaiveTime) -> bool {
    busy.iter().any(|&(s, e)| overlaps(start, end, s, e))
}

fn checked_add(t: NaiveTime, d: Duration) -> Option<NaiveTime> {
    // NaiveTime arithmetic wraps at midnight; do it in seconds instead.
    let secs = i64::from(t.num_seconds_from_midnight()) + d.num_seconds();
    if (0..86400).contains(&secs) {
        NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0)
    } else {
        None
    }
}

/// Free windows of the requested length inside clinic hours, given the
/// day's existing bookings. Walks the gaps between busy intervals in
/// time order and cuts each gap into consecutive slots.
pub fn suggest_slots(
    busy: &[(NaiveTime, NaiveTime)],
    duration: Duration,
    limit: usize,
) -> Vec<(NaiveTime, NaiveTime)> {
    let mut busy: Vec<_> = busy.to_vec();
    busy.sort();

    let mut slots = Vec::new();
    let mut cursor = clinic_open();
    for &(busy_start, busy_end) in &busy {
        fill_gap(&mut slots, cursor, busy_start.min(clinic_close()), duration, limit);
        if slots.len() >= limit {
            return slots;
        }
        cursor = cursor.max(busy_end);
    }
    fill_gap(&mut slots, cursor, clinic_close(), duration, limit);
    slots
}

fn fill_gap(
    slots: &mut Vec<(NaiveTime, NaiveTime)>,
    gap_start: NaiveTime,
    gap_end: NaiveTime,
    duration: Duration,
    limit: usize,
) {
    let mut cursor = gap_start;
    while slots.len() < limit {
        match checked_add(cursor, duration) {
            Some(end) if end <= gap_end => {
                slots.push((cursor, end));
                cursor = end;
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms(h, m, 0)
    }

    fn request(date: &str, start: &str, end: &str, reason: &str) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            pid: 1,
            did: 2,
            rid: 3,
            appointment_date: date.to_string(),
            start_at: start.to_string(),
            end_at: end.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn missing_reason_fails_validation() {
        let err = validate_booking(&request("2024-04-02", "11:00", "11:30", ""))
            .unwrap_err()
            .to_string();
        assert_eq!(err, "Reason is required");
    }

    #[test]
    fn missing_date_fails_before_time_checks() {
        let err = validate_booking(&request("", "bogus", "also-bogus", "checkup"))
            .unwrap_err()
            .to_string();
        assert_eq!(err, "Date is required");
    }

    #[test]
    fn out_of_hours_booking_is_rejected() {
        assert!(validate_booking(&request("2024-04-02", "09:00", "09:30", "checkup")).is_err());
        assert!(validate_booking(&request("2024-04-02", "19:30", "20:30", "checkup")).is_err());
        let window = validate_booking(&request("2024-04-02", "10:00", "10:30", "checkup")).unwrap();
        assert_eq!(window.start, t(10, 0));
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        assert!(!overlaps(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(overlaps(t(10, 0), t(11, 1), t(11, 0), t(12, 0)));
        assert!(overlaps(t(10, 30), t(10, 45), t(10, 0), t(11, 0)));
    }

    #[test]
    fn suggestions_on_an_empty_day_start_at_opening() {
        let slots = suggest_slots(&[], Duration::minutes(30), 3);
        assert_eq!(slots, vec![
            (t(10, 0), t(10, 30)),
            (t(10, 30), t(11, 0)),
            (t(11, 0), t(11, 30)),
        ]);
    }

    #[test]
    fn suggestions_avoid_existing_bookings() {
        let busy = vec![(t(10, 0), t(12, 0)), (t(13, 0), t(18, 30))];
        let slots = suggest_slots(&busy, Duration::minutes(60), MAX_SUGGESTED_SLOTS);
        assert!(!slots.is_empty());
        for &(s, e) in &slots {
            assert!(!has_conflict(&busy, s, e));
            assert!(within_clinic_window(s, e));
            assert_eq!(e.signed_duration_since(s), Duration::minutes(60));
        }
        assert_eq!(slots[0], (t(12, 0), t(13, 0)));
    }

    #[test]
    fn overlapping_busy_intervals_are_handled() {
        let busy = vec![(t(10, 0), t(15, 0)), (t(11, 0), t(12, 0))];
        let slots = suggest_slots(&busy, Duration::minutes(120), MAX_SUGGESTED_SLOTS);
        assert_eq!(slots, vec![(t(15, 0), t(17, 0)), (t(17, 0), t(19, 0))]);
    }

    #[test]
    fn fully_booked_day_yields_no_suggestions() {
        let busy = vec![(t(10, 0), t(20, 0))];
        assert!(suggest_slots(&busy, Duration::minutes(15), MAX_SUGGESTED_SLOTS).is_empty());
    }

    #[test]
    fn limit_is_respected() {
        let slots = suggest_slots(&[], Duration::minutes(15), 2);
        assert_eq!(slots.len(), 2);
    }
}
