// src/schedule.rs
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};

/// Next occurrence of `at`: later today if still ahead, otherwise tomorrow.
pub fn next_run_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if now < today {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Sleep until the next local `at`
pub async fn wait_until(at: NaiveTime) {
    let now = Local::now().naive_local();
    let next = next_run_after(now, at);
    let wait = (next - now).to_std().unwrap_or_default();

    log::info!(
        "Waiting {} seconds until next analysis at {}...",
        wait.as_secs(),
        next.format("%Y-%m-%d %H:%M:%S")
    );
    tokio::time::sleep(wait).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(
            next_run_after(now, at(18, 0)),
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_run_tomorrow_when_passed() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap().and_hms_opt(18, 0, 0).unwrap();
        assert_eq!(
            next_run_after(now, at(18, 0)),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(18, 0, 0).unwrap()
        );
    }
}
