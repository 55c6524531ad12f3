use chrono::TimeDelta;
use std::time::Duration;

/// `D days H hrs M mins S secs`, as printed at the end of a retrieval run.
pub fn format_dhms(elapsed: Duration) -> String {
    let delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let seconds = delta.num_seconds() % 60;
    format!("{days} days {hours} hrs {minutes} mins {seconds} secs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_units() {
        assert_eq!(format_dhms(Duration::from_secs(0)), "0 days 0 hrs 0 mins 0 secs");
        assert_eq!(
            format_dhms(Duration::from_secs(2 * 86400 + 3 * 3600 + 4 * 60 + 5)),
            "2 days 3 hrs 4 mins 5 secs"
        );
        assert_eq!(format_dhms(Duration::from_millis(59_999)), "0 days 0 hrs 0 mins 59 secs");
    }
}
