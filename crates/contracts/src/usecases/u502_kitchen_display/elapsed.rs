use chrono::{DateTime, Utc};

/// Ticket age colour on a kitchen card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedLevel {
    Green,
    Yellow,
    Red,
}

impl ElapsedLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            ElapsedLevel::Green => "elapsed-green",
            ElapsedLevel::Yellow => "elapsed-yellow",
            ElapsedLevel::Red => "elapsed-red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elapsed {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    /// Time since `since`; clock skew never yields a negative age.
    pub fn between(since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (now - since).num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn text(&self) -> String {
        format!("{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }

    pub fn level(&self) -> ElapsedLevel {
        if self.hours >= 1 || self.minutes >= 10 {
            ElapsedLevel::Red
        } else if self.minutes >= 5 {
            ElapsedLevel::Yellow
        } else {
            ElapsedLevel::Green
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_elapsed_text_and_levels() {
        let now = Utc::now();
        let e = Elapsed::between(now - Duration::seconds(3723), now);
        assert_eq!(e.text(), "1h 2m 3s");
        assert_eq!(e.level(), ElapsedLevel::Red);

        assert_eq!(Elapsed::between(now - Duration::minutes(4), now).level(), ElapsedLevel::Green);
        assert_eq!(Elapsed::between(now - Duration::minutes(5), now).level(), ElapsedLevel::Yellow);
        assert_eq!(Elapsed::between(now - Duration::minutes(10), now).level(), ElapsedLevel::Red);
    }

    #[test]
    fn test_future_timestamp_clamps_to_zero() {
        let now = Utc::now();
        assert_eq!(Elapsed::between(now + Duration::minutes(1), now).text(), "0h 0m 0s");
    }
}
