use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::birthday::MonthDay;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn next_occurrence(birthday: MonthDay, today: NaiveDate) -> NaiveDate {
    let this_year = birthday
        .in_year(today.year())
        .expect("Not realistic to overflow");

    if this_year < today {
        birthday
            .in_year(today.year() + 1)
            .expect("Not realistic to overflow")
    } else {
        this_year
    }
}

pub fn days_until_next_occurrence(birthday: MonthDay, today: NaiveDate) -> i64 {
    if MonthDay::from_date(today) == birthday {
        return 0;
    }

    (next_occurrence(birthday, today) - today).num_days()
}

pub fn delay_until_daily(fire_at: NaiveTime, now: NaiveDateTime) -> TimeDelta {
    let today = now.date().and_time(fire_at);
    let target = if today > now {
        today
    } else {
        now.date()
            .checked_add_days(Days::new(1))
            .expect("Not realistic to overflow")
            .and_time(fire_at)
    };

    target - now
}
