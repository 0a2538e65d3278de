use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::user::UserId;

pub type BirthdayId = i64;

const VALIDATION_YEAR: i32 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{month:02}-{day:02} is not a valid calendar month/day")]
pub struct InvalidMonthDay {
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, InvalidMonthDay> {
        NaiveDate::from_ymd_opt(VALIDATION_YEAR, month, day)
            .map(|_| Self { month, day })
            .ok_or(InvalidMonthDay { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    // Feb 29 falls back to Feb 28 in common years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).or_else(|| {
            if self.is_leap_day() {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub id: BirthdayId,
    pub user_id: UserId,
    pub name: String,
    pub birthday_date: NaiveDate,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
}

impl BirthdayRecord {
    pub fn month_day(&self) -> MonthDay {
        MonthDay::from_date(self.birthday_date)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBirthday {
    pub name: String,
    pub birthday_date: NaiveDate,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
}

impl NewBirthday {
    pub fn new(name: impl Into<String>, birthday_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            birthday_date,
            location: None,
            phone: None,
            area: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBirthday {
    pub name: Option<String>,
    pub birthday_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
}
