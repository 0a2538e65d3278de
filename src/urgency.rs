use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum UrgencyBucket {
    Today,
    Tomorrow,
    FiveDays,
    TenDays,
    None,
}

impl UrgencyBucket {
    pub const NOTIFYING: [UrgencyBucket; 4] = [
        UrgencyBucket::Today,
        UrgencyBucket::Tomorrow,
        UrgencyBucket::FiveDays,
        UrgencyBucket::TenDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyBucket::Today => "today",
            UrgencyBucket::Tomorrow => "tomorrow",
            UrgencyBucket::FiveDays => "five_days",
            UrgencyBucket::TenDays => "ten_days",
            UrgencyBucket::None => "none",
        }
    }

    pub fn is_notifying(&self) -> bool {
        !matches!(self, UrgencyBucket::None)
    }
}

impl fmt::Display for UrgencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(days: i64) -> UrgencyBucket {
    match days {
        0 => UrgencyBucket::Today,
        1 => UrgencyBucket::Tomorrow,
        5 => UrgencyBucket::FiveDays,
        10 => UrgencyBucket::TenDays,
        _ => UrgencyBucket::None,
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayUrgency {
    Today,
    Tomorrow,
    Near,
    Mid,
    Far,
}

impl DisplayUrgency {
    pub fn color(&self) -> &'static str {
        match self {
            DisplayUrgency::Today => "#FF3B30",
            DisplayUrgency::Tomorrow => "#FF9500",
            DisplayUrgency::Near => "#FFCC00",
            DisplayUrgency::Mid => "#34C759",
            DisplayUrgency::Far => "#007AFF",
        }
    }
}

pub fn display_urgency(days: i64) -> DisplayUrgency {
    match days {
        0 => DisplayUrgency::Today,
        1 => DisplayUrgency::Tomorrow,
        2..=5 => DisplayUrgency::Near,
        6..=10 => DisplayUrgency::Mid,
        _ => DisplayUrgency::Far,
    }
}

pub fn days_label(days: i64) -> String {
    match days {
        0 => "¡Hoy!".to_owned(),
        1 => "¡Mañana!".to_owned(),
        d if d > 0 => format!("Faltan {d} días"),
        _ => "Ya pasó".to_owned(),
    }
}

#[cfg(test)]
mod tests;
