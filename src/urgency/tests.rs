use proptest::prelude::*;

use super::*;

#[test]
pub fn exact_days_map_to_their_buckets() {
    assert_eq!(classify(0), UrgencyBucket::Today);
    assert_eq!(classify(1), UrgencyBucket::Tomorrow);
    assert_eq!(classify(5), UrgencyBucket::FiveDays);
    assert_eq!(classify(10), UrgencyBucket::TenDays);
}

#[test]
pub fn days_between_thresholds_do_not_notify() {
    for days in [2, 3, 4, 6, 7, 8, 9, 11, 30, 365, -1] {
        assert_eq!(classify(days), UrgencyBucket::None, "days = {days}");
    }
}

#[test]
pub fn bucket_names_match_identifier_format() {
    let names: Vec<_> = UrgencyBucket::NOTIFYING.iter().map(|b| b.to_string()).collect();

    assert_eq!(names, ["today", "tomorrow", "five_days", "ten_days"]);
    assert_eq!(UrgencyBucket::None.as_str(), "none");
}

#[test]
pub fn display_urgency_is_ranged() {
    assert_eq!(display_urgency(0), DisplayUrgency::Today);
    assert_eq!(display_urgency(1), DisplayUrgency::Tomorrow);
    assert_eq!(display_urgency(2), DisplayUrgency::Near);
    assert_eq!(display_urgency(5), DisplayUrgency::Near);
    assert_eq!(display_urgency(6), DisplayUrgency::Mid);
    assert_eq!(display_urgency(10), DisplayUrgency::Mid);
    assert_eq!(display_urgency(11), DisplayUrgency::Far);
    assert_eq!(display_urgency(-3), DisplayUrgency::Far);
}

#[test]
pub fn seven_days_is_mid_for_display_but_silent_for_notifications() {
    assert_eq!(classify(7), UrgencyBucket::None);
    assert_eq!(display_urgency(7), DisplayUrgency::Mid);
    assert_eq!(display_urgency(7).color(), "#34C759");
}

#[test]
pub fn labels() {
    assert_eq!(days_label(0), "¡Hoy!");
    assert_eq!(days_label(1), "¡Mañana!");
    assert_eq!(days_label(7), "Faltan 7 días");
    assert_eq!(days_label(-2), "Ya pasó");
}

proptest! {
    #[test]
    fn only_four_day_counts_notify(days in any::<i64>()) {
        let bucket = classify(days);

        prop_assert_eq!(bucket.is_notifying(), matches!(days, 0 | 1 | 5 | 10));
    }
}
