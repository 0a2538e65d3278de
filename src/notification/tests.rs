use super::*;

#[test]
pub fn identifier_format_is_stable() {
    assert_eq!(
        NotificationId::for_birthday(42, UrgencyBucket::Tomorrow).as_str(),
        "birthday_42_tomorrow"
    );
    assert_eq!(
        NotificationId::for_birthday(7, UrgencyBucket::FiveDays).to_string(),
        "birthday_7_five_days"
    );
}

#[test]
pub fn all_identifiers_for_a_birthday() {
    let ids: Vec<_> = NotificationId::all_for_birthday(3)
        .into_iter()
        .map(|id| id.to_string())
        .collect();

    assert_eq!(
        ids,
        [
            "birthday_3_today",
            "birthday_3_tomorrow",
            "birthday_3_five_days",
            "birthday_3_ten_days"
        ]
    );
}

#[test]
pub fn messages_per_bucket() {
    assert_eq!(
        birthday_message(UrgencyBucket::Today, "Ana").as_deref(),
        Some("¡Hoy es el cumpleaños de Ana! 🎉")
    );
    assert_eq!(
        birthday_message(UrgencyBucket::Tomorrow, "Ana").as_deref(),
        Some("¡Mañana es el cumpleaños de Ana!")
    );
    assert_eq!(
        birthday_message(UrgencyBucket::TenDays, "Ana").as_deref(),
        Some("¡Faltan 10 días para el cumpleaños de Ana!")
    );
    assert_eq!(birthday_message(UrgencyBucket::None, "Ana"), None);
}
