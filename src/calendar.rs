use chrono::{Datelike, Duration, NaiveDate};

/// Clé canonique `AAAA-MM-JJ` d'une date. Champs calendaires bruts,
/// aucun décalage de fuseau.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Lundi de la semaine contenant `date` (dimanche recule de 6 jours).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Clé de semaine : `day_key` du lundi.
pub fn week_key(date: NaiveDate) -> String {
    day_key(week_start(date))
}

/// Les sept dates de la semaine commençant à `monday`.
pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}
