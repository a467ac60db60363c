use std::collections::HashMap;

use crate::checkin::HOME_RADIUS_METERS;
use crate::geo;
use crate::models::control::TodayControl;
use crate::store::{Store, StoreError};

/// Builds the end-of-day attendance report.
///
/// Users come out in registration order, bucketed by today's mark: no mark at
/// all, at home (within the home radius), or away. For a user who is away the
/// mark is first matched against their alternative locations; the first one
/// within the radius supplies the annotation, otherwise the distance from
/// home is shown in kilometers.
pub async fn attendance<S: Store>(store: &S) -> Result<String, StoreError> {
    let users = store.list_users().await?;
    let controls = store.list_today_controls().await?;
    let controls_by_id: HashMap<i64, &TodayControl> =
        controls.iter().map(|c| (c.telegram_id, c)).collect();

    let mut at_home = Vec::new();
    let mut not_at_home = Vec::new();
    let mut not_checked = Vec::new();

    for user in &users {
        let Some(control) = controls_by_id.get(&user.telegram_id) else {
            not_checked.push(user.surname.clone());
            continue;
        };

        let distance = geo::haversine(
            user.home_latitude,
            user.home_longitude,
            control.latitude,
            control.longitude,
        );
        if distance <= HOME_RADIUS_METERS {
            at_home.push(format!("{} ✅", user.surname));
            continue;
        }

        let alternatives = store.list_alternative_locations(user.telegram_id).await?;
        let known = alternatives.iter().find(|alt| {
            geo::haversine(alt.latitude, alt.longitude, control.latitude, control.longitude)
                <= HOME_RADIUS_METERS
        });
        match known {
            Some(alt) => not_at_home.push(format!(
                "{} ({})",
                user.surname,
                alt.comment.as_deref().unwrap_or("-")
            )),
            None => not_at_home.push(format!(
                "{} ({:.2} км от дома)",
                user.surname,
                distance / 1000.0
            )),
        }
    }

    let mut text = String::from("Отчёт:\n");
    text.push_str("\nНе дома:\n");
    text.push_str(&join_or(&not_at_home, "Все дома или все не отметились"));
    text.push_str("\n\nНе отметились:\n");
    text.push_str(&join_or(&not_checked, "Все отметились"));
    text.push_str("\n\nДома:\n");
    text.push_str(&join_or(&at_home, "Все не дома или все не отметились"));
    Ok(text)
}

/// Builds the food-questionnaire report: answers first, then everyone who has
/// not answered.
pub async fn questionnaire<S: Store>(store: &S) -> Result<String, StoreError> {
    let users = store.list_users().await?;
    let responses = store.list_questionnaires().await?;
    let answers_by_id: HashMap<i64, bool> = responses
        .iter()
        .map(|q| (q.telegram_id, q.will_feed))
        .collect();

    let mut answered = Vec::new();
    let mut not_answered = Vec::new();
    for user in &users {
        match answers_by_id.get(&user.telegram_id) {
            Some(true) => answered.push(format!("{} ✅", user.surname)),
            Some(false) => answered.push(format!("{} ❌", user.surname)),
            None => not_answered.push(user.surname.clone()),
        }
    }

    let mut text = String::from("Отчёт по опросу:\n");
    text.push_str("\nРезультаты опроса:\n");
    text.push_str(&join_or(&answered, "Никто не прошёл опрос"));
    text.push_str("\n\nНе прошли опрос:\n");
    text.push_str(&join_or(&not_answered, "Все отметились"));
    Ok(text)
}

fn join_or(lines: &[String], placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join("\n")
    }
}
