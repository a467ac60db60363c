use chrono::NaiveTime;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::context::Context;
use crate::geo;
use crate::models::user::User;
use crate::store::{Store, StoreError};

/// Radius around a coordinate that still counts as being there, in meters.
pub const HOME_RADIUS_METERS: f64 = 250.0;

/// Submission-window bounds and the operational override for the validator.
#[derive(Debug, Clone)]
pub struct CheckinRules {
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
    /// When set, the liveness and time-window checks are skipped. Forwarded
    /// messages and duplicates are rejected regardless.
    pub skip_liveness_and_window_checks: bool,
}

/// One incoming location message, as seen by the transport layer.
#[derive(Debug, Clone, Copy)]
pub struct LocationEvent {
    pub latitude: f64,
    pub longitude: f64,
    /// The message was forwarded from another chat or user.
    pub forwarded: bool,
    /// Live (continuously shared) location, as opposed to a pinned map point.
    pub live: bool,
}

/// Accepted check-in.
#[derive(Debug, Clone, Copy)]
pub struct Checkin {
    pub distance_m: f64,
}

impl Checkin {
    pub fn is_home(&self) -> bool {
        self.distance_m <= HOME_RADIUS_METERS
    }
}

/// Why an incoming location was rejected. Every variant except `Store` is an
/// expected business condition the user is told about; none of them writes
/// any state.
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("forwarded locations are not accepted")]
    Forwarded,
    #[error("static map points are not accepted")]
    StaticLocation,
    #[error("location submitted outside the daily window")]
    OutsideWindow,
    #[error("a check-in for today already exists")]
    Duplicate,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CheckinError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => CheckinError::Duplicate,
            other => CheckinError::Store(other),
        }
    }
}

/// Runs the ordered checks over one incoming location and, when they all
/// pass, persists today's mark and classifies it against the user's home
/// coordinate.
///
/// Check order is fixed: forwarded, liveness, window, duplicate. The caller
/// has already resolved `user` from the registry; unregistered senders are
/// routed to the registration flow before this point.
pub async fn process_location<S: Store, C: Clock>(
    ctx: &Context<S, C>,
    user: &User,
    event: LocationEvent,
) -> Result<Checkin, CheckinError> {
    if event.forwarded {
        warn!(
            "User {} ({}) tried to forward a location",
            user.surname, user.telegram_id
        );
        return Err(CheckinError::Forwarded);
    }

    if !ctx.rules.skip_liveness_and_window_checks {
        if !event.live {
            warn!(
                "User {} ({}) sent a static map point",
                user.surname, user.telegram_id
            );
            return Err(CheckinError::StaticLocation);
        }

        let now = ctx.clock.now().time();
        if now < ctx.rules.window_start || now > ctx.rules.window_end {
            warn!(
                "User {} ({}) sent a location outside the window",
                user.surname, user.telegram_id
            );
            return Err(CheckinError::OutsideWindow);
        }
    } else {
        debug!(
            "Liveness and window checks skipped for {}",
            user.telegram_id
        );
    }

    if ctx
        .store
        .get_today_control(user.telegram_id)
        .await?
        .is_some()
    {
        warn!(
            "User {} ({}) tried to check in twice",
            user.surname, user.telegram_id
        );
        return Err(CheckinError::Duplicate);
    }

    // The primary key on today_control closes the race between the check
    // above and this insert; a losing concurrent writer surfaces as a
    // duplicate as well.
    ctx.store
        .create_today_control(user.telegram_id, event.latitude, event.longitude)
        .await?;

    let distance_m = geo::haversine(
        user.home_latitude,
        user.home_longitude,
        event.latitude,
        event.longitude,
    );
    info!(
        "User {} ({}) checked in, {:.0} m from home",
        user.surname, user.telegram_id, distance_m
    );

    Ok(Checkin { distance_m })
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::clock::testing::FixedClock;
    use crate::store::MemoryStore;

    const HOME_LAT: f64 = 55.7558;
    const HOME_LON: f64 = 37.6173;

    fn rules() -> CheckinRules {
        CheckinRules {
            window_start: NaiveTime::from_hms_opt(21, 40, 0).unwrap(),
            window_end: NaiveTime::from_hms_opt(22, 10, 0).unwrap(),
            skip_liveness_and_window_checks: false,
        }
    }

    fn clock_at(hour: u32, minute: u32) -> FixedClock {
        let msk = FixedOffset::east_opt(3 * 3600).unwrap();
        FixedClock(msk.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap())
    }

    async fn ctx_in_window() -> Context<MemoryStore, FixedClock> {
        let store = MemoryStore::new();
        store
            .create_user(1, "Иванов", HOME_LAT, HOME_LON)
            .await
            .unwrap();
        Context::new(store, clock_at(21, 50), rules())
    }

    async fn user(ctx: &Context<MemoryStore, FixedClock>) -> User {
        ctx.store.get_user(1).await.unwrap().unwrap()
    }

    fn live_at(latitude: f64, longitude: f64) -> LocationEvent {
        LocationEvent {
            latitude,
            longitude,
            forwarded: false,
            live: true,
        }
    }

    #[tokio::test]
    async fn forwarded_location_beats_every_other_rejection() {
        // static, out of window AND already checked in: forwarded still wins
        let store = MemoryStore::new();
        store
            .create_user(1, "Иванов", HOME_LAT, HOME_LON)
            .await
            .unwrap();
        store
            .create_today_control(1, HOME_LAT, HOME_LON)
            .await
            .unwrap();
        let ctx = Context::new(store, clock_at(3, 0), rules());
        let user = user(&ctx).await;

        let event = LocationEvent {
            latitude: HOME_LAT,
            longitude: HOME_LON,
            forwarded: true,
            live: false,
        };
        let err = process_location(&ctx, &user, event).await.unwrap_err();
        assert!(matches!(err, CheckinError::Forwarded));
    }

    #[tokio::test]
    async fn static_point_is_rejected() {
        let ctx = ctx_in_window().await;
        let user = user(&ctx).await;

        let event = LocationEvent {
            live: false,
            ..live_at(HOME_LAT, HOME_LON)
        };
        let err = process_location(&ctx, &user, event).await.unwrap_err();
        assert!(matches!(err, CheckinError::StaticLocation));
        assert!(ctx.store.list_today_controls().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn location_outside_the_window_is_rejected() {
        let store = MemoryStore::new();
        store
            .create_user(1, "Иванов", HOME_LAT, HOME_LON)
            .await
            .unwrap();
        let ctx = Context::new(store, clock_at(20, 0), rules());
        let user = user(&ctx).await;

        let err = process_location(&ctx, &user, live_at(HOME_LAT, HOME_LON))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckinError::OutsideWindow));
        assert!(ctx.store.list_today_controls().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn window_bounds_are_inclusive() {
        for (hour, minute) in [(21, 40), (22, 10)] {
            let store = MemoryStore::new();
            store
                .create_user(1, "Иванов", HOME_LAT, HOME_LON)
                .await
                .unwrap();
            let ctx = Context::new(store, clock_at(hour, minute), rules());
            let user = user(&ctx).await;

            process_location(&ctx, &user, live_at(HOME_LAT, HOME_LON))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn second_checkin_is_final_and_keeps_the_first_record() {
        let ctx = ctx_in_window().await;
        let user = user(&ctx).await;

        process_location(&ctx, &user, live_at(55.7567, HOME_LON))
            .await
            .unwrap();
        let err = process_location(&ctx, &user, live_at(55.8, 37.7))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckinError::Duplicate));

        let control = ctx.store.get_today_control(1).await.unwrap().unwrap();
        assert_eq!(control.latitude, 55.7567);
        assert_eq!(control.longitude, HOME_LON);
    }

    #[tokio::test]
    async fn hundred_meters_away_counts_as_home() {
        let ctx = ctx_in_window().await;
        let user = user(&ctx).await;

        // ~100 m north of home
        let checkin = process_location(&ctx, &user, live_at(55.7567, HOME_LON))
            .await
            .unwrap();
        assert!(checkin.is_home());
        assert!((90.0..110.0).contains(&checkin.distance_m));
    }

    #[tokio::test]
    async fn kilometer_away_is_not_home() {
        let ctx = ctx_in_window().await;
        let user = user(&ctx).await;

        // ~1000 m north of home
        let checkin = process_location(&ctx, &user, live_at(55.7648, HOME_LON))
            .await
            .unwrap();
        assert!(!checkin.is_home());
        assert!((950.0..1050.0).contains(&checkin.distance_m));
    }

    #[tokio::test]
    async fn override_skips_liveness_and_window_but_not_duplicates() {
        let store = MemoryStore::new();
        store
            .create_user(1, "Иванов", HOME_LAT, HOME_LON)
            .await
            .unwrap();
        let mut rules = rules();
        rules.skip_liveness_and_window_checks = true;
        // middle of the night, static point
        let ctx = Context::new(store, clock_at(3, 0), rules);
        let user = user(&ctx).await;

        let event = LocationEvent {
            live: false,
            ..live_at(HOME_LAT, HOME_LON)
        };
        process_location(&ctx, &user, event).await.unwrap();

        let err = process_location(&ctx, &user, event).await.unwrap_err();
        assert!(matches!(err, CheckinError::Duplicate));
    }

    #[test]
    fn losing_insert_race_maps_to_duplicate() {
        let err = CheckinError::from(StoreError::Duplicate);
        assert!(matches!(err, CheckinError::Duplicate));
    }
}
