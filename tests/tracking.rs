use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use storefront_api::tracking::{
    TrackingSchedule, TrackingStage, TrackingTimeline, estimated_delivery,
};

fn placed_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

#[test]
fn default_schedule_stops_before_delivery() {
    let schedule = TrackingSchedule::default();
    assert_eq!(schedule.stage_at(Duration::ZERO), TrackingStage::Confirmed);
    assert_eq!(schedule.stage_at(Duration::from_secs(2)), TrackingStage::Confirmed);
    assert_eq!(schedule.stage_at(Duration::from_secs(3)), TrackingStage::Processing);
    assert_eq!(schedule.stage_at(Duration::from_secs(6)), TrackingStage::Shipped);
    assert_eq!(
        schedule.stage_at(Duration::from_secs(60 * 60 * 24 * 30)),
        TrackingStage::Shipped
    );
}

#[test]
fn configured_delivery_completes_the_timeline() {
    let schedule = TrackingSchedule {
        delivered_after: Some(Duration::from_secs(10)),
        ..TrackingSchedule::default()
    };
    let mut timeline = TrackingTimeline::new(schedule, placed_at());
    assert_eq!(timeline.stage(), TrackingStage::Confirmed);
    assert_eq!(timeline.advance(Duration::from_secs(3)), TrackingStage::Processing);
    assert_eq!(timeline.advance(Duration::from_secs(3)), TrackingStage::Shipped);
    assert_eq!(timeline.advance(Duration::from_secs(4)), TrackingStage::Delivered);
    assert!(timeline.steps().iter().all(|s| s.completed));
}

#[test]
fn stages_never_skip_ahead() {
    // Shipping configured earlier than processing still waits for processing.
    let schedule = TrackingSchedule {
        processing_after: Duration::from_secs(8),
        shipped_after: Duration::from_secs(2),
        delivered_after: None,
    };
    assert_eq!(schedule.stage_at(Duration::from_secs(5)), TrackingStage::Confirmed);
    assert_eq!(schedule.stage_at(Duration::from_secs(8)), TrackingStage::Shipped);
}

#[test]
fn steps_carry_dates_only_once_reached() {
    let mut timeline = TrackingTimeline::new(TrackingSchedule::default(), placed_at());
    timeline.advance(Duration::from_secs(6));
    let steps = timeline.steps();

    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].title, "Order Confirmed");
    assert_eq!(steps[0].date, NaiveDate::from_ymd_opt(2025, 3, 10));
    assert_eq!(steps[1].date, NaiveDate::from_ymd_opt(2025, 3, 10));
    // Shipping shows the next day.
    assert_eq!(steps[2].date, NaiveDate::from_ymd_opt(2025, 3, 11));
    assert!(!steps[3].completed);
    assert_eq!(steps[3].date, None);
}

#[test]
fn observed_before_checkout_counts_as_zero() {
    let placed = placed_at();
    let timeline = TrackingTimeline::observed_at(
        TrackingSchedule::default(),
        placed,
        placed - chrono::TimeDelta::seconds(30),
    );
    assert_eq!(timeline.stage(), TrackingStage::Confirmed);

    let timeline = TrackingTimeline::observed_at(
        TrackingSchedule::default(),
        placed,
        placed + chrono::TimeDelta::seconds(4),
    );
    assert_eq!(timeline.stage(), TrackingStage::Processing);
}

#[test]
fn estimated_delivery_is_five_days_out() {
    assert_eq!(
        estimated_delivery(placed_at()),
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    );
    let late = Utc.with_ymd_and_hms(2025, 12, 29, 23, 30, 0).unwrap();
    assert_eq!(
        estimated_delivery(late),
        NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()
    );
}
