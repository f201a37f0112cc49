//! Simulated shipment tracking shown after checkout.
//!
//! Nothing here talks to a fulfilment system: the stage a receipt shows is a
//! pure function of how long ago the order was placed and the configured
//! [`TrackingSchedule`]. Callers pass the elapsed time in, so tests can step
//! through the stages without sleeping.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStage {
    Confirmed,
    Processing,
    Shipped,
    Delivered,
}

impl TrackingStage {
    pub const ALL: [TrackingStage; 4] = [
        TrackingStage::Confirmed,
        TrackingStage::Processing,
        TrackingStage::Shipped,
        TrackingStage::Delivered,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TrackingStage::Confirmed => "Order Confirmed",
            TrackingStage::Processing => "Processing",
            TrackingStage::Shipped => "Shipped",
            TrackingStage::Delivered => "Delivered",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TrackingStage::Confirmed => "Your order has been received",
            TrackingStage::Processing => "We are preparing your items",
            TrackingStage::Shipped => "Your order is on the way",
            TrackingStage::Delivered => "Package delivered successfully",
        }
    }
}

/// Offsets from the moment of checkout at which each stage is reached.
///
/// `delivered_after: None` leaves the last stage pending forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSchedule {
    pub processing_after: Duration,
    pub shipped_after: Duration,
    pub delivered_after: Option<Duration>,
}

impl Default for TrackingSchedule {
    fn default() -> Self {
        Self {
            processing_after: Duration::from_secs(3),
            shipped_after: Duration::from_secs(6),
            delivered_after: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrackingStep {
    pub stage: TrackingStage,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub date: Option<NaiveDate>,
}

impl TrackingSchedule {
    fn offset(&self, stage: TrackingStage) -> Option<Duration> {
        match stage {
            TrackingStage::Confirmed => Some(Duration::ZERO),
            TrackingStage::Processing => Some(self.processing_after),
            TrackingStage::Shipped => Some(self.shipped_after),
            TrackingStage::Delivered => self.delivered_after,
        }
    }

    /// Latest stage reached after `elapsed`. Stages are strictly sequential:
    /// a later offset never fires before an earlier one.
    pub fn stage_at(&self, elapsed: Duration) -> TrackingStage {
        let mut current = TrackingStage::Confirmed;
        for stage in TrackingStage::ALL {
            match self.offset(stage) {
                Some(offset) if offset <= elapsed => current = stage,
                _ => break,
            }
        }
        current
    }

    pub fn timeline(&self, placed_at: DateTime<Utc>, elapsed: Duration) -> Vec<TrackingStep> {
        let reached = self.stage_at(elapsed);
        TrackingStage::ALL
            .into_iter()
            .map(|stage| {
                let completed = stage <= reached;
                let date = if completed {
                    self.offset(stage)
                        .map(|offset| display_date(placed_at, stage, offset))
                } else {
                    None
                };
                TrackingStep {
                    stage,
                    title: stage.title().to_string(),
                    description: stage.description().to_string(),
                    completed,
                    date,
                }
            })
            .collect()
    }
}

// Shipping shows the estimated hand-over date, a day after the stage fires.
fn display_date(placed_at: DateTime<Utc>, stage: TrackingStage, offset: Duration) -> NaiveDate {
    let mut at = placed_at + TimeDelta::from_std(offset).unwrap_or(TimeDelta::zero());
    if stage == TrackingStage::Shipped {
        at += TimeDelta::days(1);
    }
    at.date_naive()
}

/// Days between checkout and the delivery date promised on the receipt.
pub const ESTIMATED_DELIVERY_DAYS: i64 = 5;

pub fn estimated_delivery(placed_at: DateTime<Utc>) -> NaiveDate {
    (placed_at + TimeDelta::days(ESTIMATED_DELIVERY_DAYS)).date_naive()
}

/// A steppable view over one order's tracking progress.
#[derive(Debug, Clone)]
pub struct TrackingTimeline {
    schedule: TrackingSchedule,
    placed_at: DateTime<Utc>,
    elapsed: Duration,
}

impl TrackingTimeline {
    pub fn new(schedule: TrackingSchedule, placed_at: DateTime<Utc>) -> Self {
        Self {
            schedule,
            placed_at,
            elapsed: Duration::ZERO,
        }
    }

    /// Timeline as seen at `now`; a `now` before checkout counts as zero.
    pub fn observed_at(schedule: TrackingSchedule, placed_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = (now - placed_at).to_std().unwrap_or(Duration::ZERO);
        Self {
            schedule,
            placed_at,
            elapsed,
        }
    }

    pub fn advance(&mut self, by: Duration) -> TrackingStage {
        self.elapsed = self.elapsed.saturating_add(by);
        self.stage()
    }

    pub fn stage(&self) -> TrackingStage {
        self.schedule.stage_at(self.elapsed)
    }

    pub fn steps(&self) -> Vec<TrackingStep> {
        self.schedule.timeline(self.placed_at, self.elapsed)
    }
}
