use chrono::Datelike;
use uuid::Uuid;

use crate::models::{CompletedSession, Resolved, SessionStatus, WeeklyProgressPoint};
use crate::store::StoreError;

/// The curve always carries at least this many points.
pub const MIN_POINTS: usize = 6;

/// How completed sessions are bucketed into chart points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WeekGrouping {
    /// One point per completed session, in date order.
    #[default]
    PerSession,
    /// One point per ISO calendar week that holds at least one session.
    IsoWeek,
}

/// Chart label for the 1-based bucket ordinal.
pub fn week_label(ordinal: usize) -> String {
    format!("Week {ordinal}")
}

/// Six zero points, shown when there is no usable history.
pub fn empty_curve() -> Vec<WeeklyProgressPoint> {
    (1..=MIN_POINTS)
        .map(|ordinal| WeeklyProgressPoint {
            label: week_label(ordinal),
            progress: 0,
        })
        .collect()
}

/// Cumulative, capped progress curve over the completed sessions.
pub fn aggregate(
    sessions: &[CompletedSession],
    progress_per_session: f64,
    grouping: WeekGrouping,
) -> Vec<WeeklyProgressPoint> {
    let mut completed: Vec<&CompletedSession> = sessions
        .iter()
        .filter(|session| session.status == SessionStatus::Completed)
        .collect();

    if completed.is_empty() {
        return empty_curve();
    }

    completed.sort_by_key(|session| session.date);

    let per_session = if progress_per_session.is_finite() {
        progress_per_session.clamp(0.0, 100.0)
    } else {
        0.0
    };

    let counts = bucket_counts(&completed, grouping);
    let mut points = Vec::with_capacity(counts.len().max(MIN_POINTS));
    let mut cumulative = 0.0;

    for (index, count) in counts.into_iter().enumerate() {
        cumulative += count as f64 * per_session;
        points.push(WeeklyProgressPoint {
            label: week_label(index + 1),
            progress: to_percent(cumulative),
        });
    }

    let last = points.last().map(|point| point.progress).unwrap_or(0);
    while points.len() < MIN_POINTS {
        points.push(WeeklyProgressPoint {
            label: week_label(points.len() + 1),
            progress: last,
        });
    }

    points
}

/// Aggregates a store read, substituting the zero curve when it failed.
pub fn from_history(
    user_id: Uuid,
    history: Result<Vec<CompletedSession>, StoreError>,
    progress_per_session: f64,
    grouping: WeekGrouping,
) -> Resolved<Vec<WeeklyProgressPoint>> {
    match history {
        Ok(sessions) => {
            tracing::debug!(%user_id, sessions = sessions.len(), "aggregating session history");
            Resolved::Fresh(aggregate(&sessions, progress_per_session, grouping))
        }
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "session history unavailable, using empty curve");
            Resolved::Fallback(empty_curve())
        }
    }
}

fn bucket_counts(sorted: &[&CompletedSession], grouping: WeekGrouping) -> Vec<usize> {
    match grouping {
        WeekGrouping::PerSession => vec![1; sorted.len()],
        WeekGrouping::IsoWeek => {
            let mut counts: Vec<usize> = Vec::new();
            let mut current = None;
            for session in sorted {
                let week = session.date.iso_week();
                if current == Some(week) {
                    if let Some(count) = counts.last_mut() {
                        *count += 1;
                    }
                } else {
                    current = Some(week);
                    counts.push(1);
                }
            }
            counts
        }
    }
}

fn to_percent(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
