use chrono::{DateTime, Duration, Utc};

use crate::predict::error::PredictError;
use crate::predict::observer::Observer;
use crate::predict::orbit::Propagator;
use crate::predict::types::{Pass, VisibilityReading};
use crate::predict::visibility::evaluate;

pub const DEFAULT_STEP_SECONDS: i64 = 60;
const FINE_STEP_SECONDS: i64 = 1;

/// Pass search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSearch {
    /// Coarse sampling step.
    pub step: Duration,
    /// Bisect each horizon crossing down to one second.
    pub refine: bool,
    /// Passes peaking below this elevation are dropped.
    pub min_elevation_deg: f64,
}

impl Default for PassSearch {
    fn default() -> Self {
        Self {
            step: Duration::seconds(DEFAULT_STEP_SECONDS),
            refine: false,
            min_elevation_deg: 0.0,
        }
    }
}

/// Sample instants `start, start + step, ...`, always finishing exactly at
/// `end`.
#[derive(Debug, Clone)]
pub struct SampleTimes {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl SampleTimes {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
            step,
        }
    }
}

impl Iterator for SampleTimes {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.end || self.step <= Duration::zero() {
            None
        } else {
            Some(
                current
                    .checked_add_signed(self.step)
                    .map_or(self.end, |t| t.min(self.end)),
            )
        };
        Some(current)
    }
}

#[derive(Debug)]
enum ScanState {
    NotVisible,
    Visible(OpenPass),
}

#[derive(Debug)]
struct OpenPass {
    start: DateTime<Utc>,
    last_visible: DateTime<Utc>,
    tca: DateTime<Utc>,
    max_elevation_deg: f64,
    min_distance_km: f64,
}

impl OpenPass {
    fn open(start: DateTime<Utc>, at: DateTime<Utc>, reading: &VisibilityReading) -> Self {
        Self {
            start,
            last_visible: at,
            tca: at,
            max_elevation_deg: reading.elevation_deg,
            min_distance_km: reading.distance_km,
        }
    }

    fn update(&mut self, at: DateTime<Utc>, reading: &VisibilityReading) {
        self.last_visible = at;
        if reading.elevation_deg > self.max_elevation_deg {
            self.max_elevation_deg = reading.elevation_deg;
            self.tca = at;
        }
        if reading.distance_km < self.min_distance_km {
            self.min_distance_km = reading.distance_km;
        }
    }

    fn close(self, end: DateTime<Utc>, search: &PassSearch) -> Option<Pass> {
        let keep = self.start < end
            && self.max_elevation_deg > 0.0
            && self.min_distance_km > 0.0
            && self.max_elevation_deg >= search.min_elevation_deg;
        keep.then(|| Pass {
            start: self.start,
            end,
            tca: self.tca,
            max_elevation_deg: self.max_elevation_deg,
            min_distance_km: self.min_distance_km,
        })
    }
}

/// Find all passes of a satellite over an observer within `[start, end]`.
///
/// A pass already in progress at `start` begins at `start`; one still in
/// progress at `end` is truncated to `end`.
pub fn find_passes<P: Propagator>(
    propagator: &P,
    observer: &Observer,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    search: &PassSearch,
) -> Result<Vec<Pass>, PredictError> {
    if end < start {
        return Err(PredictError::InvalidWindow(format!(
            "end {} is before start {}",
            end, start
        )));
    }
    if search.step <= Duration::zero() {
        return Err(PredictError::InvalidWindow(format!(
            "step must be positive, got {}",
            search.step
        )));
    }

    let mut passes = Vec::new();
    let mut state = ScanState::NotVisible;
    let mut previous: Option<DateTime<Utc>> = None;

    for cursor in SampleTimes::new(start, end, search.step) {
        let reading = sample(propagator, observer, cursor)?;

        state = match (state, reading.visible) {
            (ScanState::NotVisible, false) => ScanState::NotVisible,
            (ScanState::NotVisible, true) => {
                let aos = match previous {
                    Some(before) if search.refine => {
                        refine_crossing(propagator, observer, before, cursor, true)?
                    }
                    _ => cursor,
                };
                log::debug!("AOS at {} (el {:.2}°)", aos, reading.elevation_deg);
                ScanState::Visible(OpenPass::open(aos, cursor, &reading))
            }
            (ScanState::Visible(mut open), true) => {
                open.update(cursor, &reading);
                ScanState::Visible(open)
            }
            (ScanState::Visible(open), false) => {
                let los = if search.refine {
                    refine_crossing(propagator, observer, open.last_visible, cursor, false)?
                } else {
                    cursor
                };
                log::debug!("LOS at {} (max el {:.2}°)", los, open.max_elevation_deg);
                passes.extend(open.close(los, search));
                ScanState::NotVisible
            }
        };
        previous = Some(cursor);
    }

    // Handle pass in progress at end of window
    if let ScanState::Visible(open) = state {
        log::debug!("Pass starting {} truncated at {}", open.start, end);
        passes.extend(open.close(end, search));
    }

    Ok(passes)
}

fn sample<P: Propagator>(
    propagator: &P,
    observer: &Observer,
    at: DateTime<Utc>,
) -> Result<VisibilityReading, PredictError> {
    let state = propagator.propagate(at)?;
    Ok(evaluate(state.position_km, observer))
}

/// Binary search for the horizon crossing in `(before, after]`.
///
/// Returns the first instant on the `after` side of the crossing.
fn refine_crossing<P: Propagator>(
    propagator: &P,
    observer: &Observer,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    rising: bool,
) -> Result<DateTime<Utc>, PredictError> {
    let mut low = before;
    let mut high = after;

    while high - low > Duration::seconds(FINE_STEP_SECONDS) {
        let mid = low + (high - low) / 2;
        let above = sample(propagator, observer, mid)?.visible;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(high)
}
