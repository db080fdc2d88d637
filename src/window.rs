//! Calendar windows for the day/week/month boards
//!
//! This module computes which dates a board shows: the full date sequence for a
//! given cursor (a single day, a Monday-based week, or a whole month) and, in Month
//! mode, a fixed-width visible slice with its own scroll offset. The computations
//! are pure and deterministic: everything can be recomputed from the cursor alone,
//! the scroll offset being the only extra piece of mutable state.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Width of the visible sub-window in Month mode
pub const VISIBLE_SPAN: usize = 5;
/// The weekday a week starts on
pub const WEEK_START: Weekday = Weekday::Mon;

/// Which calendar range a board follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// A single day
    Day,
    /// Seven consecutive dates starting on [`WEEK_START`]
    Week,
    /// Every date of the cursor's month
    Month,
}

/// The most recent [`WEEK_START`] at or before `day`
pub fn week_start_of(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// The 7 consecutive dates of the week containing `cursor`
pub fn week_dates(cursor: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start_of(cursor);
    (0..7).map(|n| start + Duration::days(n)).collect()
}

/// Every date of the cursor's month, from day 1 to the last day (inclusive)
pub fn month_dates(cursor: NaiveDate) -> Vec<NaiveDate> {
    let first = cursor.with_day(1).expect("day 1 exists in every month");
    let mut dates = Vec::with_capacity(31);
    let mut day = first;
    while day.month() == cursor.month() {
        dates.push(day);
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// The initial scroll offset of the Month-mode visible sub-window.
///
/// `today` (when part of `dates`) is centered: `max(0, today_index - 2)`, further
/// clamped to `len - VISIBLE_SPAN` so the visible slice is always full-width even
/// when today falls in the last days of the month
pub fn initial_offset(dates: &[NaiveDate], today: NaiveDate) -> usize {
    let max_offset = dates.len().saturating_sub(VISIBLE_SPAN);
    match dates.iter().position(|day| *day == today) {
        None => 0,
        Some(index) => index.saturating_sub(VISIBLE_SPAN / 2).min(max_offset),
    }
}

/// The default selection for a freshly computed window: today where in range,
/// else the start of the range
pub fn default_selection(dates: &[NaiveDate], today: NaiveDate) -> NaiveDate {
    if dates.contains(&today) {
        today
    } else {
        dates[0]
    }
}

/// A computed date range and, in Month mode, the scroll state of its visible slice
#[derive(Clone, Debug, PartialEq)]
pub struct DateWindow {
    mode: ViewMode,
    cursor: NaiveDate,
    dates: Vec<NaiveDate>,
    offset: usize,
}

impl DateWindow {
    /// Compute the window of the given mode anchored at `today`
    pub fn new(mode: ViewMode, today: NaiveDate) -> Self {
        let mut window = Self {
            mode,
            cursor: today,
            dates: Vec::new(),
            offset: 0,
        };
        window.recompute(today);
        window
    }

    /// A single-date window anchored at an arbitrary date (used by special-day boards)
    pub fn pinned(date: NaiveDate) -> Self {
        Self::new(ViewMode::Day, date)
    }

    fn recompute(&mut self, today: NaiveDate) {
        self.dates = match self.mode {
            ViewMode::Day => vec![self.cursor],
            ViewMode::Week => week_dates(self.cursor),
            ViewMode::Month => month_dates(self.cursor),
        };
        self.offset = match self.mode {
            ViewMode::Month => initial_offset(&self.dates, today),
            _ => 0,
        };
    }

    pub fn mode(&self) -> ViewMode { self.mode }
    pub fn cursor(&self) -> NaiveDate { self.cursor }
    pub fn offset(&self) -> usize { self.offset }

    /// The full date sequence: ascending, contiguous, no duplicates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The currently visible slice of the full sequence.
    ///
    /// Only Month mode windows scroll; a Day or Week window is visible in full
    pub fn visible(&self) -> &[NaiveDate] {
        match self.mode {
            ViewMode::Month => {
                let end = (self.offset + VISIBLE_SPAN).min(self.dates.len());
                &self.dates[self.offset..end]
            },
            _ => &self.dates,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.dates.contains(&day)
    }

    /// Scroll the visible sub-window one date towards the start of the month.
    /// Clamps at the left bound instead of wrapping
    pub fn scroll_back(&mut self) {
        if self.mode != ViewMode::Month {
            return;
        }
        if self.offset > 0 {
            self.offset -= 1;
        }
    }

    /// Scroll the visible sub-window one date towards the end of the month.
    /// Clamps at the right bound instead of wrapping
    pub fn scroll_forward(&mut self) {
        if self.mode != ViewMode::Month {
            return;
        }
        if self.offset + VISIBLE_SPAN < self.dates.len() {
            self.offset += 1;
        }
    }

    /// Move a Week window to the next week (the cursor shifts by exactly 7 days).
    /// Ignored in other modes
    pub fn next_week(&mut self) {
        self.shift_weeks(1);
    }

    /// Move a Week window to the previous week (the cursor shifts by exactly 7 days).
    /// Ignored in other modes
    pub fn previous_week(&mut self) {
        self.shift_weeks(-1);
    }

    fn shift_weeks(&mut self, n: i64) {
        if self.mode != ViewMode::Week {
            log::debug!("Ignoring a week shift on a {:?} window", self.mode);
            return;
        }
        self.cursor += Duration::days(7 * n);
        self.dates = week_dates(self.cursor);
    }
}
