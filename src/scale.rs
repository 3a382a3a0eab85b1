//! Domain → range mappings used to place chart geometry.
//!
//! Scales are plain values: a chart builds them at initialization and keeps
//! them for its lifetime, only the cumulative scale of the distribution
//! chart is rebuilt on update.

use crate::core::Color;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Continuous linear mapping `[d0, d1] → [r0, r1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f32; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f64) -> f32 {
        let [d0, d1] = self.domain;
        let t = if d1 == d0 { 0.5 } else { (v - d0) / (d1 - d0) };
        let [r0, r1] = self.range;
        (f64::from(r0) + f64::from(r1 - r0) * t) as f32
    }

    pub fn invert(&self, px: f32) -> f64 {
        let [r0, r1] = self.range;
        let t = if r1 == r0 { 0.5 } else { f64::from((px - r0) / (r1 - r0)) };
        let [d0, d1] = self.domain;
        d0 + (d1 - d0) * t
    }

    /// Round tick values covering the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [a, b] = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let Some(step) = nice_step(lo, hi, count) else {
            return if lo == hi && lo.is_finite() { vec![lo] } else { vec![] };
        };
        step.values(lo, hi)
    }
}

/// Tick spacing of 1, 2 or 5 times a power of ten.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickStep {
    /// Step of `n`.
    Times(f64),
    /// Step of `1 / n`, kept as a divisor so decimals stay exact.
    Over(f64),
}

impl TickStep {
    pub fn size(&self) -> f64 {
        match *self {
            Self::Times(n) => n,
            Self::Over(n) => 1.0 / n,
        }
    }

    fn values(&self, lo: f64, hi: f64) -> Vec<f64> {
        let (i0, i1) = match *self {
            Self::Times(n) => ((lo / n).ceil(), (hi / n).floor()),
            Self::Over(n) => ((lo * n).ceil(), (hi * n).floor()),
        };
        if i1 < i0 {
            return vec![];
        }
        (i0 as i64..=i1 as i64)
            .map(|i| match *self {
                Self::Times(n) => i as f64 * n,
                Self::Over(n) => i as f64 / n,
            })
            .collect()
    }
}

/// Calculate a nice tick step for `[lo, hi]` split into about `count` parts.
pub fn nice_step(lo: f64, hi: f64, count: usize) -> Option<TickStep> {
    let range = hi - lo;
    if count == 0 || range <= 0.0 || !range.is_finite() {
        return None;
    }
    let rough = range / count as f64;
    let power = rough.log10().floor();
    let error = rough / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    Some(if power >= 0.0 {
        TickStep::Times(factor * 10f64.powf(power))
    } else {
        TickStep::Over(10f64.powf(-power) / factor)
    })
}

/// How tick values are printed next to an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TickFormat {
    /// Whole numbers, no grouping.
    #[default]
    Integer,
    /// SI prefix: `2.5k`, `1M`.
    SiPrefix,
    /// Fraction as percent: `0.2` → `20%`.
    Percent,
}

impl TickFormat {
    pub fn format(&self, v: f64) -> String {
        match self {
            Self::Integer => format!("{:.0}", v),
            Self::SiPrefix => {
                let abs = v.abs();
                let (scaled, suffix) = if abs >= 1e9 {
                    (v / 1e9, "G")
                } else if abs >= 1e6 {
                    (v / 1e6, "M")
                } else if abs >= 1e3 {
                    (v / 1e3, "k")
                } else {
                    (v, "")
                };
                format!("{}{}", trim_decimal(scaled), suffix)
            }
            Self::Percent => format!("{}%", trim_decimal(v * 100.0)),
        }
    }
}

fn trim_decimal(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Linear mapping from wall-clock time to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub domain: [NaiveDateTime; 2],
    pub range: [f32; 2],
}

impl TimeScale {
    pub fn new(domain: [NaiveDateTime; 2], range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    fn seconds(t: NaiveDateTime) -> f64 {
        t.and_utc().timestamp() as f64
    }

    fn linear(&self) -> LinearScale {
        LinearScale::new(
            [Self::seconds(self.domain[0]), Self::seconds(self.domain[1])],
            self.range,
        )
    }

    pub fn apply(&self, t: NaiveDateTime) -> f32 {
        self.linear().apply(Self::seconds(t))
    }

    /// Calendar-aligned ticks, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let [a, b] = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let span = Self::seconds(hi) - Self::seconds(lo);
        if count == 0 || span <= 0.0 {
            return vec![lo];
        }
        TimeInterval::for_span(span / count as f64).ticks(lo, hi)
    }

    /// Label in the coarsest unit that is not at its boundary.
    pub fn tick_label(t: NaiveDateTime) -> String {
        let fmt = if t.hour() != 0 {
            "%I %p"
        } else if t.day() != 1 {
            "%b %d"
        } else if t.month() != 1 {
            "%B"
        } else {
            "%Y"
        };
        t.format(fmt).to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimeInterval {
    Hours(u32),
    Days(u32),
    Week,
    Months(u32),
    Years(i32),
}

impl TimeInterval {
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 86_400.0;
    const YEAR: f64 = 365.0 * Self::DAY;

    const LADDER: [TimeInterval; 10] = [
        Self::Hours(1),
        Self::Hours(3),
        Self::Hours(6),
        Self::Hours(12),
        Self::Days(1),
        Self::Days(2),
        Self::Week,
        Self::Months(1),
        Self::Months(3),
        Self::Years(1),
    ];

    fn approx_seconds(&self) -> f64 {
        match *self {
            Self::Hours(k) => f64::from(k) * Self::HOUR,
            Self::Days(k) => f64::from(k) * Self::DAY,
            Self::Week => 7.0 * Self::DAY,
            Self::Months(k) => f64::from(k) * 30.0 * Self::DAY,
            Self::Years(k) => f64::from(k) * Self::YEAR,
        }
    }

    fn for_span(target: f64) -> Self {
        Self::LADDER
            .into_iter()
            .find(|i| i.approx_seconds() >= target)
            .unwrap_or_else(|| {
                let years = nice_step(0.0, target / Self::YEAR, 1)
                    .map(|s| s.size().ceil())
                    .unwrap_or(1.0);
                Self::Years(years.max(1.0) as i32)
            })
    }

    fn ticks(&self, lo: NaiveDateTime, hi: NaiveDateTime) -> Vec<NaiveDateTime> {
        let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0);
        let mut out = Vec::new();
        match *self {
            Self::Hours(k) => {
                let aligned = lo.hour() - lo.hour() % k;
                let Some(mut t) = lo.date().and_hms_opt(aligned, 0, 0) else {
                    return out;
                };
                if t < lo {
                    t += Duration::hours(i64::from(k));
                }
                while t <= hi {
                    out.push(t);
                    t += Duration::hours(i64::from(k));
                }
            }
            Self::Days(_) | Self::Week => {
                let mut day = lo.date();
                if midnight(day).is_some_and(|t| t < lo) {
                    day = day.succ_opt().unwrap_or(day);
                }
                while let Some(t) = midnight(day).filter(|t| *t <= hi) {
                    let keep = match *self {
                        Self::Days(k) => (day.day() - 1) % k == 0,
                        _ => day.weekday() == Weekday::Sun,
                    };
                    if keep {
                        out.push(t);
                    }
                    let Some(next) = day.succ_opt() else { break };
                    day = next;
                }
            }
            Self::Months(k) => {
                let (mut year, mut month) = (lo.year(), lo.month());
                loop {
                    let Some(t) = NaiveDate::from_ymd_opt(year, month, 1).and_then(midnight)
                    else {
                        break;
                    };
                    if t > hi {
                        break;
                    }
                    if t >= lo && (month - 1) % k == 0 {
                        out.push(t);
                    }
                    (year, month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
                }
            }
            Self::Years(k) => {
                let mut year = lo.year();
                while let Some(t) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(midnight) {
                    if t > hi {
                        break;
                    }
                    if t >= lo && year.rem_euclid(k) == 0 {
                        out.push(t);
                    }
                    year += 1;
                }
            }
        }
        out
    }
}

/// Evenly spaced positions for an ordered set of discrete keys.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale<T> {
    pub domain: Vec<T>,
    pub range: [f32; 2],
}

impl<T: PartialEq> PointScale<T> {
    pub fn new(domain: Vec<T>, range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, key: &T) -> Option<f32> {
        let index = self.domain.iter().position(|k| k == key)?;
        let [r0, r1] = self.range;
        if self.domain.len() == 1 {
            return Some((r0 + r1) * 0.5);
        }
        let step = (r1 - r0) / (self.domain.len() - 1) as f32;
        Some(r0 + step * index as f32)
    }
}

/// Diverging red → yellow → blue ramp.
const RD_YL_BU: [Color; 11] = [
    Color::hex(0xa50026),
    Color::hex(0xd73027),
    Color::hex(0xf46d43),
    Color::hex(0xfdae61),
    Color::hex(0xfee090),
    Color::hex(0xffffbf),
    Color::hex(0xe0f3f8),
    Color::hex(0xabd9e9),
    Color::hex(0x74add1),
    Color::hex(0x4575b4),
    Color::hex(0x313695),
];

/// Maps a numeric domain onto the red-yellow-blue ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequentialColorScale {
    pub domain: [f64; 2],
}

impl Default for SequentialColorScale {
    fn default() -> Self {
        Self { domain: [0.0, 100.0] }
    }
}

impl SequentialColorScale {
    pub fn apply(&self, v: f64) -> Color {
        let [d0, d1] = self.domain;
        let t = if d1 == d0 { 0.5 } else { ((v - d0) / (d1 - d0)).clamp(0.0, 1.0) };
        let scaled = t * (RD_YL_BU.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(RD_YL_BU.len() - 2);
        RD_YL_BU[i].lerp(RD_YL_BU[i + 1], (scaled - i as f64) as f32)
    }
}
