//! Loose date handling for relationship timelines.
//!
//! Stored dates are free text: empty, `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`.
//! Granularity rules: two dates of differing precision compare at the
//! coarser granularity; an empty or unparseable start is open at −∞; an
//! empty or unparseable end means "ongoing" and compares after any parsed
//! date. Interval overlap is inclusive.

use std::cmp::Ordering;

/// Precision of a parsed date. Ordering is coarse-to-fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
    Year,
    Month,
    Day,
}

/// A date parsed at whatever precision the raw string carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LooseDate {
    pub year: i32,
    /// 1-based; 0 when granularity is Year.
    pub month: u32,
    /// 1-based; 0 when granularity is coarser than Day.
    pub day: u32,
    pub granularity: Granularity,
}

impl LooseDate {
    /// Best-effort parse. Returns `None` for anything that is not
    /// `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` after trimming — callers treat
    /// that as an open-ended bound, never as an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() > 3 {
            return None;
        }
        let year: i32 = parts[0].parse().ok().filter(|y| (1..=9999).contains(y))?;
        if parts.len() == 1 {
            return Some(Self {
                year,
                month: 0,
                day: 0,
                granularity: Granularity::Year,
            });
        }
        let month: u32 = parts[1].parse().ok().filter(|m| (1..=12).contains(m))?;
        if parts.len() == 2 {
            return Some(Self {
                year,
                month,
                day: 0,
                granularity: Granularity::Month,
            });
        }
        let day: u32 = parts[2].parse().ok().filter(|d| (1..=31).contains(d))?;
        Some(Self {
            year,
            month,
            day,
            granularity: Granularity::Day,
        })
    }

    /// Compare two dates at the coarser of their granularities, so
    /// "2010" and "2010-06" are equal while "2010" and "2011-01" are not.
    pub fn cmp_coarse(&self, other: &Self) -> Ordering {
        let granularity = self.granularity.min(other.granularity);
        let by_year = self.year.cmp(&other.year);
        if by_year != Ordering::Equal || granularity == Granularity::Year {
            return by_year;
        }
        let by_month = self.month.cmp(&other.month);
        if by_month != Ordering::Equal || granularity == Granularity::Month {
            return by_month;
        }
        self.day.cmp(&other.day)
    }
}

impl std::fmt::Display for LooseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.granularity {
            Granularity::Year => write!(f, "{:04}", self.year),
            Granularity::Month => write!(f, "{:04}-{:02}", self.year, self.month),
            Granularity::Day => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}

/// An active period with optionally open ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// `None` = −∞.
    pub start: Option<LooseDate>,
    /// `None` = ongoing.
    pub end: Option<LooseDate>,
}

impl DateRange {
    pub fn from_raw(start: &str, end: &str) -> Self {
        Self {
            start: LooseDate::parse(start),
            end: LooseDate::parse(end),
        }
    }

    /// Inclusive intersection test. A range with no end overlaps every
    /// range it doesn't strictly precede; two endless ranges always meet.
    pub fn overlaps(&self, other: &Self) -> bool {
        starts_on_or_before(self.start, other.end) && starts_on_or_before(other.start, self.end)
    }

    /// The shared window of two overlapping ranges: latest start to
    /// earliest end. Call only after `overlaps` returned true.
    pub fn intersection(&self, other: &Self) -> DateRange {
        DateRange {
            start: pick(self.start, other.start, Ordering::Greater),
            end: pick(self.end, other.end, Ordering::Less),
        }
    }

    /// Human-readable window, e.g. "2019–2020" or "2018–ongoing".
    pub fn label(&self) -> String {
        let start = self
            .start
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let end = self
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "ongoing".to_string());
        format!("{start}\u{2013}{end}")
    }
}

fn starts_on_or_before(start: Option<LooseDate>, end: Option<LooseDate>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s.cmp_coarse(&e) != Ordering::Greater,
        // Open start or open end always reaches the other bound.
        _ => true,
    }
}

/// Pick the bound that wins in the given direction; on a coarse-equal
/// tie the finer-grained date is the tighter bound.
fn pick(a: Option<LooseDate>, b: Option<LooseDate>, wins: Ordering) -> Option<LooseDate> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let chosen = match a.cmp_coarse(&b) {
                o if o == wins => a,
                Ordering::Equal => {
                    if a.granularity >= b.granularity {
                        a
                    } else {
                        b
                    }
                }
                _ => b,
            };
            Some(chosen)
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Ascending order over optional starts, open start (−∞) first.
pub fn cmp_start(a: &Option<LooseDate>, b: &Option<LooseDate>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp_coarse(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> LooseDate {
        LooseDate::parse(raw).unwrap()
    }

    #[test]
    fn parses_recognized_granularities() {
        assert_eq!(d("2010").granularity, Granularity::Year);
        assert_eq!(d(" 2010-06 ").granularity, Granularity::Month);
        assert_eq!(d("2010-06-15").granularity, Granularity::Day);
        assert_eq!(LooseDate::parse(""), None);
        assert_eq!(LooseDate::parse("June 2010"), None);
        assert_eq!(LooseDate::parse("2010-13"), None);
        assert_eq!(LooseDate::parse("2010-06-15-01"), None);
    }

    #[test]
    fn mixed_granularity_compares_coarse() {
        assert_eq!(d("2010").cmp_coarse(&d("2010-06")), Ordering::Equal);
        assert_eq!(d("2010").cmp_coarse(&d("2011-01")), Ordering::Less);
        assert_eq!(d("2010-07").cmp_coarse(&d("2010-06-30")), Ordering::Greater);
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let a = DateRange::from_raw("2010", "2012");
        let b = DateRange::from_raw("2013", "2015");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn touching_ranges_overlap_inclusively() {
        let a = DateRange::from_raw("2010", "2012");
        let b = DateRange::from_raw("2012", "2015");
        assert!(a.overlaps(&b));
    }

    #[test]
    fn open_ends_overlap() {
        let ongoing = DateRange::from_raw("2018", "");
        let later = DateRange::from_raw("2024", "2025");
        assert!(ongoing.overlaps(&later));

        let unknown_start = DateRange::from_raw("", "2005");
        let early = DateRange::from_raw("1990", "1991");
        assert!(unknown_start.overlaps(&early));
        assert!(!later.overlaps(&early));
    }

    #[test]
    fn intersection_window_and_label() {
        let a = DateRange::from_raw("2018", "2020");
        let b = DateRange::from_raw("2019", "2021");
        assert!(a.overlaps(&b));
        assert_eq!(a.intersection(&b).label(), "2019\u{2013}2020");

        let ongoing = DateRange::from_raw("2019", "");
        assert_eq!(a.intersection(&ongoing).label(), "2019\u{2013}2020");
        assert_eq!(
            ongoing.intersection(&DateRange::from_raw("2020", "")).label(),
            "2020\u{2013}ongoing"
        );
    }

    #[test]
    fn intersection_prefers_finer_bound_on_tie() {
        let a = DateRange::from_raw("2019", "2020");
        let b = DateRange::from_raw("2019-03", "2020-06");
        let window = a.intersection(&b);
        assert_eq!(window.start.unwrap().to_string(), "2019-03");
        assert_eq!(window.end.unwrap().to_string(), "2020-06");
    }
}
