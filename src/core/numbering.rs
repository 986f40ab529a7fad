use chrono::{Datelike, NaiveDate};

use super::error::PcaError;

/// Per-year DFD number sequence.
///
/// Numbers render as `{number}/{year}`, e.g. "124/2022", and restart at 1
/// each exercise year. Every call to [`next_number`](Self::next_number)
/// consumes exactly one number.
#[derive(Debug, Clone)]
pub struct DfdNumberSequence {
    year: i32,
    next: u64,
}

impl DfdNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(year: i32) -> Self {
        Self::starting_at(year, 1)
    }

    /// Continue an existing sequence.
    pub fn starting_at(year: i32, next: u64) -> Self {
        Self { year, next }
    }

    /// Continue after the highest number already issued in `year`.
    ///
    /// Numbers from other years and strings that are not DFD numbers are
    /// ignored.
    pub fn resume<'a>(year: i32, issued: impl IntoIterator<Item = &'a str>) -> Self {
        let last = issued
            .into_iter()
            .filter_map(parse_dfd_number)
            .filter(|&(_, y)| y == year)
            .map(|(n, _)| n)
            .max()
            .unwrap_or(0);
        Self::starting_at(year, last + 1)
    }

    /// Issue the next DFD number.
    pub fn next_number(&mut self) -> String {
        let num = self.next;
        self.next += 1;
        format!("{num}/{}", self.year)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        format!("{}/{}", self.next, self.year)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Issue the number for a DFD created on `created_on`.
    ///
    /// A date in a later year opens that year's sequence. A date in an
    /// earlier year is refused: that year's numbering is closed.
    pub fn issue_for(&mut self, created_on: NaiveDate) -> Result<String, PcaError> {
        let year = created_on.year();
        if year > self.year {
            self.advance_year(year)?;
        } else if year < self.year {
            return Err(PcaError::Numbering(format!(
                "DFD dated {created_on} falls in closed year {year}; current year is {}",
                self.year
            )));
        }
        Ok(self.next_number())
    }

    /// Move to a later exercise year, restarting at 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), PcaError> {
        if new_year <= self.year {
            return Err(PcaError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next = 1;
        Ok(())
    }
}

/// Split a DFD number such as "124/2022" into `(124, 2022)`.
pub fn parse_dfd_number(s: &str) -> Option<(u64, i32)> {
    let (num, year) = s.trim().split_once('/')?;
    Some((num.parse().ok()?, year.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sequential_numbering() {
        let mut seq = DfdNumberSequence::new(2022);
        assert_eq!(seq.next_number(), "1/2022");
        assert_eq!(seq.next_number(), "2/2022");
    }

    #[test]
    fn continues_existing_sequence() {
        let mut seq = DfdNumberSequence::starting_at(2022, 124);
        assert_eq!(seq.peek(), "124/2022");
        assert_eq!(seq.next_number(), "124/2022");
        assert_eq!(seq.peek(), "125/2022");
    }

    #[test]
    fn resume_after_issued_numbers() {
        let issued = ["3/2025", "12/2025", "40/2024", "sem número", "7/2025"];
        let mut seq = DfdNumberSequence::resume(2025, issued);
        assert_eq!(seq.next_number(), "13/2025");

        let fresh = DfdNumberSequence::resume(2026, issued);
        assert_eq!(fresh.peek(), "1/2026");
    }

    #[test]
    fn year_advance() {
        let mut seq = DfdNumberSequence::starting_at(2024, 40);
        seq.advance_year(2025).unwrap();
        assert_eq!(seq.next_number(), "1/2025");
        assert!(seq.advance_year(2025).is_err());
        assert!(seq.advance_year(2020).is_err());
    }

    #[test]
    fn issue_by_creation_date() {
        let mut seq = DfdNumberSequence::starting_at(2024, 40);
        assert_eq!(seq.issue_for(date(2024, 12, 30)).unwrap(), "40/2024");
        assert_eq!(seq.issue_for(date(2025, 1, 2)).unwrap(), "1/2025");
        assert_eq!(seq.year(), 2025);

        let err = seq.issue_for(date(2024, 12, 31)).unwrap_err();
        assert!(matches!(err, PcaError::Numbering(_)));
        assert_eq!(seq.peek(), "2/2025");
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(parse_dfd_number("124/2022"), Some((124, 2022)));
        assert_eq!(parse_dfd_number(" 7/2025 "), Some((7, 2025)));
        assert_eq!(parse_dfd_number("124-2022"), None);
        assert_eq!(parse_dfd_number("x/2022"), None);
    }
}
