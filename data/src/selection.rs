use chrono::Datelike;
use exchange::{Company, UnknownCompany};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based, as in `chrono::Datelike::month`.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Month::ALL.get(idx as usize))
            .copied()
    }

    pub fn of(date: &impl Datelike) -> Self {
        // month() is always within 1..=12
        Month::ALL[date.month0() as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Month {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|month| month.as_str() == s)
            .ok_or_else(|| SelectionError::UnknownMonth(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0:?} is not one of Apple, Microsoft, Amazon, Google, Meta")]
    UnknownCompany(String),
    #[error("{0:?} is not a calendar month name")]
    UnknownMonth(String),
}

impl From<UnknownCompany> for SelectionError {
    fn from(err: UnknownCompany) -> Self {
        SelectionError::UnknownCompany(err.0)
    }
}

/// The company and month a chart is filtered by.
///
/// Setters report whether the value actually changed so callers know when a
/// redraw is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    company: Company,
    month: Month,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            company: Company::Apple,
            month: Month::November,
        }
    }
}

impl Selection {
    pub fn new(company: Company, month: Month) -> Self {
        Self { company, month }
    }

    pub fn company(&self) -> Company {
        self.company
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn select_company(&mut self, company: Company) -> bool {
        let changed = self.company != company;
        self.company = company;
        changed
    }

    pub fn select_month(&mut self, month: Month) -> bool {
        let changed = self.month != month;
        self.month = month;
        changed
    }

    pub fn set_company(&mut self, value: &str) -> Result<bool, SelectionError> {
        let company = value.parse::<Company>()?;
        Ok(self.select_company(company))
    }

    pub fn set_month(&mut self, value: &str) -> Result<bool, SelectionError> {
        let month = value.parse::<Month>()?;
        Ok(self.select_month(month))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.company, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_to_apple_in_november() {
        let selection = Selection::default();
        assert_eq!(selection.company(), Company::Apple);
        assert_eq!(selection.month(), Month::November);
    }

    #[test]
    fn accepts_known_values() {
        let mut selection = Selection::default();

        assert_eq!(selection.set_company("Microsoft"), Ok(true));
        assert_eq!(selection.set_month("March"), Ok(true));
        assert_eq!(selection, Selection::new(Company::Microsoft, Month::March));
    }

    #[test]
    fn reselecting_the_same_value_is_not_a_change() {
        let mut selection = Selection::default();

        assert_eq!(selection.set_company("Apple"), Ok(false));
        assert!(!selection.select_month(Month::November));
    }

    #[test]
    fn rejects_values_outside_the_enumerations() {
        let mut selection = Selection::default();

        assert_eq!(
            selection.set_company("Tesla"),
            Err(SelectionError::UnknownCompany("Tesla".to_string()))
        );
        assert_eq!(
            selection.set_month("Smarch"),
            Err(SelectionError::UnknownMonth("Smarch".to_string()))
        );
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::December.number(), 12);
        assert_eq!(Month::from_number(11), Some(Month::November));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn month_of_date() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 2).unwrap();
        assert_eq!(Month::of(&date), Month::November);
    }
}
