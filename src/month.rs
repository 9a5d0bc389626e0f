//! Parsing for the `month` path segment used by the aggregation endpoints.

use time::Month;

/// How the `month` path segment selects transactions.
///
/// A value that reads as an English month name or a number from 1 to 12
/// selects transactions by the calendar month of their sale date. Anything
/// else falls back to a case-insensitive substring match against the stored
/// date text.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthFilter {
    /// Match transactions whose sale date falls in the given calendar month,
    /// in any year.
    Calendar(Month),
    /// Match transactions whose stored date text contains the given string,
    /// ignoring case.
    Pattern(String),
}

impl MonthFilter {
    /// Interpret the raw `month` path segment from a request.
    pub fn parse(raw: &str) -> MonthFilter {
        let trimmed = raw.trim();

        if let Ok(number) = trimmed.parse::<u8>()
            && let Ok(month) = Month::try_from(number)
        {
            return MonthFilter::Calendar(month);
        }

        let month = match trimmed.to_lowercase().as_str() {
            "january" => Some(Month::January),
            "february" => Some(Month::February),
            "march" => Some(Month::March),
            "april" => Some(Month::April),
            "may" => Some(Month::May),
            "june" => Some(Month::June),
            "july" => Some(Month::July),
            "august" => Some(Month::August),
            "september" => Some(Month::September),
            "october" => Some(Month::October),
            "november" => Some(Month::November),
            "december" => Some(Month::December),
            _ => None,
        };

        match month {
            Some(month) => MonthFilter::Calendar(month),
            None => MonthFilter::Pattern(trimmed.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::MonthFilter;

    #[test]
    fn parses_month_names_case_insensitively() {
        assert_eq!(
            MonthFilter::parse("March"),
            MonthFilter::Calendar(Month::March)
        );
        assert_eq!(
            MonthFilter::parse("march"),
            MonthFilter::Calendar(Month::March)
        );
        assert_eq!(
            MonthFilter::parse("DECEMBER"),
            MonthFilter::Calendar(Month::December)
        );
    }

    #[test]
    fn parses_month_numbers() {
        assert_eq!(MonthFilter::parse("3"), MonthFilter::Calendar(Month::March));
        assert_eq!(
            MonthFilter::parse("03"),
            MonthFilter::Calendar(Month::March)
        );
        assert_eq!(
            MonthFilter::parse("12"),
            MonthFilter::Calendar(Month::December)
        );
    }

    #[test]
    fn falls_back_to_pattern_matching() {
        assert_eq!(
            MonthFilter::parse("definitely-not-a-month"),
            MonthFilter::Pattern("definitely-not-a-month".to_owned())
        );
        // Out of range numbers are not calendar months.
        assert_eq!(
            MonthFilter::parse("13"),
            MonthFilter::Pattern("13".to_owned())
        );
        assert_eq!(MonthFilter::parse("0"), MonthFilter::Pattern("0".to_owned()));
    }
}
