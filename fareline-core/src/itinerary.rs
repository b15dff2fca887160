use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::{CoreError, CoreResult};

/// Two-digit year appended to `DDMON` date tokens.
///
/// Flight lines carry no year, so one is supplied from configuration
/// rather than guessed from the clock.
pub const DEFAULT_SCHEDULE_YEAR: u8 = 25;

/// Status code in a flight line that stands in for the passenger count
pub const PASSENGER_PLACEHOLDER: &str = "AK1";

const MIN_TOKENS: usize = 7;

/// One segment of a GDS availability line, e.g.
/// `EK 543 21JAN MAADXB AK1 0345 0635 TU`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightLine {
    /// 1-based position in the submitted text
    pub index: usize,
    pub raw: String,
    pub carrier: String,
    pub flight_number: String,
    pub date_token: String,
    pub route: String,
    pub status: String,
    pub departure_token: String,
    pub arrival_token: String,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
}

impl FlightLine {
    /// Parse a single line. Extra tokens past the seventh are ignored.
    pub fn parse(index: usize, raw: &str, schedule_year: u8) -> CoreResult<Self> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(CoreError::MalformedFlightLine {
                index,
                line: raw.to_string(),
            });
        }

        let departure_date = parse_date(tokens[2], schedule_year).ok_or_else(|| {
            CoreError::InvalidDate {
                index,
                token: tokens[2].to_string(),
            }
        })?;
        let departure_time = parse_time(index, tokens[5])?;
        let arrival_time = parse_time(index, tokens[6])?;

        Ok(Self {
            index,
            raw: raw.to_string(),
            carrier: tokens[0].to_string(),
            flight_number: tokens[1].to_string(),
            date_token: tokens[2].to_string(),
            route: tokens[3].to_string(),
            status: tokens[4].to_string(),
            departure_token: tokens[5].to_string(),
            arrival_token: tokens[6].to_string(),
            departure_date,
            departure_time,
            arrival_time,
        })
    }

    pub fn origin(&self) -> &str {
        self.route_split().0
    }

    /// `MAADXB` becomes `MAA-DXB`
    pub fn route_display(&self) -> String {
        let (origin, destination) = self.route_split();
        format!("{}-{}", origin, destination)
    }

    /// `21-Jan-25`
    pub fn departure_date_display(&self) -> String {
        self.departure_date.format("%d-%b-%y").to_string()
    }

    /// Same-day arrival is assumed.
    pub fn arrival_date_display(&self) -> String {
        self.departure_date_display()
    }

    /// `03:45 AM`
    pub fn departure_time_display(&self) -> String {
        twelve_hour(self.departure_time)
    }

    pub fn arrival_time_display(&self) -> String {
        twelve_hour(self.arrival_time)
    }

    pub fn flight_number_display(&self) -> String {
        format!("{} {}", self.carrier, self.flight_number)
    }

    /// The raw line with every `AK1` replaced by the passenger count,
    /// ready to be pasted into a blocking script.
    pub fn with_passenger_count(&self, passenger_count: u32) -> String {
        self.raw
            .replace(PASSENGER_PLACEHOLDER, &passenger_count.to_string())
    }

    fn route_split(&self) -> (&str, &str) {
        match self.route.char_indices().nth(3) {
            Some((at, _)) => self.route.split_at(at),
            None => (self.route.as_str(), ""),
        }
    }
}

/// Split free text into trimmed, non-empty flight lines
pub fn split_flight_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse every line, stopping at the first bad one
pub fn parse_all(lines: &[String], schedule_year: u8) -> CoreResult<Vec<FlightLine>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| FlightLine::parse(i + 1, line, schedule_year))
        .collect()
}

fn parse_date(token: &str, schedule_year: u8) -> Option<NaiveDate> {
    let dated = format!("{}{:02}", token, schedule_year % 100);
    NaiveDate::parse_from_str(&dated, "%d%b%y").ok()
}

fn parse_time(index: usize, token: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(token, "%H%M").map_err(|_| CoreError::InvalidTime {
        index,
        token: token.to_string(),
    })
}

fn twelve_hour(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}
