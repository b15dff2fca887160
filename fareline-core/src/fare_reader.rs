use serde::Serialize;
use std::path::Path;

use crate::fare::FareInputs;

/// Currency marker the fare line is anchored on
const CURRENCY_MARKER: &str = "INR";

/// Fares read off a fare-quote screenshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareQuote {
    pub basic_fare: i64,
    pub total_fare: i64,
    pub raw_text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FareReadError {
    #[error("Could not find fares in image text")]
    NoFareLine,
    #[error("OCR engine failed: {0}")]
    Engine(String),
}

/// Turns a fare-quote image into text and fares
pub trait FareReader {
    fn read_fares(&self, image: &Path) -> Result<FareQuote, FareReadError>;
}

/// Pull the basic and total fare out of OCR text.
///
/// The first line that mentions `INR`, contains a digit and has integers
/// one and three tokens after the `INR` token wins. Thousands separators
/// are ignored. A zero in either position counts as not found.
pub fn extract_fares(text: &str) -> Result<FareQuote, FareReadError> {
    let found = text
        .lines()
        .filter(|line| line.contains(CURRENCY_MARKER) && line.chars().any(|c| c.is_ascii_digit()))
        .find_map(fares_on_line);

    match found {
        Some((basic_fare, total_fare)) if basic_fare != 0 && total_fare != 0 => Ok(FareQuote {
            basic_fare,
            total_fare,
            raw_text: text.to_string(),
        }),
        _ => Err(FareReadError::NoFareLine),
    }
}

fn fares_on_line(line: &str) -> Option<(i64, i64)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let marker = parts.iter().position(|p| *p == CURRENCY_MARKER)?;
    let basic = parse_amount(parts.get(marker + 1)?)?;
    let total = parse_amount(parts.get(marker + 3)?)?;
    Some((basic, total))
}

fn parse_amount(token: &str) -> Option<i64> {
    token.replace(',', "").parse().ok()
}

/// Fill fare inputs from a screenshot when one is supplied.
///
/// OCR failure is not fatal: the manually entered fares are kept and a
/// warning is logged.
pub fn resolve_fares(
    manual: FareInputs,
    reader: &dyn FareReader,
    screenshot: Option<&Path>,
) -> FareInputs {
    let Some(image) = screenshot else {
        return manual;
    };

    match reader.read_fares(image) {
        Ok(quote) => {
            tracing::info!(
                basic_fare = quote.basic_fare,
                total_fare = quote.total_fare,
                "Fares read from screenshot"
            );
            FareInputs {
                basic_fare: quote.basic_fare,
                total_fare: quote.total_fare,
                ..manual
            }
        }
        Err(e) => {
            tracing::warn!("OCR failed for {}: {}; keeping manual fares", image.display(), e);
            manual
        }
    }
}
