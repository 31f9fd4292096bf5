//! Common regex patterns for Brazilian brokerage note extraction.
//!
//! Numbers use `.` as thousands separator and `,` as decimal separator.
//! A numeric token is a maximal run of digits, dots and commas; matching the
//! whole run gives the boundary discipline (no digit, `.` or `,` may touch a
//! match) without look-around.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Maximal runs of characters that can belong to a number
    pub static ref NUMERIC_RUN: Regex = Regex::new(r"[0-9.,]+").unwrap();

    // 1.234,56 / 12,34 / 0,50
    pub static ref CURRENCY_TOKEN: Regex = Regex::new(
        r"^(?:[1-9][0-9]{0,2}(?:\.[0-9]{3})*|0),[0-9]{2}$"
    ).unwrap();

    // 1.000 / 1000 / 54
    pub static ref QUANTITY_TOKEN: Regex = Regex::new(
        r"^(?:[1-9][0-9]{0,2}(?:\.[0-9]{3})+|[0-9]+)$"
    ).unwrap();

    // 02/05/2022
    pub static ref DATE_DMY: Regex = Regex::new(
        r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})"
    ).unwrap();

    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();

    // Format XXXXYY where YY is 31, 32, 33, 34, 35, 36 or 39
    pub static ref BDR_TICKER: Regex = Regex::new(
        r"(?i)[A-Z]{4}(?:31|32|33|34|35|36|39)"
    ).unwrap();

    // Format XXXXY, XXXXYF or XXXXYB where Y is 3, 4 or 11
    pub static ref BASIC_TICKER: Regex = Regex::new(
        r"(?i)[A-Z]{4}(?:3|4|11)(?:F|B)?"
    ).unwrap();

    // Observation codes printed next to the security name (#, #2, #AB...)
    pub static ref OBSERVATION_CODE: Regex = Regex::new(r"#[A-Za-z0-9]*").unwrap();

    pub static ref TRAILING_D_MARKER: Regex = Regex::new(r" D$").unwrap();
}
