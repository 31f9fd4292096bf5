//! Currency and quantity extraction for Brazilian-formatted numbers.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::FieldExtractor;
use super::patterns::{CURRENCY_TOKEN, NUMERIC_RUN, QUANTITY_TOKEN};

/// Currency value extractor (`1.234,56`).
///
/// [`FieldExtractor::extract`] returns the rightmost value of the line: summary
/// lines print a description first and the amount last.
pub struct CurrencyExtractor;

impl CurrencyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrencyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).pop()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NUMERIC_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| CURRENCY_TOKEN.is_match(token))
            .filter_map(parse_brl_amount)
            .collect()
    }
}

/// Integer quantity extractor (`2.000`, `54`).
///
/// Numbers carrying a `,dd` decimal part are amounts and never match.
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = u64;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).pop()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NUMERIC_RUN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| QUANTITY_TOKEN.is_match(token))
            .filter_map(|token| token.replace('.', "").parse().ok())
            .collect()
    }
}

/// Rightmost currency value of a line, or zero when there is none.
pub fn extract_value_from_line(line: &str) -> Decimal {
    CurrencyExtractor::new().extract(line).unwrap_or(Decimal::ZERO)
}

/// Rightmost integer quantity of a line, or zero when there is none.
pub fn extract_amount_from_line(line: &str) -> u64 {
    QuantityExtractor::new().extract(line).unwrap_or(0)
}

/// Parse a Brazilian-formatted amount (e.g. "1.234,56").
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Format an amount in Brazilian style (1.234,56).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let Some((integer_part, decimal_part)) = digits.split_once('.') else {
        return s;
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{}{},{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extract_value_from_line() {
        let cases = [
            ("MINERVA ON NM 2,50", dec!(2.50)),
            ("Faria 1.200,50", dec!(1200.50)),
            ("   1.962,90   ", dec!(1962.90)),
            ("C VISTA 10,99", dec!(10.99)),
            ("Erro 13.33", dec!(0)),
            ("Senha 1000", dec!(0)),
            ("Zero 000###", dec!(0)),
            ("    0.00 ", dec!(0)),
            ("CI ER 091", dec!(0)),
            ("Valor 0021,00", dec!(0)),
            ("02.0", dec!(0)),
            ("... ", dec!(0)),
        ];

        for (line, expected) in cases {
            assert_eq!(extract_value_from_line(line), expected, "line {:?}", line);
        }
    }

    #[test]
    fn test_extract_value_takes_rightmost() {
        assert_eq!(
            extract_value_from_line("I.R.R.F. s/ operações, base R$15.850,00 0,79"),
            dec!(0.79)
        );
        assert_eq!(extract_value_from_line("Taxa de liquidação 7,92 D"), dec!(7.92));
    }

    #[test]
    fn test_extract_amount_from_line() {
        assert_eq!(extract_amount_from_line("1.000.000,00"), 0);
        assert_eq!(extract_amount_from_line("2.000"), 2000);
        assert_eq!(extract_amount_from_line("54"), 54);
        assert_eq!(extract_amount_from_line("PETZ qtd 10"), 10);
        assert_eq!(extract_amount_from_line("12 300 24,99"), 300);
        assert_eq!(extract_amount_from_line("sem numero"), 0);
    }

    #[test]
    fn test_currency_extract_all() {
        let extractor = CurrencyExtractor::new();
        let values = extractor.extract_all("Líquido para 04/05/2022 15.810,50 C 1,00");
        assert_eq!(values, vec![dec!(15810.50), dec!(1.00)]);
    }

    #[test]
    fn test_parse_brl_amount() {
        assert_eq!(parse_brl_amount("1.234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_brl_amount("0,79"), Some(dec!(0.79)));
        assert_eq!(parse_brl_amount("abc"), None);
    }

    #[test]
    fn test_format_brl_amount() {
        assert_eq!(format_brl_amount(dec!(1234.56)), "1.234,56");
        assert_eq!(format_brl_amount(dec!(12345678.9)), "12.345.678,90");
        assert_eq!(format_brl_amount(dec!(0.79)), "0,79");
        assert_eq!(format_brl_amount(dec!(-1500)), "-1.500,00");
    }

    #[test]
    fn test_extract_value_is_idempotent_over_its_own_format() {
        for line in ["Taxa 1.349,46 D", "0,07", "base R$15.850,00 0,79", "nada"] {
            let value = extract_value_from_line(line);
            let again = extract_value_from_line(&format_brl_amount(value));
            assert_eq!(again, value, "line {:?}", line);
        }
    }
}
