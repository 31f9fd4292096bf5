//! Traded securities and ticker recognition.

use serde::{Deserialize, Serialize};

use crate::notes::rules::patterns::{
    BASIC_TICKER, BDR_TICKER, OBSERVATION_CODE, TRAILING_D_MARKER,
};

/// Notation artifacts brokers append to security names.
const NAME_MARKERS: [&str; 8] = ["EDJ", "EDR", " EJ", " ED", " CI", " ER", " EB", "."];

/// Broad class of a security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityType {
    #[serde(rename = "AÇÃO")]
    Stock,
    #[serde(rename = "FII")]
    RealEstateFund,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "BDR")]
    Bdr,
    #[serde(rename = "OPÇÃO")]
    Option,
    #[serde(rename = "ÍNDICE")]
    Index,
}

/// A security as printed on a note, with the ticker found in its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Security {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
}

impl Security {
    /// Clean up a raw name and look for a ticker in it.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = cleanup_name(name.as_ref());
        let ticker = extract_ticker(&name);
        Self { name, ticker }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    /// Type implied by the name and ticker, when it can be told.
    pub fn security_type(&self) -> Option<SecurityType> {
        let ticker = self.ticker.as_deref()?;
        if BDR_TICKER.is_match(ticker) {
            Some(SecurityType::Bdr)
        } else if self.name.starts_with("FII") {
            Some(SecurityType::RealEstateFund)
        } else {
            Some(SecurityType::Stock)
        }
    }
}

fn cleanup_name(raw: &str) -> String {
    let name = OBSERVATION_CODE.replace_all(raw, "");
    let mut name = TRAILING_D_MARKER.replace(&name, "").into_owned();
    for marker in NAME_MARKERS {
        name = name.replace(marker, "");
    }
    name.trim().to_string()
}

/// BDR tickers are checked first: the basic pattern would cut `GOOG34` to `GOOG3`.
fn extract_ticker(name: &str) -> Option<String> {
    [&*BDR_TICKER, &*BASIC_TICKER]
        .iter()
        .find_map(|pattern| pattern.find(name))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fii() {
        assert_eq!(Security::new("FII BTLG BTLG11 TEST").ticker(), Some("BTLG11"));
        assert_eq!(Security::new("FII BTLG BTLG11B TEST").ticker(), Some("BTLG11B"));
        assert_eq!(Security::new("FIIBTLGBTLG11TEST").ticker(), Some("BTLG11"));
    }

    #[test]
    fn test_ticker_stocks() {
        assert_eq!(Security::new("PETROBRAS ON PETR3 NM").ticker(), Some("PETR3"));
        assert_eq!(Security::new("PETROBRAS ON PETR4 NM").ticker(), Some("PETR4"));
        assert_eq!(Security::new("PETROBRAS ON PETR11 NM").ticker(), Some("PETR11"));
        assert_eq!(Security::new("PETROBRAS ON PETR11F NM").ticker(), Some("PETR11F"));
    }

    #[test]
    fn test_ticker_bdr_preferred() {
        let security = Security::new("GOOGLE ON GOOG34 NM");
        assert_eq!(security.ticker(), Some("GOOG34"));
        assert_eq!(security.security_type(), Some(SecurityType::Bdr));
    }

    #[test]
    fn test_no_ticker() {
        let security = Security::new("PETROBRAS ON NM");
        assert_eq!(security.ticker(), None);
        assert_eq!(security.security_type(), None);
    }

    #[test]
    fn test_name_cleanup() {
        assert_eq!(Security::new("BR PARTNERS UNT N2 #").name(), "BR PARTNERS UNT N2");
        assert_eq!(Security::new("ITAUSA PN EDJ N1 #2").name(), "ITAUSA PN  N1");
        assert_eq!(Security::new("VALE ON NM D").name(), "VALE ON NM");
        assert_eq!(Security::new("BRASIL ON ER NM").name(), "BRASIL ON NM");
        assert_eq!(Security::new("KLABIN S.A. UNT N2").name(), "KLABIN SA UNT N2");
        assert_eq!(Security::new("  BBSEGURIDADE ON NM ").name(), "BBSEGURIDADE ON NM");
    }

    #[test]
    fn test_security_type_fund_and_stock() {
        assert_eq!(
            Security::new("FII BTLG BTLG11").security_type(),
            Some(SecurityType::RealEstateFund)
        );
        assert_eq!(
            Security::new("PETROBRAS PN PETR4").security_type(),
            Some(SecurityType::Stock)
        );
    }
}
