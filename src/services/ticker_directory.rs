use serde::Serialize;

/// Maximum number of search results returned
pub const SEARCH_LIMIT: usize = 10;

/// Known NGX listings: ticker → company display name
const NGX_TICKERS: &[(&str, &str)] = &[
    ("ACCESSCORP", "Access Holdings Plc"),
    ("AIICO", "AIICO Insurance Plc"),
    ("AIRTELAFRI", "Airtel Africa Plc"),
    ("ARADEL", "Aradel Holdings Plc"),
    ("BUACEMENT", "BUA Cement Plc"),
    ("BUAFOODS", "BUA Foods Plc"),
    ("CADBURY", "Cadbury Nigeria Plc"),
    ("CONOIL", "Conoil Plc"),
    ("CUSTODIAN", "Custodian Investment Plc"),
    ("DANGCEM", "Dangote Cement Plc"),
    ("DANGSUGAR", "Dangote Sugar Refinery Plc"),
    ("ETI", "Ecobank Transnational Incorporated"),
    ("FBNH", "FBN Holdings Plc"),
    ("FCMB", "FCMB Group Plc"),
    ("FIDELITYBK", "Fidelity Bank Plc"),
    ("FLOURMILL", "Flour Mills of Nigeria Plc"),
    ("GEREGU", "Geregu Power Plc"),
    ("GTCO", "Guaranty Trust Holding Company Plc"),
    ("GUINNESS", "Guinness Nigeria Plc"),
    ("INTBREW", "International Breweries Plc"),
    ("JBERGER", "Julius Berger Nigeria Plc"),
    ("MTNN", "MTN Nigeria Communications Plc"),
    ("NAHCO", "Nigerian Aviation Handling Company Plc"),
    ("NB", "Nigerian Breweries Plc"),
    ("NESTLE", "Nestle Nigeria Plc"),
    ("OANDO", "Oando Plc"),
    ("OKOMUOIL", "Okomu Oil Palm Plc"),
    ("PRESCO", "Presco Plc"),
    ("PZ", "PZ Cussons Nigeria Plc"),
    ("SEPLAT", "Seplat Energy Plc"),
    ("STANBIC", "Stanbic IBTC Holdings Plc"),
    ("STERLINGNG", "Sterling Financial Holdings Company Plc"),
    ("TOTAL", "TotalEnergies Marketing Nigeria Plc"),
    ("TRANSCOHOT", "Transcorp Hotels Plc"),
    ("TRANSCORP", "Transnational Corporation Plc"),
    ("UBA", "United Bank for Africa Plc"),
    ("UCAP", "United Capital Plc"),
    ("UNILEVER", "Unilever Nigeria Plc"),
    ("WAPCO", "Lafarge Africa Plc"),
    ("WEMABANK", "Wema Bank Plc"),
    ("ZENITHBANK", "Zenith Bank Plc"),
];

/// Large, frequently analyzed names shown on the landing list
const TOP_TICKERS: &[&str] = &[
    "MTNN", "AIRTELAFRI", "BUACEMENT", "DANGCEM", "SEPLAT", "GTCO", "ZENITHBANK",
    "BUAFOODS", "NESTLE", "ARADEL", "FBNH", "UBA", "ACCESSCORP", "STANBIC",
    "TRANSCORP", "GEREGU", "NB", "WAPCO", "OANDO", "FIDELITYBK", "DANGSUGAR",
    "ETI", "FCMB", "PRESCO", "OKOMUOIL", "UNILEVER", "GUINNESS", "FLOURMILL",
    "TOTAL", "JBERGER",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerMatch {
    pub ticker: String,
    pub name: String,
}

impl TickerMatch {
    fn from_entry((ticker, name): &(&str, &str)) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
        }
    }
}

/// Display name for a ticker, if it is a known listing
pub fn company_name(ticker: &str) -> Option<&'static str> {
    NGX_TICKERS
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(ticker))
        .map(|(_, name)| *name)
}

/// Case-insensitive substring search over tickers and names.
/// Ticker-prefix matches are listed first.
pub fn search(query: &str) -> Vec<TickerMatch> {
    let needle = query.trim().to_uppercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(bool, TickerMatch)> = NGX_TICKERS
        .iter()
        .filter(|(ticker, name)| ticker.contains(&needle) || name.to_uppercase().contains(&needle))
        .map(|entry| (entry.0.starts_with(&needle), TickerMatch::from_entry(entry)))
        .collect();

    // stable sort keeps alphabetical order within each group
    matches.sort_by_key(|(prefix, _)| !*prefix);

    matches
        .into_iter()
        .take(SEARCH_LIMIT)
        .map(|(_, m)| m)
        .collect()
}

pub fn top_tickers() -> Vec<TickerMatch> {
    TOP_TICKERS
        .iter()
        .map(|&ticker| TickerMatch {
            ticker: ticker.to_string(),
            name: company_name(ticker).unwrap_or(ticker).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_name_lookup() {
        assert_eq!(company_name("DANGCEM"), Some("Dangote Cement Plc"));
        assert_eq!(company_name("mtnn"), Some("MTN Nigeria Communications Plc"));
        assert_eq!(company_name("NOPE"), None);
    }

    #[test]
    fn test_search_matches_ticker_and_name() {
        let results = search("bank");
        let tickers: Vec<_> = results.iter().map(|m| m.ticker.as_str()).collect();
        assert!(tickers.contains(&"ZENITHBANK"));
        assert!(tickers.contains(&"UBA"));
    }

    #[test]
    fn test_search_prefers_ticker_prefix() {
        let results = search("dang");
        assert_eq!(results[0].ticker, "DANGCEM");
        assert_eq!(results[1].ticker, "DANGSUGAR");
    }

    #[test]
    fn test_search_empty_query_and_limit() {
        assert!(search("   ").is_empty());
        assert!(search("PLC").len() <= SEARCH_LIMIT);
    }

    #[test]
    fn test_top_tickers_are_known() {
        let top = top_tickers();
        assert_eq!(top.len(), 30);
        assert!(top.iter().all(|m| company_name(&m.ticker).is_some()));
    }
}
