//! Recovery of the `financialData` block that stockanalysis.com embeds in its
//! SvelteKit page payload.
//!
//! The block is a JavaScript object literal rather than JSON: keys are bare
//! identifiers and decimals may start with a dot (`.28`). Extraction is layered:
//!
//! 1. the nested object-literal pattern, repaired and parsed as JSON
//! 2. a looser key-plus-brace-block pattern, repaired and parsed the same way
//! 3. an itemized scan for each known field's array
//!
//! Every strategy is total. Failures are logged and hand over to the next one.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

/// Key that introduces the embedded block
const DATA_KEY: &str = "financialData";

/// Fields searched individually by the itemized fallback
pub const KNOWN_FIELDS: [&str; 10] = [
    "datekey",
    "fiscalYear",
    "revenue",
    "netinc",
    "epsBasic",
    "dps",
    "payoutratio",
    "debt",
    "equity",
    "ncfo",
];

static PRIMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"financialData:\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}").expect("primary pattern is valid")
});

static LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""?financialData"?\s*:\s*(\{[^<]+?\})\s*[,}]"#).expect("loose pattern is valid")
});

static BARE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,])\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:").expect("bare key pattern is valid")
});

static LEADING_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([:,\[])\s*(-?)\.(\d)").expect("leading dot pattern is valid")
});

static VOID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([:,\[])\s*(?:void 0|undefined)\b").expect("void pattern is valid")
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0} block not found")]
    PatternNotFound(&'static str),

    #[error("malformed object literal: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("object literal holds no value arrays")]
    NoArrays,
}

/// Field name → per-period values, in the order the source lists them.
///
/// Values stay as loosely typed JSON scalars: numbers, strings for date-like
/// entries, and `null` for gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialDataset {
    fields: HashMap<String, Vec<Value>>,
}

impl FinancialDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, values: Vec<Value>) {
        self.fields.insert(field.into(), values);
    }

    pub fn get(&self, field: &str) -> Option<&[Value]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Value at `index` of `field`, if both exist.
    pub fn value_at(&self, field: &str, index: usize) -> Option<&Value> {
        self.get(field).and_then(|values| values.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn from_object(object: Map<String, Value>) -> Self {
        let fields = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Array(values) => Some((key, values)),
                _ => None,
            })
            .collect();
        Self { fields }
    }
}

/// Extract the embedded financial dataset from raw page markup.
pub fn extract(html: &str) -> Option<FinancialDataset> {
    match extract_primary(html) {
        Ok(dataset) => return Some(dataset),
        Err(e) => debug!("Primary financialData extraction failed: {}", e),
    }

    match extract_loose(html) {
        Ok(dataset) => return Some(dataset),
        Err(e) => debug!("Loose financialData extraction failed: {}", e),
    }

    let dataset = extract_itemized(html);
    match &dataset {
        Some(d) => debug!("Itemized scan recovered {} fields", d.len()),
        None => debug!("Itemized scan found no known fields"),
    }
    dataset
}

/// Nested object-literal pattern (one level of inner braces).
pub fn extract_primary(html: &str) -> Result<FinancialDataset, ExtractError> {
    let caps = PRIMARY_RE
        .captures(html)
        .ok_or(ExtractError::PatternNotFound(DATA_KEY))?;
    parse_object_literal(&format!("{{{}}}", &caps[1]))
}

/// Key (quoted or bare) followed directly by a lazily matched brace block.
pub fn extract_loose(html: &str) -> Result<FinancialDataset, ExtractError> {
    let caps = LOOSE_RE
        .captures(html)
        .ok_or(ExtractError::PatternNotFound(DATA_KEY))?;
    parse_object_literal(&caps[1])
}

/// Scan each known field's array independently. Returns whatever was found,
/// or `None` when no field matched at all.
pub fn extract_itemized(html: &str) -> Option<FinancialDataset> {
    let mut dataset = FinancialDataset::new();

    for field in KNOWN_FIELDS {
        let pattern = format!(
            r#""{field}"\s*:\s*\[([^\]]*)\]|\b{field}\s*:\s*\[([^\]]*)\]"#
        );
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let Some(caps) = re.captures(html) else {
            continue;
        };
        let raw = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        dataset.insert(field, parse_array_items(raw));
    }

    if dataset.is_empty() {
        None
    } else {
        Some(dataset)
    }
}

fn parse_object_literal(literal: &str) -> Result<FinancialDataset, ExtractError> {
    let repaired = repair_object_literal(literal);
    let value: Value = serde_json::from_str(&repaired)?;

    let dataset = match value {
        Value::Object(object) => FinancialDataset::from_object(object),
        _ => FinancialDataset::new(),
    };

    if dataset.is_empty() {
        return Err(ExtractError::NoArrays);
    }
    Ok(dataset)
}

/// Apply every literal repair needed before JSON parsing.
pub fn repair_object_literal(literal: &str) -> String {
    let quoted = quote_bare_keys(literal);
    let decimals = normalize_leading_dot_decimals(&quoted);
    normalize_void_literals(&decimals)
}

/// `{revenue:[1]}` → `{"revenue":[1]}`
pub fn quote_bare_keys(literal: &str) -> String {
    BARE_KEY_RE
        .replace_all(literal, |caps: &Captures| format!("{}\"{}\":", &caps[1], &caps[2]))
        .into_owned()
}

/// `.28` → `0.28` and `-.28` → `-0.28` when the literal starts a value.
pub fn normalize_leading_dot_decimals(literal: &str) -> String {
    LEADING_DOT_RE
        .replace_all(literal, "${1}${2}0.${3}")
        .into_owned()
}

/// SvelteKit serializes missing values as `void 0`.
fn normalize_void_literals(literal: &str) -> String {
    VOID_RE.replace_all(literal, "${1}null").into_owned()
}

/// Parse the comma-separated body of a bracketed array, one entry at a time.
fn parse_array_items(raw: &str) -> Vec<Value> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(parse_scalar).collect()
}

fn parse_scalar(item: &str) -> Value {
    let item = item.trim().trim_matches('"');

    if item.is_empty() || item == "null" {
        return Value::Null;
    }

    let numeric = if let Some(rest) = item.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = item.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        item.to_string()
    };

    if let Ok(int) = numeric.parse::<i64>() {
        return Value::Number(int.into());
    }
    match numeric.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(item.to_string()),
    }
}
