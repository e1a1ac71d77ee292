use regex::Regex;
use std::sync::LazyLock;

use super::types::{Data, Value};

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:[.,]\d+)?)(?:\s+(\d+)/(\d+)|/(\d+))?\s*(.*?)\s*$")
        .expect("quantity regex is valid")
});

/// An amount with an optional unit, parsed from text such as `"1 1/2 cups"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Option<String>,
}

impl Quantity {
    /// Parses `100g`, `2,5 kg`, `1/2 tsp` and mixed numbers like `1 1/2 cups`.
    pub fn parse(text: &str) -> Option<Quantity> {
        let caps = QUANTITY.captures(text)?;
        let whole: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;

        let amount = match (caps.get(2), caps.get(3), caps.get(4)) {
            // mixed number: "1 1/2"
            (Some(num), Some(den), _) => whole + fraction(num.as_str(), den.as_str())?,
            // plain fraction: "1/2"
            (None, None, Some(den)) => fraction(&whole.to_string(), den.as_str())?,
            _ => whole,
        };

        let unit = caps
            .get(5)
            .map(|m| m.as_str().to_lowercase())
            .filter(|u| !u.is_empty());

        Some(Quantity { amount, unit })
    }

    pub fn into_data(self) -> Data {
        let mut data = Data::new();
        data.insert("amount".to_string(), Value::Number(self.amount));
        if let Some(unit) = self.unit {
            data.insert("unit".to_string(), Value::Text(unit));
        }
        data
    }
}

fn fraction(num: &str, den: &str) -> Option<f64> {
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}
