//! Aggregated shopping list built from the recipes in a user's cart.

use std::collections::BTreeMap;
use std::fmt;

/// Header line that starts every rendered shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";

/// One ingredient total: every recipe-ingredient row sharing this
/// `(name, measurement_unit)` pair, summed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl ShoppingListLine {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

impl fmt::Display for ShoppingListLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.name, self.measurement_unit, self.amount
        )
    }
}

/// Deduplicated ingredient totals, ordered by name then unit.
///
/// Lines are keyed by `(name, measurement_unit)` rather than ingredient id, so
/// two catalog records that share a name and unit collapse into one line.
/// Ordering is byte-wise on the stored strings and never depends on the
/// database collation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    /// Group `lines` by `(name, measurement_unit)` and sum their amounts.
    ///
    /// Input may already be grouped (the usual case when the database did the
    /// summing); re-aggregating grouped input is a no-op apart from ordering.
    pub fn aggregate<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = ShoppingListLine>,
    {
        let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
        for line in lines {
            *totals
                .entry((line.name, line.measurement_unit))
                .or_default() += line.amount;
        }
        let lines = totals
            .into_iter()
            .map(|((name, measurement_unit), amount)| ShoppingListLine {
                name,
                measurement_unit,
                amount,
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[ShoppingListLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render as the plain-text report: header, then one line per ingredient,
    /// joined by `\n` with no trailing newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SHOPPING_LIST_HEADER)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}
