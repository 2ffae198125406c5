//! Sorting - directions, descriptors, comparator selection and the sort
//! engine
//!
//! Everything here is pure: sorting always produces a new vector and never
//! touches the caller's items.

use super::column::ColumnDescriptor;
use super::item::Item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator glyph
    pub fn symbol(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// The active column and direction. No column means no sorting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortDescriptor {
    pub column: Option<ColumnDescriptor>,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(column: ColumnDescriptor, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.column.as_ref().map(|c| c.field.as_str())
    }

    /// Whether `field` is the active sort column
    pub fn is_active(&self, field: &str) -> bool {
        self.field() == Some(field)
    }

    /// Direction to apply when the header of `field` is clicked: the
    /// active column toggles, any other column starts ascending.
    pub fn next_direction(&self, field: &str) -> SortDirection {
        if self.is_active(field) {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        }
    }
}

type CompareFn = dyn Fn(&Item, &Item, &ColumnDescriptor) -> Ordering;

/// Orders two items for a column
#[derive(Clone)]
pub enum Comparator {
    /// Numeric comparison of the coerced field values
    Numbers,
    /// Case-insensitive comparison of the field text
    Strings,
    /// Caller-supplied ordering
    Custom(Rc<CompareFn>),
}

impl Comparator {
    pub fn custom(f: impl Fn(&Item, &Item, &ColumnDescriptor) -> Ordering + 'static) -> Self {
        Comparator::Custom(Rc::new(f))
    }

    pub fn compare(&self, a: &Item, b: &Item, column: &ColumnDescriptor) -> Ordering {
        match self {
            Comparator::Numbers => compare_numbers(a, b, column),
            Comparator::Strings => compare_strings(a, b, column),
            Comparator::Custom(f) => f(a, b, column),
        }
    }
}

impl PartialEq for Comparator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparator::Numbers, Comparator::Numbers) => true,
            (Comparator::Strings, Comparator::Strings) => true,
            (Comparator::Custom(a), Comparator::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Numbers => f.write_str("Numbers"),
            Comparator::Strings => f.write_str("Strings"),
            Comparator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn number_of(item: &Item, column: &ColumnDescriptor) -> f64 {
    column
        .value(item)
        .map(|v| v.as_number())
        .unwrap_or(f64::NAN)
}

fn text_of(item: &Item, column: &ColumnDescriptor) -> String {
    column
        .value(item)
        .map(|v| v.to_string().to_lowercase())
        .unwrap_or_default()
}

/// Numeric ordering; values that are not numbers sort after all numbers
pub fn compare_numbers(a: &Item, b: &Item, column: &ColumnDescriptor) -> Ordering {
    let (x, y) = (number_of(a, column), number_of(b, column));
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Case-insensitive lexicographic ordering of the field text
pub fn compare_strings(a: &Item, b: &Item, column: &ColumnDescriptor) -> Ordering {
    text_of(a, column).cmp(&text_of(b, column))
}

/// Pick the comparator for `column`
///
/// A column comparator always wins. Otherwise the first item's value
/// decides: numbers compare numerically, everything else as text.
/// `items` must not be empty.
pub fn select_comparator(items: &[Item], column: &ColumnDescriptor) -> Comparator {
    if let Some(comparator) = &column.comparator {
        return comparator.clone();
    }

    let sample = items.first().and_then(|item| column.value(item));
    match sample {
        Some(value) if value.is_number() => Comparator::Numbers,
        _ => Comparator::Strings,
    }
}

/// Sort `items` by the descriptor into a new vector
///
/// Without a sort column, or with no items, the result is a copy of the
/// input. Equal items keep their input order in both directions.
pub fn sort_items(items: &[Item], sort: &SortDescriptor) -> Vec<Item> {
    let mut sorted = items.to_vec();

    let Some(column) = sort.column.as_ref() else {
        return sorted;
    };
    if sorted.is_empty() {
        return sorted;
    }

    let comparator = select_comparator(&sorted, column);
    match sort.direction {
        SortDirection::Ascending => {
            sorted.sort_by(|a, b| comparator.compare(a, b, column));
        }
        SortDirection::Descending => {
            sorted.sort_by(|a, b| comparator.compare(b, a, column));
        }
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::ColumnConfig;
    use crate::model::item::Value;

    fn column(field: &str) -> ColumnDescriptor {
        ColumnDescriptor::plain(&ColumnConfig::new(field).sortable())
    }

    fn people() -> Vec<Item> {
        vec![
            Item::new().with("name", "Bob").with("age", 30),
            Item::new().with("name", "Amy").with("age", 25),
        ]
    }

    fn names(items: &[Item]) -> Vec<String> {
        items
            .iter()
            .map(|i| i.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_by_age_example() {
        let items = people();
        let asc = sort_items(&items, &SortDescriptor::new(column("age"), SortDirection::Ascending));
        assert_eq!(names(&asc), vec!["Amy", "Bob"]);

        let desc = sort_items(&items, &SortDescriptor::new(column("age"), SortDirection::Descending));
        assert_eq!(names(&desc), vec!["Bob", "Amy"]);

        // Input untouched
        assert_eq!(names(&items), vec!["Bob", "Amy"]);
    }

    #[test]
    fn test_numbers_compare_numerically_not_lexically() {
        let items = vec![
            Item::new().with("n", 10),
            Item::new().with("n", 9),
            Item::new().with("n", 100),
        ];
        let sorted = sort_items(&items, &SortDescriptor::new(column("n"), SortDirection::Ascending));
        let values: Vec<String> = sorted.iter().map(|i| i.get("n").unwrap().to_string()).collect();
        assert_eq!(values, vec!["9", "10", "100"]);
    }

    #[test]
    fn test_strings_compare_case_insensitively() {
        let items = vec![
            Item::new().with("name", "bob"),
            Item::new().with("name", "Carl"),
            Item::new().with("name", "amy"),
        ];
        let sorted = sort_items(&items, &SortDescriptor::new(column("name"), SortDirection::Ascending));
        assert_eq!(names(&sorted), vec!["amy", "bob", "Carl"]);
    }

    #[test]
    fn test_no_op_cases() {
        let empty: Vec<Item> = Vec::new();
        assert!(sort_items(&empty, &SortDescriptor::new(column("age"), SortDirection::Descending)).is_empty());

        let items = people();
        let unsorted = sort_items(&items, &SortDescriptor::none());
        assert_eq!(unsorted, items);

        let unsorted_desc = sort_items(
            &items,
            &SortDescriptor {
                column: None,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(unsorted_desc, items);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let items = vec![
            Item::new().with("name", "c").with("age", 3),
            Item::new().with("name", "a").with("age", 1),
            Item::new().with("name", "b").with("age", 2),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sort = SortDescriptor::new(column("name"), direction);
            let once = sort_items(&items, &sort);
            let twice = sort_items(&once, &sort);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_stability_in_both_directions() {
        let items = vec![
            Item::new().with("id", "first").with("group", 1),
            Item::new().with("id", "x").with("group", 0),
            Item::new().with("id", "second").with("group", 1),
            Item::new().with("id", "third").with("group", 1),
        ];
        let ids = |sorted: &[Item]| -> Vec<String> {
            sorted
                .iter()
                .filter(|i| i.get("group") == Some(&Value::Number(1.0)))
                .map(|i| i.get("id").unwrap().to_string())
                .collect()
        };

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_items(&items, &SortDescriptor::new(column("group"), direction));
            assert_eq!(ids(&sorted), vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_direction_symmetry_without_ties() {
        let items = vec![
            Item::new().with("v", 4),
            Item::new().with("v", 1),
            Item::new().with("v", 3),
            Item::new().with("v", 2),
        ];
        let asc = sort_items(&items, &SortDescriptor::new(column("v"), SortDirection::Ascending));
        let mut reversed = asc.clone();
        reversed.reverse();
        let desc = sort_items(&items, &SortDescriptor::new(column("v"), SortDirection::Descending));
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_select_comparator_prefers_custom() {
        let mut col = column("age");
        let custom = Comparator::custom(|_, _, _| Ordering::Equal);
        col.comparator = Some(custom.clone());
        assert_eq!(select_comparator(&people(), &col), custom);
    }

    #[test]
    fn test_select_comparator_samples_first_item() {
        assert_eq!(select_comparator(&people(), &column("age")), Comparator::Numbers);
        assert_eq!(select_comparator(&people(), &column("name")), Comparator::Strings);
        // Missing sample value falls back to text
        assert_eq!(select_comparator(&people(), &column("missing")), Comparator::Strings);
    }

    #[test]
    fn test_custom_comparator_drives_order() {
        let mut col = column("name");
        // Order by name length
        col.comparator = Some(Comparator::custom(|a, b, c| {
            let len = |i: &Item| c.value(i).map(|v| v.to_string().len()).unwrap_or(0);
            len(a).cmp(&len(b))
        }));
        let items = vec![
            Item::new().with("name", "Alexandra"),
            Item::new().with("name", "Jo"),
            Item::new().with("name", "Sam"),
        ];
        let sorted = sort_items(&items, &SortDescriptor::new(col, SortDirection::Ascending));
        assert_eq!(names(&sorted), vec!["Jo", "Sam", "Alexandra"]);
    }

    #[test]
    fn test_non_numeric_values_sort_last_under_numeric_comparator() {
        let items = vec![
            Item::new().with("v", 2),
            Item::new().with("v", "n/a"),
            Item::new().with("v", 1),
            Item::new(),
        ];
        let sorted = sort_items(&items, &SortDescriptor::new(column("v"), SortDirection::Ascending));
        let values: Vec<String> = sorted
            .iter()
            .map(|i| i.get("v").map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
            .collect();
        assert_eq!(values, vec!["1", "2", "n/a", "-"]);
    }

    #[test]
    fn test_next_direction() {
        let sort = SortDescriptor::new(column("name"), SortDirection::Ascending);
        assert_eq!(sort.next_direction("name"), SortDirection::Descending);
        assert_eq!(sort.next_direction("age"), SortDirection::Ascending);

        let desc = SortDescriptor::new(column("name"), SortDirection::Descending);
        assert_eq!(desc.next_direction("name"), SortDirection::Ascending);
        assert_eq!(desc.next_direction("age"), SortDirection::Ascending);
        assert_eq!(SortDescriptor::none().next_direction("age"), SortDirection::Ascending);
    }

    #[test]
    fn test_direction_serde_names() {
        assert_eq!(serde_json::to_string(&SortDirection::Descending).unwrap(), "\"desc\"");
        let parsed: SortDirection = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(parsed, SortDirection::Ascending);
    }
}
