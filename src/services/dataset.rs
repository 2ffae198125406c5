//! Dataset loading for the browser
//!
//! Reads a JSON array of objects, a YAML sequence of mappings or a CSV file
//! with a header row into table items.

use crate::error::DatasetError;
use crate::model::{ColumnConfig, Item, Value};
use std::fs;
use std::path::Path;

/// Items plus the field names seen in them, in first-seen order.
/// Within a record fields keep their order in the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub fields: Vec<String>,
    pub items: Vec<Item>,
}

impl Dataset {
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut fields: Vec<String> = Vec::new();
        for item in &items {
            for field in item.fields() {
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
        }
        Self { fields, items }
    }

    /// One sortable column per field, used when no columns are configured
    pub fn default_columns(&self) -> Vec<ColumnConfig> {
        self.fields
            .iter()
            .map(|field| ColumnConfig::new(field.clone()).sortable())
            .collect()
    }
}

/// Load the dataset at `path`, picking the parser from the extension
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path)?;
    let dataset = match extension.as_str() {
        "json" => parse_json(&contents)?,
        "yaml" | "yml" => parse_yaml(&contents)?,
        "csv" => parse_csv(&contents)?,
        _ => return Err(DatasetError::UnsupportedFormat(extension)),
    };

    tracing::info!(
        path = %path.display(),
        items = dataset.items.len(),
        fields = dataset.fields.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn records_to_dataset(records: Vec<serde_json::Value>) -> Result<Dataset, DatasetError> {
    let items = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(field, value)| (field, Value::from(value)))
                .collect::<Item>()),
            _ => Err(DatasetError::NotAnObject { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::from_items(items))
}

/// Parse a JSON array of objects
pub fn parse_json(contents: &str) -> Result<Dataset, DatasetError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(contents)?;
    records_to_dataset(records)
}

/// Parse a YAML sequence of mappings
pub fn parse_yaml(contents: &str) -> Result<Dataset, DatasetError> {
    let records: Vec<serde_json::Value> = serde_yaml::from_str(contents)?;
    records_to_dataset(records)
}

/// Parse CSV with a header row; numeric and boolean cells are promoted
pub fn parse_csv(contents: &str) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        let item = headers
            .iter()
            .zip(record.iter())
            .map(|(field, raw)| (field.clone(), Value::from_text(raw)))
            .collect::<Item>();
        items.push(item);
    }

    Ok(Dataset {
        fields: headers,
        items,
    })
}

/// Small built-in dataset shown when nothing else is available
pub fn sample() -> Dataset {
    let people = [
        ("Ada Lovelace", "Mathematician", 36, "London"),
        ("Grace Hopper", "Computer scientist", 85, "New York"),
        ("Alan Turing", "Mathematician", 41, "London"),
        ("Katherine Johnson", "Mathematician", 101, "White Sulphur Springs"),
        ("Edsger Dijkstra", "Computer scientist", 72, "Rotterdam"),
        ("Barbara Liskov", "Computer scientist", 86, "Los Angeles"),
    ];
    let items: Vec<Item> = people
        .iter()
        .map(|(name, role, age, city)| {
            Item::new()
                .with("name", *name)
                .with("role", *role)
                .with("age", *age)
                .with("city", *city)
        })
        .collect();
    Dataset::from_items(items)
}
