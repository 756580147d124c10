use super::schema::ElementTableFile;
use super::store::DataStore;
use std::collections::HashMap;

pub fn load_element_table() -> DataStore {
    let content = include_str!("../../data/elements.toml");
    let schema: ElementTableFile = toml::from_str(content)
        .unwrap_or_else(|e| panic!("Failed to parse element data file: {}", e));

    let mut elements_by_symbol = HashMap::new();
    for record in schema.element {
        let symbol = record.symbol.clone();
        if elements_by_symbol.insert(symbol.clone(), record).is_some() {
            panic!("Duplicate element symbol found: {}", symbol);
        }
    }

    DataStore { elements_by_symbol }
}
