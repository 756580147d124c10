use serde::Deserialize;
use smol_str::SmolStr;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ElementTableFile {
    pub element: Vec<ElementRecord>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ElementRecord {
    pub symbol: SmolStr,
    pub number: u8,
    pub mass: f64,
    #[serde(default)]
    pub covalent_radius: Option<f64>,
}
