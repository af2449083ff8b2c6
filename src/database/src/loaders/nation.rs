use core::{Confederation, Culture};
use serde::Deserialize;

const STATIC_NATIONS_JSON: &str = include_str!("../data/nations.json");

#[derive(Deserialize)]
pub struct NationEntity {
    pub code: String,
    pub name: String,
    pub confederation: Confederation,
    pub rating: u8,
    pub culture: Culture,
}

pub struct NationLoader;

impl NationLoader {
    pub fn load() -> Vec<NationEntity> {
        serde_json::from_str(STATIC_NATIONS_JSON).unwrap()
    }
}
