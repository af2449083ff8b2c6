use core::{Culture, NamePool};
use serde::Deserialize;
use std::collections::HashMap;

const STATIC_NAMES_JSON: &str = include_str!("../data/people_names.json");

#[derive(Deserialize)]
pub struct NamesEntity {
    pub pools: HashMap<Culture, NamePool>,
}

pub struct NamesLoader;

impl NamesLoader {
    pub fn load() -> NamesEntity {
        serde_json::from_str(STATIC_NAMES_JSON).unwrap()
    }
}
