pub mod loaders;

use crate::loaders::{NamesLoader, NationLoader};
use core::{NameDirectory, Nation};
use log::debug;

/// Everything the simulation needs from static data: the nation pool and
/// the per-culture name material.
pub struct TournamentDatabase {
    pub nations: Vec<Nation>,
    pub names: NameDirectory,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> TournamentDatabase {
        let nations = NationLoader::load()
            .into_iter()
            .map(|entity| {
                Nation::new(
                    &entity.code,
                    &entity.name,
                    entity.confederation,
                    entity.rating,
                    entity.culture,
                )
            })
            .collect();

        let names = NameDirectory::new(NamesLoader::load().pools);

        let database = TournamentDatabase { nations, names };
        debug!("loaded {} nations", database.nations.len());

        database
    }
}
