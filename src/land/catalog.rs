//! The curated land pool. Entries are grouped by archetype; `all_lands`
//! assembles the candidate set a solve uses when the caller doesn't supply
//! one.

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;

use crate::card::types::Color::{self, Black as B, Blue as U, Colorless as C, Green as G, Red as R, White as W};
use crate::land::types::{Land, LandKind};

const fn basic(name: &'static str, typeline: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline, produces, painful: false, kind: LandKind::Basic }
}

const fn check(name: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline: "Land", produces, painful: false, kind: LandKind::Check }
}

const fn snarl(name: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline: "Land", produces, painful: false, kind: LandKind::Snarl }
}

const fn filter(name: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline: "Land", produces, painful: false, kind: LandKind::Filter }
}

const fn bicycle(name: &'static str, typeline: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline, produces, painful: false, kind: LandKind::Bicycle }
}

const fn tapland(name: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline: "Land", produces, painful: false, kind: LandKind::Tapland }
}

const fn pain(name: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline: "Land", produces, painful: true, kind: LandKind::Pain }
}

const fn tango(name: &'static str, typeline: &'static str, produces: &'static [Color]) -> Land {
    Land { name, typeline, produces, painful: false, kind: LandKind::Tango }
}

pub const WASTES: Land = basic("Wastes", "Basic Land", &[C]);
pub const PLAINS: Land = basic("Plains", "Basic Land - Plains", &[W]);
pub const ISLAND: Land = basic("Island", "Basic Land - Island", &[U]);
pub const SWAMP: Land = basic("Swamp", "Basic Land - Swamp", &[B]);
pub const MOUNTAIN: Land = basic("Mountain", "Basic Land - Mountain", &[R]);
pub const FOREST: Land = basic("Forest", "Basic Land - Forest", &[G]);

pub const BASICS: &[Land] = &[WASTES, PLAINS, ISLAND, SWAMP, MOUNTAIN, FOREST];

pub const CLIFFTOP_RETREAT: Land = check("Clifftop Retreat", &[R, W]);
pub const DRAGONSKULL_SUMMIT: Land = check("Dragonskull Summit", &[B, R]);
pub const DROWNED_CATACOMB: Land = check("Drowned Catacomb", &[U, B]);
pub const GLACIAL_FORTRESS: Land = check("Glacial Fortress", &[W, U]);
pub const HINTERLAND_HARBOR: Land = check("Hinterland Harbor", &[G, U]);
pub const ISOLATED_CHAPEL: Land = check("Isolated Chapel", &[W, B]);
pub const ROOTBOUND_CRAG: Land = check("Rootbound Crag", &[R, G]);
pub const SULFUR_FALLS: Land = check("Sulfur Falls", &[U, R]);
pub const SUNPETAL_GROVE: Land = check("Sunpetal Grove", &[G, W]);
pub const WOODLAND_CEMETERY: Land = check("Woodland Cemetery", &[B, G]);

pub const CHECKS: &[Land] = &[
    CLIFFTOP_RETREAT,
    DRAGONSKULL_SUMMIT,
    DROWNED_CATACOMB,
    GLACIAL_FORTRESS,
    HINTERLAND_HARBOR,
    ISOLATED_CHAPEL,
    ROOTBOUND_CRAG,
    SULFUR_FALLS,
    SUNPETAL_GROVE,
    WOODLAND_CEMETERY,
];

pub const CHOKED_ESTUARY: Land = snarl("Choked Estuary", &[U, B]);
pub const FOREBODING_RUINS: Land = snarl("Foreboding Ruins", &[B, R]);
pub const FORTIFIED_VILLAGE: Land = snarl("Fortified Village", &[G, W]);
pub const FROSTBOIL_SNARL: Land = snarl("Frostboil Snarl", &[U, R]);
pub const GAME_TRAIL: Land = snarl("Game Trail", &[R, G]);
pub const PORT_TOWN: Land = snarl("Port Town", &[W, U]);
pub const VINEGLIMMER_SNARL: Land = snarl("Vineglimmer Snarl", &[G, U]);

// Furycalm, Necroblossom and Shineshadow are not legal in the pool
pub const SNARLS: &[Land] = &[
    CHOKED_ESTUARY,
    FOREBODING_RUINS,
    FORTIFIED_VILLAGE,
    FROSTBOIL_SNARL,
    GAME_TRAIL,
    PORT_TOWN,
    VINEGLIMMER_SNARL,
];

pub const CASCADE_BLUFFS: Land = filter("Cascade Bluffs", &[U, R]);
pub const FETID_HEATH: Land = filter("Fetid Heath", &[W, B]);
pub const FIRE_LIT_THICKET: Land = filter("Fire-Lit Thicket", &[R, G]);
pub const FLOODED_GROVE: Land = filter("Flooded Grove", &[G, U]);
pub const GRAVEN_CAIRNS: Land = filter("Graven Cairns", &[B, R]);
pub const MYSTIC_GATE: Land = filter("Mystic Gate", &[W, U]);
pub const SUNKEN_RUINS: Land = filter("Sunken Ruins", &[U, B]);
pub const WOODED_BASTION: Land = filter("Wooded Bastion", &[W, G]);

pub const FILTERS: &[Land] = &[
    CASCADE_BLUFFS,
    FETID_HEATH,
    FIRE_LIT_THICKET,
    FLOODED_GROVE,
    GRAVEN_CAIRNS,
    MYSTIC_GATE,
    SUNKEN_RUINS,
    WOODED_BASTION,
];

pub const CANYON_SLOUGH: Land = bicycle("Canyon Slough", "Land - Swamp Mountain", &[B, R]);
pub const FETID_POOLS: Land = bicycle("Fetid Pools", "Land - Island Swamp", &[U, B]);
pub const IRRIGATED_FARMLAND: Land = bicycle("Irrigated Farmland", "Land - Plains Island", &[W, U]);
pub const SCATTERED_GROVES: Land = bicycle("Scattered Groves", "Land - Forest Plains", &[G, W]);
pub const SHELTERED_THICKET: Land = bicycle("Sheltered Thicket", "Land - Mountain Forest", &[R, G]);

pub const BICYCLES: &[Land] = &[
    CANYON_SLOUGH,
    FETID_POOLS,
    IRRIGATED_FARMLAND,
    SCATTERED_GROVES,
    SHELTERED_THICKET,
];

pub const CELESTIAL_COLONNADE: Land = tapland("Celestial Colonnade", &[W, U]);
pub const HISSING_QUAGMIRE: Land = tapland("Hissing Quagmire", &[B, G]);
pub const LAVACLAW_REACHES: Land = tapland("Lavaclaw Reaches", &[B, R]);
pub const LUMBERING_FALLS: Land = tapland("Lumbering Falls", &[G, U]);
pub const NEEDLE_SPIRES: Land = tapland("Needle Spires", &[R, W]);
pub const RAGING_RAVINE: Land = tapland("Raging Ravine", &[R, G]);
pub const SHAMBLING_VENT: Land = tapland("Shambling Vent", &[W, B]);
pub const STIRRING_WILDWOOD: Land = tapland("Stirring Wildwood", &[G, W]);
pub const WANDERING_FUMAROLE: Land = tapland("Wandering Fumarole", &[U, R]);

// Creeping Tar Pit is not legal in the pool
pub const CREATURE_LANDS: &[Land] = &[
    CELESTIAL_COLONNADE,
    HISSING_QUAGMIRE,
    LAVACLAW_REACHES,
    LUMBERING_FALLS,
    NEEDLE_SPIRES,
    RAGING_RAVINE,
    SHAMBLING_VENT,
    STIRRING_WILDWOOD,
    WANDERING_FUMAROLE,
];

pub const RESTLESS_ANCHORAGE: Land = tapland("Restless Anchorage", &[W, U]);
pub const RESTLESS_BIVOUAC: Land = tapland("Restless Bivouac", &[R, W]);
pub const RESTLESS_COTTAGE: Land = tapland("Restless Cottage", &[B, G]);
pub const RESTLESS_FORTRESS: Land = tapland("Restless Fortress", &[W, B]);
pub const RESTLESS_PRAIRIE: Land = tapland("Restless Prairie", &[G, W]);
pub const RESTLESS_REEF: Land = tapland("Restless Reef", &[U, B]);
pub const RESTLESS_RIDGELINE: Land = tapland("Restless Ridgeline", &[R, G]);
pub const RESTLESS_SPIRE: Land = tapland("Restless Spire", &[U, R]);
pub const RESTLESS_VENTS: Land = tapland("Restless Vents", &[B, R]);
pub const RESTLESS_VINESTALK: Land = tapland("Restless Vinestalk", &[G, U]);

pub const RESTLESS_LANDS: &[Land] = &[
    RESTLESS_ANCHORAGE,
    RESTLESS_BIVOUAC,
    RESTLESS_COTTAGE,
    RESTLESS_FORTRESS,
    RESTLESS_PRAIRIE,
    RESTLESS_REEF,
    RESTLESS_RIDGELINE,
    RESTLESS_SPIRE,
    RESTLESS_VENTS,
    RESTLESS_VINESTALK,
];

pub const BATTLEFIELD_FORGE: Land = pain("Battlefield Forge", &[R, W]);
pub const BRUSHLAND: Land = pain("Brushland", &[G, W]);
pub const CAVES_OF_KOILOS: Land = pain("Caves of Koilos", &[W, B]);
pub const KARPLUSAN_FOREST: Land = pain("Karplusan Forest", &[R, G]);
pub const LLANOWAR_WASTES: Land = pain("Llanowar Wastes", &[B, G]);
pub const SHIVAN_REEF: Land = pain("Shivan Reef", &[U, R]);
pub const SULFUROUS_SPRINGS: Land = pain("Sulfurous Springs", &[B, R]);
pub const YAVIMAYA_COAST: Land = pain("Yavimaya Coast", &[G, U]);

// Adarkar Wastes and Underground River are not legal in the pool
pub const PAINLANDS: &[Land] = &[
    BATTLEFIELD_FORGE,
    BRUSHLAND,
    CAVES_OF_KOILOS,
    KARPLUSAN_FOREST,
    LLANOWAR_WASTES,
    SHIVAN_REEF,
    SULFUROUS_SPRINGS,
    YAVIMAYA_COAST,
];

pub const PRAIRIE_STREAM: Land = tango("Prairie Stream", "Land - Plains Island", &[W, U]);
pub const CANOPY_VISTA: Land = tango("Canopy Vista", "Land - Forest Plains", &[G, W]);

pub const TANGOS: &[Land] = &[PRAIRIE_STREAM, CANOPY_VISTA];

pub const GRAND_COLISEUM: Land = Land {
    name: "Grand Coliseum",
    typeline: "Land",
    produces: &[W, U, B, R, G],
    painful: true,
    kind: LandKind::Tapland,
};
pub const VIVID_CRAG: Land = Land {
    name: "Vivid Crag",
    typeline: "Land",
    produces: &[W, U, B, R, G],
    painful: false,
    kind: LandKind::Tapland,
};

pub const FIVE_COLOR_LANDS: &[Land] = &[GRAND_COLISEUM, VIVID_CRAG];

pub const CRUMBLING_NECROPOLIS: Land = tapland("Crumbling Necropolis", &[U, B, R]);
pub const RIVER_OF_TEARS: Land = Land {
    name: "River of Tears",
    typeline: "Land",
    produces: &[U, B],
    painful: false,
    kind: LandKind::RiverOfTears,
};

pub const SPECIAL_LANDS: &[Land] = &[CRUMBLING_NECROPOLIS, RIVER_OF_TEARS];

lazy_static! {
    static ref CATALOG: Vec<Land> = BASICS
        .iter()
        .chain(CHECKS)
        .chain(SNARLS)
        .chain(FILTERS)
        .chain(BICYCLES)
        .chain(CREATURE_LANDS)
        .chain(RESTLESS_LANDS)
        .chain(PAINLANDS)
        .chain(TANGOS)
        .chain(FIVE_COLOR_LANDS)
        .chain(SPECIAL_LANDS)
        .copied()
        .collect();
    pub static ref LANDS_BY_NAME: HashMap<&'static str, &'static Land> =
        CATALOG.iter().map(|land| (land.name, land)).collect();
}

/// Every land in the catalog, as the default candidate set for a solve
pub fn all_lands() -> BTreeSet<&'static Land> {
    CATALOG.iter().collect()
}
