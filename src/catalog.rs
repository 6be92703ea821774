//! Landmark Catalog
//!
//! Static, read-only catalog of Buffalo landmark records and randomized
//! selection over it. Each record carries fixed anchor facts that prompt
//! construction embeds verbatim to suppress drift toward other cities.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// A single catalog entry. Immutable, defined at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "baseFacts")]
    pub base_facts: &'static str,
}

pub const LANDMARKS: [Landmark; 8] = [
    Landmark {
        id: "canalside",
        name: "Canalside (Buffalo Waterfront)",
        base_facts: "Buffalo, NY waterfront at Lake Erie/Buffalo River. Brick-and-steel Great \
                     Lakes industrial heritage, open promenades, public gathering spaces.",
    },
    Landmark {
        id: "cityhall",
        name: "Buffalo City Hall",
        base_facts: "Iconic Art Deco civic tower in downtown Buffalo. Limestone/stone facade, \
                     clock tower, grand civic plaza feel, Great Lakes city atmosphere.",
    },
    Landmark {
        id: "keybank",
        name: "KeyBank Center",
        base_facts: "Arena on Buffalo's waterfront near Canalside/Lake Erie. Sports energy, \
                     event plaza, modern arena form integrated with waterfront context.",
    },
    Landmark {
        id: "niagarasq",
        name: "Niagara Square",
        base_facts: "Major civic square in Buffalo with radial streets, monument centerpiece, \
                     classic downtown civic space.",
    },
    Landmark {
        id: "akg",
        name: "Buffalo AKG Art Museum",
        base_facts: "Major art museum campus in Buffalo with modern + historic architecture, \
                     cultural institution setting.",
    },
    Landmark {
        id: "delawarepark",
        name: "Delaware Park / Hoyt Lake",
        base_facts: "Large park landscape in Buffalo, tree-lined paths, lake setting, Olmsted \
                     park heritage, seasonal weather.",
    },
    Landmark {
        id: "peacebridge",
        name: "Peace Bridge",
        base_facts: "Buffalo-Fort Erie border bridge over the Niagara River, steel bridge \
                     infrastructure and river context.",
    },
    Landmark {
        id: "electric_tower",
        name: "Electric Tower",
        base_facts: "Historic downtown Buffalo building with distinctive illuminated tower \
                     character and early-20th-century architectural identity.",
    },
];

/// Select `n` distinct landmarks in random order.
///
/// Fisher-Yates shuffle of a catalog copy, then take the first `n` (clamped
/// to catalog size). A seed makes the permutation reproducible; without one
/// the thread RNG is used. Distinctness is guaranteed because the catalog
/// ids are unique and the shuffle never duplicates entries.
pub fn pick_random(n: usize, seed: Option<u64>) -> Vec<Landmark> {
    let mut pool: Vec<Landmark> = LANDMARKS.to_vec();
    match seed {
        Some(s) => pool.shuffle(&mut SmallRng::seed_from_u64(s)),
        None => pool.shuffle(&mut rand::thread_rng()),
    }
    pool.truncate(n.min(LANDMARKS.len()));
    pool
}
