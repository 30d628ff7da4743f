use serde::{Deserialize, Serialize};

/// A purchasable record as held by the in-memory catalog.
///
/// Field names on the wire follow the public API: `id`, `Title`, `artist`, `price`.
/// Fields missing from a request body take their zero value.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Album {
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    pub fn new(id: &str, title: &str, artist: &str, price: f64) -> Album {
        Album {
            id: id.to_owned(),
            title: title.to_owned(),
            artist: artist.to_owned(),
            price,
        }
    }
}

/// The albums every fresh process starts with.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new("1", "Blue Train", "John Coltrane", 56.99),
        Album::new("2", "Jeru", "Gerry Mulligan", 17.99),
        Album::new(
            "3",
            "Sarah Vaughan and Clifford Brown",
            "Sarah Vaughan",
            39.99,
        ),
    ]
}
