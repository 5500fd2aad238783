use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub u32);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    #[serde(rename = "b")]
    Basement,
    #[serde(rename = "1f")]
    FirstFloor,
    #[serde(rename = "2f")]
    SecondFloor,
    #[serde(rename = "3f")]
    ThirdFloor,
    #[serde(rename = "r")]
    Roof,
}

impl LevelKind {
    pub fn label(self) -> &'static str {
        match self {
            LevelKind::Basement => "Basement",
            LevelKind::FirstFloor => "1st floor",
            LevelKind::SecondFloor => "2nd floor",
            LevelKind::ThirdFloor => "3rd floor",
            LevelKind::Roof => "Roof",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    #[serde(rename = "type")]
    pub kind: LevelKind,
    /// Path or URL of the blueprint image.
    pub blueprint: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    pub id: u32,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub released: DateTime<Utc>,
    #[serde(default)]
    pub reworked: Option<DateTime<Utc>>,
    pub levels: Vec<LevelId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub maps: Vec<MapInfo>,
    pub levels: Vec<Level>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map `{map}` references unknown level {level}")]
    UnknownLevel { map: String, level: LevelId },
    #[error("duplicate map slug `{0}`")]
    DuplicateSlug(String),
}

impl Catalog {
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut slugs = HashSet::new();
        for map in &self.maps {
            if !slugs.insert(map.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(map.slug.clone()));
            }
            if let Some(&missing) = map.levels.iter().find(|&&id| self.level(id).is_none()) {
                return Err(CatalogError::UnknownLevel {
                    map: map.slug.clone(),
                    level: missing,
                });
            }
        }
        Ok(())
    }

    pub fn map_by_slug(&self, slug: &str) -> Option<&MapInfo> {
        self.maps.iter().find(|m| m.slug == slug)
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// The three maps shipped with the viewer.
    pub fn builtin() -> Self {
        let mut levels = Vec::new();
        let mut maps = Vec::new();
        let specs = [
            (
                "chalet",
                "Chalet",
                "Courchevel, France",
                "A shootout in an après-ski chalet in the French alps.",
                Some((2020, 9)),
            ),
            (
                "bank",
                "Bank",
                "Los Angeles, California",
                "A raid on a major bank through progressively more fortified areas.",
                None,
            ),
            (
                "consulate",
                "Consulate",
                "Abidjan, Ivory Coast",
                "An assault on a highly secured consulate.",
                None,
            ),
        ];

        for (index, (slug, name, location, description, reworked)) in specs.into_iter().enumerate() {
            let map_id = index as u32 + 1;
            let floors = [
                (LevelKind::Basement, "basement"),
                (LevelKind::FirstFloor, "1-floor"),
                (LevelKind::SecondFloor, "2-floor"),
                (LevelKind::Roof, "roof"),
            ];
            let mut ids = Vec::new();
            for (kind, file) in floors {
                let id = LevelId(levels.len() as u32 + 1);
                levels.push(Level {
                    id,
                    kind,
                    blueprint: format!("assets/maps/{}/{}.jpg", slug, file),
                });
                ids.push(id);
            }
            maps.push(MapInfo {
                id: map_id,
                slug: slug.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                location: location.to_string(),
                released: first_of_month(2015, 12),
                reworked: reworked.map(|(y, m)| first_of_month(y, m)),
                levels: ids,
            });
        }

        Self { maps, levels }
    }
}

fn first_of_month(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
