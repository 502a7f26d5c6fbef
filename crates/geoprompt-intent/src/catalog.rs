//! Canned queries for well-known requests.
//!
//! The catalog is the fallback when the reasoning service is unavailable and
//! the text names one of the keywords below.

use geoprompt_core::models::{DataType, QueryIntent};
use serde::Serialize;

/// One canned query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CannedQuery {
    pub keyword: &'static str,
    pub data_type: DataType,
    pub query: &'static str,
    pub description: &'static str,
}

impl CannedQuery {
    /// Intent executing this canned query as-is
    pub fn to_intent(&self) -> QueryIntent {
        QueryIntent::new(self.data_type, self.query).with_explanation(self.description)
    }
}

const CANNED: [CannedQuery; 9] = [
    CannedQuery {
        keyword: "tallest",
        data_type: DataType::Buildings,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('buildings.parquet') \
                WHERE height IS NOT NULL ORDER BY height DESC LIMIT 100",
        description: "The 100 tallest buildings with a recorded height",
    },
    CannedQuery {
        keyword: "apartment",
        data_type: DataType::Buildings,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('buildings.parquet') \
                WHERE building = 'apartments' LIMIT 1000",
        description: "Apartment buildings",
    },
    CannedQuery {
        keyword: "motorway",
        data_type: DataType::Roads,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('roads.parquet') \
                WHERE highway IN ('motorway', 'trunk') LIMIT 1000",
        description: "Motorways and trunk roads",
    },
    CannedQuery {
        keyword: "cycleway",
        data_type: DataType::Roads,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('roads.parquet') \
                WHERE highway = 'cycleway' LIMIT 1000",
        description: "Dedicated cycleways",
    },
    CannedQuery {
        keyword: "footpath",
        data_type: DataType::Roads,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('roads.parquet') \
                WHERE highway IN ('footway', 'path', 'pedestrian') LIMIT 1000",
        description: "Footways, paths and pedestrian streets",
    },
    CannedQuery {
        keyword: "forest",
        data_type: DataType::Landuse,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('landuse.parquet') \
                WHERE landuse = 'forest' LIMIT 1000",
        description: "Forest areas",
    },
    CannedQuery {
        keyword: "residential",
        data_type: DataType::Landuse,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('landuse.parquet') \
                WHERE landuse = 'residential' LIMIT 1000",
        description: "Residential zones",
    },
    CannedQuery {
        keyword: "commercial",
        data_type: DataType::Landuse,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('landuse.parquet') \
                WHERE landuse IN ('commercial', 'retail') LIMIT 1000",
        description: "Commercial and retail zones",
    },
    CannedQuery {
        keyword: "park",
        data_type: DataType::Landuse,
        query: "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('landuse.parquet') \
                WHERE landuse IN ('grass', 'recreation_ground', 'village_green') LIMIT 1000",
        description: "Parks and green areas",
    },
];

/// All canned queries, in match order
pub fn list_canned() -> &'static [CannedQuery] {
    &CANNED
}

/// First canned query whose keyword occurs in `text` (case-insensitive)
pub fn match_keyword(text: &str) -> Option<&'static CannedQuery> {
    let text = text.to_lowercase();
    CANNED.iter().find(|canned| text.contains(canned.keyword))
}

/// Summary shown when the user asks what can be queried
pub fn describe_catalog() -> String {
    let mut summary = String::from(
        "I can search three datasets:\n\
         - buildings: footprints with name, building type, height and levels\n\
         - roads: streets and paths with name, highway class, speed limit and surface\n\
         - landuse: areas such as forest, residential, commercial and parks\n\
         \n\
         Mention a city and a radius to narrow the search, e.g. \"roads within 3 km of Tartu\".\n\
         Ready-made queries:",
    );
    for canned in CANNED.iter() {
        summary.push_str(&format!("\n- {}: {}", canned.keyword, canned.description));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_queries_request_wkt() {
        for canned in list_canned() {
            assert!(canned.query.contains("AS geometry_wkt"), "{}", canned.keyword);
            assert!(canned.query.contains(&canned.data_type.source_name()), "{}", canned.keyword);
        }
    }

    #[test]
    fn test_match_keyword_is_case_insensitive() {
        let canned = match_keyword("Show me the TALLEST towers").unwrap();
        assert_eq!(canned.keyword, "tallest");
        assert_eq!(canned.data_type, DataType::Buildings);
    }

    #[test]
    fn test_first_keyword_in_catalog_order_wins() {
        // "forest" is listed before "park"
        let canned = match_keyword("park and forest").unwrap();
        assert_eq!(canned.keyword, "forest");
    }

    #[test]
    fn test_no_match() {
        assert!(match_keyword("lighthouses").is_none());
    }

    #[test]
    fn test_describe_catalog_lists_keywords() {
        let summary = describe_catalog();
        assert!(summary.contains("buildings"));
        for canned in list_canned() {
            assert!(summary.contains(canned.keyword));
        }
    }

    #[test]
    fn test_to_intent() {
        let intent = match_keyword("cycleway").unwrap().to_intent();
        assert_eq!(intent.data_type, DataType::Roads);
        assert!(intent.is_executable());
        assert_eq!(intent.explanation, "Dedicated cycleways");
    }
}
