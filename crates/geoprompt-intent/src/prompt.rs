//! System prompt for the reasoning service.

use geoprompt_geo::KNOWN_CITIES;

const SCHEMA_AND_RULES: &str = r#"You translate map requests into DuckDB spatial SQL over three GeoParquet datasets.

Datasets (read each with read_parquet('<name>.parquet')):
- buildings: osm_id BIGINT, name VARCHAR, building VARCHAR, height DOUBLE, levels INTEGER, geometry GEOMETRY
- roads: osm_id BIGINT, name VARCHAR, highway VARCHAR, maxspeed INTEGER, surface VARCHAR, geometry GEOMETRY
- landuse: osm_id BIGINT, name VARCHAR, landuse VARCHAR, geometry GEOMETRY

SQL rules:
- Query exactly one dataset.
- Always select raw columns and the geometry as text: SELECT *, ST_AsText(geometry) AS geometry_wkt
- Restrict to a radius with ST_DWithin(geometry, ST_Point(<lon>, <lat>), <radius_km> / 111.0)
- End every query with LIMIT {limit} unless the user asks for fewer rows.

Answer with a single JSON object and nothing else:
{"dataType": "buildings|roads|landuse", "location": "<city or null>", "radius": <km>, "filters": {}, "query": "<sql>", "explanation": "<one sentence>"}"#;

const EXAMPLES: &str = r#"Examples:
User: apartment buildings within 2 km of Tartu
{"dataType": "buildings", "location": "Tartu", "radius": 2, "filters": {"building": "apartments"}, "query": "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('buildings.parquet') WHERE building = 'apartments' AND ST_DWithin(geometry, ST_Point(26.729, 58.378), 2 / 111.0) LIMIT 1000", "explanation": "Apartment buildings within 2 km of Tartu"}

User: cycleways near Pärnu
{"dataType": "roads", "location": "Pärnu", "radius": 10, "filters": {"highway": "cycleway"}, "query": "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('roads.parquet') WHERE highway = 'cycleway' AND ST_DWithin(geometry, ST_Point(24.4971, 58.3859), 10 / 111.0) LIMIT 1000", "explanation": "Cycleways within 10 km of Pärnu"}"#;

/// Full prompt: rules, the known-city table, worked examples, then the request
pub fn build_prompt(user_text: &str, limit: u32) -> String {
    let mut prompt = SCHEMA_AND_RULES.replace("{limit}", &limit.to_string());

    prompt.push_str("\n\nKnown city centers (lat, lon):\n");
    for (city, lat, lon) in KNOWN_CITIES {
        prompt.push_str(&format!("- {}: {}, {}\n", city, lat, lon));
    }

    prompt.push('\n');
    prompt.push_str(EXAMPLES);
    prompt.push_str("\n\nUser: ");
    prompt.push_str(user_text.trim());
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_sections() {
        let prompt = build_prompt("  forests near Viljandi ", 500);
        assert!(prompt.contains("read_parquet"));
        assert!(prompt.contains("LIMIT 500"));
        assert!(prompt.contains("- Viljandi: 58.3639, 25.59"));
        assert!(prompt.ends_with("User: forests near Viljandi\n"));
    }
}
