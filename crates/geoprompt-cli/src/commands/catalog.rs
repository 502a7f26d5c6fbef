//! Catalog command implementation

use crate::output::OutputWriter;
use crate::output_types::CatalogRow;
use anyhow::Result;
use geoprompt_intent::list_canned;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let rows: Vec<CatalogRow> = list_canned()
        .iter()
        .map(|canned| CatalogRow {
            keyword: canned.keyword.to_string(),
            dataset: canned.data_type.as_str().to_string(),
            description: canned.description.to_string(),
            query: canned.query.to_string(),
        })
        .collect();

    output.section("Canned queries");
    output.table(rows)?;

    if !output.is_json() {
        output.info("Mention a keyword in a question to run its query");
    }

    Ok(())
}
