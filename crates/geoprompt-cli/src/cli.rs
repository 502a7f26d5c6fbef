use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GeoPrompt - Ask a map questions in plain language
#[derive(Parser, Debug)]
#[command(name = "geoprompt")]
#[command(about = "Natural-language spatial queries over local datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the dataset files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reasoning service: `none` or `ollama:<model>`
    #[arg(long, global = true)]
    pub generator: Option<String>,

    /// Place resolver: `static` or `nominatim`
    #[arg(long, global = true)]
    pub geocoder: Option<String>,

    /// Answer from built-in sample data instead of the dataset files
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question and print the reply
    Ask(AskArgs),

    /// Interactive session with layer management
    Repl,

    /// List the canned query catalog
    Catalog,

    /// Show the columns of a dataset
    Schema(SchemaArgs),

    /// Show effective configuration values and their sources
    Config,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question, e.g. "show buildings within 5km of Tartu"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Write the resulting layer to a file (geojson or csv)
    #[arg(long, value_name = "FORMAT")]
    pub export: Option<String>,

    /// Directory for exported files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}

impl AskArgs {
    /// Words joined back into one request
    pub fn question(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Dataset name: buildings, roads or landuse
    pub dataset: String,
}
