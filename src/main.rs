#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airport_dict::{
    build_dictionary, DuplicatePolicy, FeatureCollection, RenderOptions, RenderOptionsBuilder,
    TermPriorities,
};

#[derive(StructOpt)]
#[structopt(about = "Builds an Apple Dictionary XML source from FAA airport GeoJSON")]
struct Args {
    #[structopt(name = "input", parse(from_os_str), default_value = "Airports.geojson")]
    input: PathBuf,
    /// Write the XML here instead of stdout
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Bold title of the front matter [default: US Airports]
    #[structopt(long = "product-name")]
    product_name: Option<String>,
    /// Data freshness shown in the front matter [default: September 2024]
    #[structopt(long = "as-of")]
    as_of: Option<String>,
    /// Index every word of the airport name, including words of three letters or fewer
    #[structopt(long = "keep-short-words")]
    keep_short_words: bool,
    /// Put the airport name into map links without URL encoding
    #[structopt(long = "raw-map-name")]
    raw_map_name: bool,
    /// Add the operational status to each entry
    #[structopt(long = "show-status")]
    show_status: bool,
    /// What to do with repeated GLOBAL_IDs
    #[structopt(
        long = "duplicates",
        default_value = "keep",
        possible_values = &["keep", "skip", "suffix"]
    )]
    duplicates: DuplicatePolicy,
    #[structopt(long = "ident-priority")]
    ident_priority: Option<u32>,
    #[structopt(long = "icao-priority")]
    icao_priority: Option<u32>,
    #[structopt(long = "name-priority")]
    name_priority: Option<u32>,
    #[structopt(long = "word-priority")]
    word_priority: Option<u32>,
}

impl Args {
    fn render_options(&self) -> Result<RenderOptions, Box<dyn Error>> {
        let mut options = RenderOptionsBuilder::default();
        if let Some(product_name) = &self.product_name {
            options.product_name(product_name.as_str());
        }
        if let Some(as_of) = &self.as_of {
            options.as_of(as_of.as_str());
        }
        options
            .filter_short_words(!self.keep_short_words)
            .escape_map_name(!self.raw_map_name)
            .show_status(self.show_status)
            .priorities(TermPriorities {
                ident: self.ident_priority,
                icao: self.icao_priority,
                name: self.name_priority,
                word: self.word_priority,
            });
        Ok(options.build()?)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::from_args();

    info!(input = %args.input.display(), "Loading airport GeoJSON...");
    let collection = FeatureCollection::from_path(&args.input)?;

    let dictionary = match build_dictionary(collection, args.render_options()?, args.duplicates) {
        Ok(dictionary) => dictionary,
        Err(e @ airport_dict::Error::NotFeatureCollection { .. }) => {
            error!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    info!("Outputting dictionary XML...");
    match &args.output {
        Some(path) => dictionary.write(BufWriter::new(File::create(path)?))?,
        None => dictionary.write(BufWriter::new(io::stdout().lock()))?,
    }
    Ok(())
}
