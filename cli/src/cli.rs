use std::path::PathBuf;

/// Area-weighted crosswalk between two boundary vintages
#[derive(clap::Parser, Debug)]
#[command(name = "jpcrosswalk", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub crosswalk: CrosswalkArgs,
}

#[derive(clap::Args, Debug)]
pub struct CrosswalkArgs {
    /// JSON run configuration; flags given on the command line take precedence
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Vintage whose regions are the rows' origin, defaults to 2000
    #[arg(long)]
    pub source_year: Option<u16>,

    /// Vintage whose areas form the weight denominators, defaults to 1980
    #[arg(long)]
    pub target_year: Option<u16>,

    /// Source boundary shapefile, defaults to "Data/jpn<year>/jpn<year>geo.shp"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub source_path: Option<PathBuf>,

    /// Target boundary shapefile, defaults to "Data/jpn<year>/jpn<year>geo.shp"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub target_path: Option<PathBuf>,

    /// Output table (.csv or .parquet), defaults to "Crosswalk/Crosswalk_<source>_<target>.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output_path: Option<PathBuf>,

    /// Rows with weight at or below this value are dropped, defaults to 0.001
    #[arg(short, long)]
    pub weight_threshold: Option<f64>,

    /// Directory that default paths resolve against, defaults to "."
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,
}
