//! Inspect a MAT-file: list its variable directory, then load one struct
//! field and dump a channel of it.

use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;

use rustymat_cli::channels;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("RUSTYMAT_LOG", "error,rustymat=info"))
        .init();

    let matches = Command::new("matdump")
        .version(clap::crate_version!())
        .about("List the variables of a MAT-file and dump one channel of a struct field")
        .arg(
            Arg::new("file")
                .help("Path of the MAT-file to open")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .default_value("TD160.mat")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("struct")
                .help("Name of the struct variable to extract")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .default_value("TD160"),
        )
        .arg(
            Arg::new("field")
                .help("Field of the struct to load as a matrix")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .default_value("data"),
        )
        .arg(
            Arg::new("channel")
                .help("Zero-based column of the field to dump")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .get_matches();

    let path: &String = matches.get_one("file").unwrap();
    let struct_name: &String = matches.get_one("struct").unwrap();
    let field_name: &String = matches.get_one("field").unwrap();
    let channel_index: usize = *matches.get_one("channel").unwrap();

    match run(path, struct_name, field_name, channel_index) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("matdump failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

const SAMPLES_SHOWN: usize = 10;

fn run(path: &str, struct_name: &str, field_name: &str, channel_index: usize) -> Result<()> {
    let file = channels::open_file(path)?;
    println!("Opened {path}");

    let vars = file.variables()?;
    println!("Variables in file:");
    for info in &vars {
        println!("  {info}");
    }

    let m = channels::load_field(&file, struct_name, field_name)?;
    println!(
        "Loaded {}.{} as {} x {}",
        struct_name,
        field_name,
        m.nrows(),
        m.ncols()
    );

    let samples = channels::channel(&m, channel_index)?;
    println!("Channel {channel_index} ({} samples):", samples.len());
    for (i, value) in samples.iter().take(SAMPLES_SHOWN).enumerate() {
        println!("  [{i}] {value:.6}");
    }
    Ok(())
}
