//! Build a random dense linear system and solve it.

use anyhow::Result;
use clap::{Arg, Command};
use log::LevelFilter;

use rustymat_cli::solve::{self, format_matrix, format_vector};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("RUSTYMAT_LOG", "error,rustymat=info"))
        .init();

    let matches = Command::new("solve-demo")
        .version(clap::crate_version!())
        .about("Solve a random dense linear system A x = b")
        .arg(
            Arg::new("size")
                .short('n')
                .long("size")
                .help("Dimension of the square system")
                .value_parser(clap::value_parser!(usize))
                .default_value("3"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("RNG seed for a reproducible system; omit for a random one")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let n: usize = *matches.get_one("size").unwrap();
    let seed = matches.get_one::<u64>("seed").copied();

    match run(n, seed) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Solve failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn run(n: usize, seed: Option<u64>) -> Result<()> {
    let (a, b) = solve::random_system(n, seed);
    let x = solve::solve(&a, &b)?;
    print!("A:\n{}", format_matrix(&a));
    print!("b:\n{}", format_vector(&b));
    print!("x:\n{}", format_vector(&x));
    Ok(())
}
