use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, LineWriter, Write};

use log::info;
use splitter_rs::config::SplitterConfig;
use splitter_rs::{Splitter, WHITESPACE_SPLITTER};

// usage: verifier <input> <output> [splitter.yaml]
fn main() -> splitter_rs::Result<()> {
    env_logger::init();
    let args: Vec<_> = std::env::args().collect();
    assert!(
        args.len() == 3 || args.len() == 4,
        "should specify the input file, the output file and optionally a splitter config"
    );
    let input_filename = &args[1];
    let output_filename = &args[2];
    let splitter: Splitter = match args.get(3) {
        Some(config_path) => SplitterConfig::from_path(config_path)?.build()?,
        None => WHITESPACE_SPLITTER.clone(),
    };

    let input_file = File::open(input_filename)?;
    let lines = io::BufReader::new(input_file).lines();

    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    let output_file = opts.open(output_filename)?;
    let mut writer = LineWriter::new(output_file);

    let mut total = 0_usize;
    for line in lines {
        let line = line?;
        let tokens = splitter.split_to_list(&line);
        total += tokens.len();
        writer.write_all(tokens.join(",").as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!("wrote {} tokens to {}", total, output_filename);
    Ok(())
}
