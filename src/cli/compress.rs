use crate::cli::{Cli, CliError, Result};
use huffdict::HuffmanDictionary;
use huffdict::dictionary_file;
use huffdict::stream;
use std::fs::File;
use std::io::{BufWriter, Seek};

if_tracing! {
    use voxell_timer::time_fn;
}

pub fn compress(args: &Cli) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;
    let options = args.stream_options();

    let mut input = File::open(input_path).map_err(CliError::io(input_path))?;
    let mut dictionary = HuffmanDictionary::new();
    stream::learn(&mut dictionary, &mut input, options.read_buffer)?;
    if_tracing! {
        if dictionary.is_empty() {
            tracing::warn!(input = %input_path.display(), "input is empty, writing an empty dictionary");
        }
    }

    input.rewind().map_err(CliError::io(input_path))?;
    let output = BufWriter::new(File::create(output_path).map_err(CliError::io(output_path))?);
    if_tracing! {{
        let (stats, comp_dur) = time_fn(|| stream::compress(&dictionary, &mut input, output, &options));
        let stats = stats?;
        tracing::info!(event = "compress_complete", input = %input_path.display(), output = %output_path.display(), dictionary = %args.dictionary.display(), symbols = dictionary.size(), elapsed_ms = ?comp_dur, compressed_len = stats.bytes_out, "compress finished");
    }};
    if_not_tracing! {{
        stream::compress(&dictionary, &mut input, output, &options)?;
    }};

    dictionary_file::write_dictionary(&args.dictionary, dictionary.root())?;
    Ok(())
}
