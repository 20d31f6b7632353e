use crate::cli::{Cli, CliError, Result};
use huffdict::HuffmanDictionary;
use huffdict::dictionary_file;
use huffdict::stream;
use std::fs::File;
use std::io::BufWriter;

if_tracing! {
    use voxell_timer::time_fn;
}

pub fn decompress(args: &Cli) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;
    let options = args.stream_options();

    let root = dictionary_file::read_dictionary(&args.dictionary)?;
    let dictionary = HuffmanDictionary::from_root(root);

    let input = File::open(input_path).map_err(CliError::io(input_path))?;
    let output = BufWriter::new(File::create(output_path).map_err(CliError::io(output_path))?);
    if_tracing! {{
        let (stats, decomp_dur) = time_fn(|| stream::decompress(&dictionary, input, output, &options));
        let stats = stats?;
        tracing::info!(event = "decompress_complete", input = %input_path.display(), output = %output_path.display(), symbols = dictionary.size(), elapsed_ms = ?decomp_dur, decompressed_len = stats.bytes_out, "decompress finished");
    }};
    if_not_tracing! {{
        stream::decompress(&dictionary, input, output, &options)?;
    }};
    Ok(())
}
