use std::fs::File;

use clap::{App, Arg};
use serde_derive::Deserialize;
use voice_nlu_lib::{AlignedTokens, NluDecoder, PosteriorBuffer, Probability};

/// Model outputs for one utterance, as dumped by the inference side.
#[derive(Debug, Deserialize)]
struct ModelOutput {
    words: Vec<String>,
    intent_scores: Vec<Probability>,
    /// One row of tag scores per word
    tag_scores: Vec<Vec<Probability>>,
}

fn main() {
    env_logger::Builder::from_default_env().init();

    let matches = App::new("voice-nlu-decode")
        .about("Decodes dumped model outputs into an NLU result")
        .arg(
            Arg::with_name("METADATA")
                .required(true)
                .takes_value(true)
                .index(1)
                .help("path to the NLU metadata json file"),
        )
        .arg(
            Arg::with_name("MODEL_OUTPUT")
                .required(true)
                .takes_value(true)
                .index(2)
                .help("path to a json file with 'words', 'intent_scores' and 'tag_scores'"),
        )
        .get_matches();
    let metadata_path = matches.value_of("METADATA").unwrap();
    let output_path = matches.value_of("MODEL_OUTPUT").unwrap();

    let decoder = NluDecoder::from_path(metadata_path).unwrap();
    let output_file = File::open(output_path).unwrap();
    let output: ModelOutput = serde_json::from_reader(output_file).unwrap();

    let tokens = AlignedTokens::from_words(output.words);
    let intent_posteriors = PosteriorBuffer::from(output.intent_scores);
    let tag_posteriors =
        PosteriorBuffer::from(output.tag_scores.into_iter().flatten().collect::<Vec<_>>());

    match decoder.decode(intent_posteriors, tag_posteriors, &tokens) {
        Ok(result) => println!("{}", serde_json::to_string_pretty(&result).unwrap()),
        Err(error) => {
            eprintln!("Could not understand request: {}", error);
            for cause in error.iter_causes() {
                eprintln!("  caused by: {}", cause);
            }
            std::process::exit(1);
        }
    }
}
