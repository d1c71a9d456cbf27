// End-to-end tests using the public interface.

use crate::{convert, gfa, utils};
use crate::{CallTable, ConversionParameters, Error};

use std::fs;

//-----------------------------------------------------------------------------

fn convert_files(graph_file: &'static str, calls_file: &'static str, parameters: &ConversionParameters) -> Result<Vec<u8>, Error> {
    let graph = gfa::load_gfa(utils::get_test_data(graph_file))?;
    let calls = CallTable::load(utils::get_test_data(calls_file))?;
    let mut output: Vec<u8> = Vec::new();
    convert::convert(&graph, &calls, parameters, &mut output)?;
    Ok(output)
}

//-----------------------------------------------------------------------------

#[test]
fn plain_and_compressed_calls() {
    let expected = fs::read(utils::get_test_data("example.vcf")).unwrap();
    for calls_file in ["example.calls", "example.calls.gz"] {
        for threads in [1, 4] {
            let parameters = ConversionParameters { threads, ..ConversionParameters::default() };
            let output = convert_files("example.gfa", calls_file, &parameters);
            assert!(output.is_ok(), "Conversion failed with {} and {} threads: {}", calls_file, threads, output.unwrap_err());
            assert_eq!(output.unwrap(), expected, "Wrong output with {} and {} threads", calls_file, threads);
        }
    }
}

#[test]
fn missing_files() {
    let parameters = ConversionParameters::default();
    let result = convert_files("missing.gfa", "example.calls", &parameters);
    assert!(matches!(result, Err(Error::Io(_))), "Expected an I/O error for a missing graph");
    let result = convert_files("example.gfa", "missing.calls", &parameters);
    assert!(matches!(result, Err(Error::Io(_))), "Expected an I/O error for missing calls");
}

#[test]
fn calls_without_variants() {
    let graph = gfa::load_gfa(utils::get_test_data("example.gfa")).unwrap();
    let calls = CallTable::from_reader("1 1 A .\n2 1 C .\n".as_bytes()).unwrap();
    let mut output: Vec<u8> = Vec::new();
    let stats = convert::convert(&graph, &calls, &ConversionParameters::default(), &mut output).unwrap();
    assert_eq!(stats.bubble_variants + stats.snp_variants, 0, "There should be no variants");
    assert_eq!(stats.unused_nodes, 4, "Bubbles without calls should be unused");
    assert_eq!(stats.skipped_nodes, 3, "Nodes that cannot form bubbles should be skipped regardless of calls");
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3, "Only the header should be written");
}

//-----------------------------------------------------------------------------
