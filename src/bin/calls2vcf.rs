use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use std::{env, process};

use calls2vcf::{gfa, CallTable, ConversionParameters, ConversionStats, GraphAccessor};
use gbwt::GBZ;
use getopts::Options;
use simple_sds::serialize;
use tracing_subscriber::EnvFilter;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    // Parse arguments.
    let config = Config::new();
    init_logging(config.verbose);

    // Load the calls.
    tracing::info!("Loading calls from {}", config.calls_file);
    let calls = CallTable::load(&config.calls_file).map_err(|x| x.to_string())?;
    tracing::info!("Loaded calls for {} bases on {} nodes", calls.bases(), calls.nodes());

    // Load the graph and convert.
    tracing::info!("Loading graph from {}", config.graph_file);
    let stats = if config.graph_file.ends_with(".gbz") {
        let graph: GBZ = serialize::load_from(&config.graph_file).map_err(|x| x.to_string())?;
        run(&graph, &calls, &config)?
    } else {
        let graph = gfa::load_gfa(&config.graph_file).map_err(|x| x.to_string())?;
        run(&graph, &calls, &config)?
    };
    tracing::info!(
        "Reference path {} contains {} nodes; {} nodes were skipped",
        config.parameters.reference_path, stats.reference_nodes, stats.skipped_nodes
    );

    let end_time = Instant::now();
    let seconds = end_time.duration_since(start_time).as_secs_f64();
    tracing::info!("Used {:.3} seconds", seconds);

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<G: GraphAccessor + Sync>(graph: &G, calls: &CallTable, config: &Config) -> Result<ConversionStats, String> {
    let mut output: Box<dyn Write> = match &config.output_file {
        Some(filename) => Box::new(BufWriter::new(File::create(filename).map_err(|x| x.to_string())?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let stats = calls2vcf::convert::convert(graph, calls, &config.parameters, &mut output).map_err(|x| x.to_string())?;
    output.flush().map_err(|x| x.to_string())?;
    Ok(stats)
}

//-----------------------------------------------------------------------------

struct Config {
    pub graph_file: String,
    pub calls_file: String,
    pub output_file: Option<String>,
    pub parameters: ConversionParameters,
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        let ref_desc = format!("name of the reference path (default: {})", ConversionParameters::DEFAULT_REFERENCE_PATH);
        opts.optopt("r", "ref", &ref_desc, "NAME");
        let sample_desc = format!("sample name in the VCF header (default: {})", ConversionParameters::DEFAULT_SAMPLE_NAME);
        opts.optopt("s", "sample", &sample_desc, "NAME");
        opts.optopt("o", "output", "output file name (default: stdout)", "FILE");
        let threads_desc = format!("number of worker threads (default: {})", ConversionParameters::DEFAULT_THREADS);
        opts.optopt("t", "threads", &threads_desc, "INT");
        opts.optflag("v", "verbose", "print debug information");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        let header = format!("Usage: {} [options] graph.(gbz|gfa) calls", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }

        let mut parameters = ConversionParameters::default();
        if let Some(s) = matches.opt_str("r") {
            parameters.reference_path = s;
        }
        if let Some(s) = matches.opt_str("s") {
            parameters.sample_name = s;
        }
        if let Some(s) = matches.opt_str("t") {
            match s.parse::<usize>() {
                Ok(threads) if threads > 0 => parameters.threads = threads,
                _ => {
                    eprintln!("--threads: invalid number of threads {}", s);
                    process::exit(1);
                }
            }
        }
        let output_file = matches.opt_str("o");
        let verbose = matches.opt_present("v");

        let (graph_file, calls_file) = if matches.free.len() == 2 {
            (matches.free[0].clone(), matches.free[1].clone())
        } else {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        };

        Config {
            graph_file,
            calls_file,
            output_file,
            parameters,
            verbose,
        }
    }
}

//-----------------------------------------------------------------------------
