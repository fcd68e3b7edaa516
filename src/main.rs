use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chatblocks::{Config, Error, OutputFormat};
use clap::Parser;
use log::{debug, info};

#[derive(Parser)]
#[command(name = "chatblocks")]
#[command(about = "Classify chat message text into a typed block document")]
struct Cli {
    /// Input text file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout; PDF defaults to input name with .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Config file
    #[arg(short, long, default_value = "chatblocks.toml")]
    config: PathBuf,

    /// Print the detected mode and exit
    #[arg(long)]
    mode: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> chatblocks::Result<()> {
    let config = Config::load(&cli.config)?;

    let input = cli.input.filter(|path| path.as_os_str() != "-");
    let text = read_input(input.as_deref())?;

    if cli.mode {
        println!("{}", chatblocks::detect(&text));
        return Ok(());
    }

    let document = chatblocks::classify(&text);
    debug!(
        "Classified input into {} top-level blocks:\n{}",
        document.len(),
        document.plain_text()
    );

    let format = cli.format.unwrap_or(config.output.format);
    match format {
        OutputFormat::Json => {
            let json = chatblocks::document_to_json(&document, cli.pretty || config.output.pretty)?;
            write_output(cli.output.as_deref(), format!("{json}\n").as_bytes())
        }
        OutputFormat::Typst => {
            let typst = chatblocks::document_to_typst(&document, &config);
            write_output(cli.output.as_deref(), typst.as_bytes())
        }
        OutputFormat::Pdf => {
            let pdf_bytes = chatblocks::document_to_pdf(&document, &config)?;
            let output = cli
                .output
                .or_else(|| input.map(|path| path.with_extension("pdf")));
            write_output(output.as_deref(), &pdf_bytes)?;
            if let Some(output) = output {
                println!("Created {}", output.display());
            }
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> chatblocks::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => io::read_to_string(io::stdin()).map_err(|source| Error::Io {
            path: PathBuf::from("<stdin>"),
            source,
        }),
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> chatblocks::Result<()> {
    match path {
        Some(path) => {
            info!("Writing {} bytes to {}", bytes.len(), path.display());
            fs::write(path, bytes).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        None => io::stdout()
            .lock()
            .write_all(bytes)
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}
