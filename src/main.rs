//! minicsv - read, normalize and query CSV files

use clap::{Args, Parser, Subcommand, ValueEnum};
use minicsv::{index, CsvReader, CsvWriter, FloatKey, KeyErrors, Result, Row, Table};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "minicsv")]
#[command(about = "Read, normalize and query CSV files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-emit a CSV file in canonical form
    Cat {
        #[command(flatten)]
        input: InputArgs,

        /// Write to this file instead of standard output
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Encoding of the output file
        #[arg(long, default_value = minicsv::DEFAULT_ENCODING)]
        output_encoding: String,
    },

    /// Print the rows whose key column matches a value
    Lookup {
        #[command(flatten)]
        input: InputArgs,

        /// Key column (0-based)
        #[arg(short, long)]
        column: usize,

        /// Key value to look up
        #[arg(short, long)]
        key: String,

        /// How to interpret the key column
        #[arg(long, value_enum, default_value_t = KeyType::String)]
        key_type: KeyType,

        /// Skip rows whose key is not a valid number
        #[arg(long)]
        skip_errors: bool,

        /// Drop the first row before indexing
        #[arg(long)]
        skip_header: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// CSV file to read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Text encoding of the input
    #[arg(short, long, default_value = minicsv::DEFAULT_ENCODING)]
    encoding: String,

    /// Quote character
    #[arg(short, long, default_value_t = '"')]
    quote: char,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,
}

impl InputArgs {
    fn read(&self) -> Result<Table> {
        CsvReader::open(&self.file)?
            .encoding(&self.encoding)?
            .quote_char(self.quote)
            .delimiter(self.delimiter)
            .read_table()
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KeyType {
    String,
    Int,
    Float,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("minicsv: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Cat {
            input,
            output,
            output_encoding,
        } => {
            let table = input.read()?;
            match output {
                Some(path) => write_output(&table, &path, &output_encoding),
                None => minicsv::print(&table),
            }
        }
        Command::Lookup {
            input,
            column,
            key,
            key_type,
            skip_errors,
            skip_header,
        } => {
            let mut table = input.read()?;
            if skip_header {
                table.remove_header();
            }
            let on_error = KeyErrors::ignore(skip_errors);
            let matches = lookup(&table, column, &key, key_type, on_error)?;
            tracing::info!(key = %key, matches = matches.len(), "lookup finished");
            let rows: Table = matches.into_iter().cloned().collect();
            minicsv::print(&rows)
        }
    }
}

fn write_output(table: &Table, path: &Path, encoding: &str) -> Result<()> {
    let mut writer = CsvWriter::with_encoding(path, encoding)?;
    writer.write_table(table)?;
    writer.save()
}

fn lookup<'a>(
    table: &'a Table,
    column: usize,
    key: &str,
    key_type: KeyType,
    on_error: KeyErrors,
) -> Result<Vec<&'a Row>> {
    let groups = match key_type {
        KeyType::String => index::group_by_string(table, column)?.swap_remove(key),
        KeyType::Int => match key.parse::<i64>() {
            Ok(k) => index::group_by_int(table, column, on_error)?.swap_remove(&k),
            Err(_) => None,
        },
        KeyType::Float => match key.trim().parse::<f64>() {
            Ok(k) => index::group_by_float(table, column, on_error)?.swap_remove(&FloatKey::from(k)),
            Err(_) => None,
        },
    };
    Ok(groups.unwrap_or_default())
}
