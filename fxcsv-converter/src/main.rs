//! CLI-утилита для пересчета денежного поля CSV по курсу валют.

use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process;
use tracing::Level;

use fxcsv_parser::{
    convert, CurrencyFormat, Dialect, FieldConverter, Locale, SymbolPosition, DEFAULT_LOCALE,
};

/// Положение символа валюты.
#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    /// Перед суммой
    Prefix,
    /// После суммы
    Suffix,
    /// Как принято в локали
    Locale,
}

impl From<PositionArg> for SymbolPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::Prefix => SymbolPosition::Prefix,
            PositionArg::Suffix => SymbolPosition::Suffix,
            PositionArg::Locale => SymbolPosition::Locale,
        }
    }
}

/// FxCSV Converter - пересчет валюты в CSV.
///
/// Умножает значение поля N на курс и выводит результат в денежном
/// формате локали (по умолчанию французском).
#[derive(Parser)]
#[command(name = "fxcsv-converter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Номер пересчитываемого поля (с единицы)
    #[arg(long, value_name = "N")]
    field: usize,

    /// Курс пересчета
    #[arg(long, value_name = "N", default_value_t = 1.0, allow_negative_numbers = true)]
    multiplier: f64,

    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input", value_name = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output", value_name = "output")]
    output: Option<String>,

    /// Строгий CSV (RFC 4180) вместо упрощенного разбора
    #[arg(long)]
    sane_csv: bool,

    /// Локаль денежного формата
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Печатать символ валюты
    #[arg(long)]
    symbol: bool,

    /// Положение символа валюты
    #[arg(long, value_enum, default_value_t = PositionArg::Prefix)]
    symbol_position: PositionArg,

    /// Не группировать разряды
    #[arg(long)]
    no_grouping: bool,

    /// Местный символ и точность вместо международных
    #[arg(long)]
    local: bool,

    /// Подробный вывод в stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout занят данными
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn currency_format(args: &Args) -> Result<CurrencyFormat, String> {
    let locale: Locale = args.locale.parse().map_err(|e| format!("{}", e))?;

    Ok(CurrencyFormat {
        locale,
        symbol: args.symbol,
        symbol_position: args.symbol_position.into(),
        grouping: !args.no_grouping,
        international: !args.local,
    })
}

fn open_input(path: Option<&str>) -> Result<Box<dyn Read>, String> {
    match path {
        Some(path) => {
            let file =
                File::open(path).map_err(|e| format!("Не удалось открыть файл '{}': {}", path, e))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, String> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Не удалось создать файл '{}': {}", path, e))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn run(args: &Args) -> Result<u64, String> {
    let format = currency_format(args)?;
    let converter = FieldConverter::new(args.field, args.multiplier, format);
    let dialect = if args.sane_csv {
        Dialect::Sane
    } else {
        Dialect::Naive
    };

    let input = open_input(args.input.as_deref())?;
    let output = open_output(args.output.as_deref())?;

    convert(input, BufWriter::new(output), dialect, &converter).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Ошибка: {}", e);
        process::exit(1);
    }
}
