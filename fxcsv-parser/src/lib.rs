//! # FxCSV Parser
//!
//! Библиотека для пересчета денежного поля в CSV по курсу валют.
//!
//! Каждая строка разбирается в запись, одно поле умножается на курс и
//! форматируется как денежная сумма в заданной локали, после чего запись
//! записывается обратно.
//!
//! ## Диалекты CSV
//!
//! - **Naive** - упрощенный построчный разбор с кавычками `"` и `'`
//!   (см. [`csv::reader`])
//! - **Sane** - строгий RFC 4180 на основе крейта `csv`
//!
//! ## Пример использования
//!
//! ```rust,ignore
//! use fxcsv_parser::{convert, CurrencyFormat, Dialect, FieldConverter};
//! use std::io;
//!
//! let converter = FieldConverter::new(4, 1.08, CurrencyFormat::default());
//! convert(io::stdin().lock(), io::stdout().lock(), Dialect::Naive, &converter)?;
//! ```

pub mod error;
pub mod types;
pub mod csv;
pub mod currency;
pub mod convert;

pub use error::{Error, Result};
pub use types::*;
pub use crate::csv::{
    parse, serialize, tokenize, CsvReader, CsvWriter, Dialect, RecordSink, SaneReader,
    SaneWriter,
};
pub use currency::format_currency;
pub use convert::{convert, convert_stream, FieldConverter};
