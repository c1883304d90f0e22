//! Модуль разбора и сериализации CSV.
//!
//! Два диалекта: упрощенный ([`reader`], [`writer`]) и строгий
//! RFC 4180 ([`sane`]). Оба подключаются к конвейеру через
//! итератор записей и трейт [`RecordSink`].

pub mod reader;
pub mod sane;
pub mod writer;

pub use reader::{parse, tokenize, CsvReader};
pub use sane::{SaneReader, SaneWriter};
pub use writer::{serialize, CsvWriter};

use crate::error::Result;
use std::io::Write;

/// Диалект CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Упрощенный разбор: одна строка - одна запись.
    #[default]
    Naive,
    /// Строгий RFC 4180 через крейт `csv`.
    Sane,
}

/// Приемник записей.
pub trait RecordSink {
    /// Записывает одну запись.
    fn write_record(&mut self, record: &[String]) -> Result<()>;

    /// Сбрасывает буфер приемника.
    fn flush(&mut self) -> Result<()>;
}

impl<W: Write> RecordSink for CsvWriter<W> {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        CsvWriter::write_record(self, record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        CsvWriter::flush(self)?;
        Ok(())
    }
}

impl<W: Write> RecordSink for SaneWriter<W> {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        SaneWriter::write_record(self, record)
    }

    fn flush(&mut self) -> Result<()> {
        SaneWriter::flush(self)
    }
}
