//! Строгий CSV (RFC 4180) на основе крейта `csv`.
//!
//! Используется вместо упрощенного разбора, когда во входных данных
//! встречаются удвоенные кавычки или многострочные поля.

use crate::error::Result;
use crate::types::Record;
use ::csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::io::{Read, Write};

/// Читатель строгого CSV. Заголовок не выделяется, длина строк может
/// различаться.
pub struct SaneReader<R> {
    reader: ::csv::Reader<R>,
    record: StringRecord,
    failed: bool,
}

impl<R: Read> SaneReader<R> {
    /// Создает читатель из любого источника, реализующего трейт Read.
    pub fn from_read(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            failed: false,
        }
    }

    /// Читает следующую запись; `None` в конце ввода.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }
}

impl<R: Read> Iterator for SaneReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Writer строгого CSV. Строки завершаются `\r\n`, буфер сбрасывается
/// после каждой записи.
pub struct SaneWriter<W: Write> {
    writer: ::csv::Writer<W>,
}

impl<W: Write> SaneWriter<W> {
    /// Создает writer поверх любого приемника, реализующего трейт Write.
    pub fn from_write(writer: W) -> Self {
        let writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        Self { writer }
    }

    /// Записывает одну запись.
    pub fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.writer.write_record(record)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Сбрасывает буфер приемника.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
