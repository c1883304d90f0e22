//! Модуль конвертации: пересчет поля записи по курсу.

use crate::csv::{CsvReader, CsvWriter, Dialect, RecordSink, SaneReader, SaneWriter};
use crate::currency::format_currency;
use crate::error::{Error, Result};
use crate::types::{CurrencyFormat, Record};
use std::io::{Read, Write};

/// Заменяет одно поле записи суммой, умноженной на курс и
/// отформатированной как денежное значение.
#[derive(Debug, Clone)]
pub struct FieldConverter {
    field: usize,
    multiplier: f64,
    format: CurrencyFormat,
}

impl FieldConverter {
    /// Создает конвертер. Номер поля считается с единицы.
    pub fn new(field: usize, multiplier: f64, format: CurrencyFormat) -> Self {
        Self {
            field,
            multiplier,
            format,
        }
    }

    /// Номер преобразуемого поля (с единицы).
    pub fn field(&self) -> usize {
        self.field
    }

    /// Курс пересчета.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Настройки денежного формата.
    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    /// Пересчитывает одно значение.
    ///
    /// Пробелы по краям допускаются. Нечисловое или бесконечное значение
    /// дает [`Error::InvalidNumber`].
    pub fn convert_value(&self, raw: &str) -> Result<String> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidNumber(raw.to_string()))?;

        let product = value * self.multiplier;
        if !product.is_finite() {
            return Err(Error::InvalidNumber(raw.to_string()));
        }

        Ok(format_currency(product, &self.format))
    }

    /// Пересчитывает поле записи на месте.
    pub fn convert_record(&self, record: &mut Record) -> Result<()> {
        let len = record.len();
        let slot = self
            .field
            .checked_sub(1)
            .and_then(|index| record.get_mut(index))
            .ok_or(Error::FieldOutOfRange {
                field: self.field,
                len,
            })?;

        *slot = self.convert_value(slot)?;
        Ok(())
    }
}

/// Пересчитывает записи по одной и сразу пишет их в приемник.
///
/// Первая же ошибка прерывает обработку; уже записанные строки
/// остаются в приемнике. Возвращает число записанных записей.
pub fn convert_stream<I, S>(records: I, sink: &mut S, converter: &FieldConverter) -> Result<u64>
where
    I: IntoIterator<Item = Result<Record>>,
    S: RecordSink + ?Sized,
{
    let mut written = 0;

    for record in records {
        let mut record = record?;
        converter.convert_record(&mut record)?;
        sink.write_record(&record)?;

        written += 1;
        tracing::trace!("Запись {}: {:?}", written, record);
    }

    sink.flush()?;
    Ok(written)
}

/// Читает CSV из `input`, пересчитывает поле и пишет результат в `output`.
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    dialect: Dialect,
    converter: &FieldConverter,
) -> Result<u64> {
    tracing::debug!(
        "Конвертация: поле {}, курс {}, локаль {}, диалект {:?}",
        converter.field(),
        converter.multiplier(),
        converter.format().locale,
        dialect
    );

    let written = match dialect {
        Dialect::Naive => {
            let mut writer = CsvWriter::new(output);
            convert_stream(CsvReader::from_read(input), &mut writer, converter)?
        }
        Dialect::Sane => {
            let mut writer = SaneWriter::from_write(output);
            convert_stream(SaneReader::from_read(input), &mut writer, converter)?
        }
    };

    tracing::info!("Обработано записей: {}", written);
    Ok(written)
}
