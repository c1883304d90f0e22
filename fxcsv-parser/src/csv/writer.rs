//! Сериализация записей в упрощенный CSV.

use std::io::{self, Write};

/// Собирает запись в одну строку без перевода строки.
///
/// Поле берется в двойные кавычки тогда и только тогда, когда содержит
/// запятую. Кавычки внутри поля не экранируются.
pub fn serialize<S: AsRef<str>>(record: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in record.iter().enumerate() {
        if i > 0 {
            line.push(super::reader::DELIMITER);
        }
        line.push_str(&quote_field(field.as_ref()));
    }
    line
}

fn quote_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(super::reader::DELIMITER) {
        format!("\"{}\"", field).into()
    } else {
        field.into()
    }
}

/// Writer для упрощенного CSV.
///
/// Каждая запись пишется в приемник сразу, без накопления.
pub struct CsvWriter<W> {
    writer: W,
}

impl<W: Write> CsvWriter<W> {
    /// Создает writer поверх любого приемника, реализующего трейт Write.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Записывает одну запись и перевод строки.
    pub fn write_record<S: AsRef<str>>(&mut self, record: &[S]) -> io::Result<()> {
        let mut line = serialize(record);
        line.push('\n');
        self.writer.write_all(line.as_bytes())
    }

    /// Записывает записи по порядку.
    ///
    /// При ошибке уже записанные строки остаются в приемнике.
    pub fn write_records<I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<[String]>,
    {
        for record in records {
            self.write_record(record.as_ref())?;
        }
        Ok(())
    }

    /// Сбрасывает буфер приемника.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Возвращает приемник.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::reader::tokenize;
    use crate::types::Record;

    fn fields(items: &[&str]) -> Record {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_serialize_plain_fields() {
        assert_eq!(serialize(&["a", "b", "c"]), "a,b,c");
        assert_eq!(serialize(&["5", "15,00"]), "5,\"15,00\"");
    }

    #[test]
    fn test_serialize_empty_record() {
        let empty: [&str; 0] = [];
        assert_eq!(serialize(&empty), "");
    }

    #[test]
    fn test_only_comma_triggers_quoting() {
        assert_eq!(serialize(&["Smith, John"]), "\"Smith, John\"");
        assert_eq!(serialize(&["say \"hi\""]), "say \"hi\"");
        assert_eq!(serialize(&["back\\slash"]), "back\\slash");
        assert_eq!(serialize(&["it's"]), "it's");
        assert_eq!(serialize(&[" padded "]), " padded ");
    }

    #[test]
    fn test_round_trip_without_commas() {
        let records = [
            fields(&["100", "Smith", "250.5"]),
            fields(&["", "a", ""]),
            fields(&[" x ", "y"]),
            fields(&["   "]),
            Vec::new(),
        ];

        for record in records {
            assert_eq!(tokenize(&serialize(&record)), record);
        }
    }

    #[test]
    fn test_round_trip_with_commas() {
        let record = fields(&["1", "Smith, John", ",", "a,b,c"]);
        assert_eq!(tokenize(&serialize(&record)), record);
    }

    #[test]
    fn test_single_empty_field_does_not_round_trip() {
        // Запись [""] дает пустую строку, а пустая строка - ноль полей.
        let record = fields(&[""]);
        assert_eq!(serialize(&record), "");
        assert!(tokenize(&serialize(&record)).is_empty());
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let line = r#"100,"Smith, John",'a\'b',250.5"#;
        let first = tokenize(line);
        let second = tokenize(&serialize(&first));
        let third = tokenize(&serialize(&second));
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_round_trip_single_quoted_field_with_double_quotes() {
        let first = tokenize(r#"1,'say "hi", ok',2"#);
        assert_eq!(first, fields(&["1", r#"say "hi", ok"#, "2"]));

        let line = serialize(&first);
        assert_eq!(line, r#"1,"say "hi", ok",2"#);

        let second = tokenize(&line);
        assert_eq!(first, second);
        assert_eq!(tokenize(&serialize(&second)), second);
    }

    #[test]
    fn test_field_shaped_like_two_quoted_fields_is_ambiguous() {
        // Строка `"x", "y"` - это и сериализация поля `x", "y`, и две
        // записи в кавычках; разбор выбирает второе.
        let line = serialize(&[r#"x", "y"#]);
        assert_eq!(line, r#""x", "y""#);
        assert_eq!(tokenize(&line), fields(&["x", "y"]));
    }

    #[test]
    fn test_write_record_appends_newline() {
        let mut writer = CsvWriter::new(Vec::new());
        writer.write_record(&["a", "b,c"]).unwrap();
        writer.write_record::<&str>(&[]).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "a,\"b,c\"\n\n");
    }

    #[test]
    fn test_write_records_in_order() {
        let records = vec![fields(&["1", "x"]), fields(&["2", "y,z"])];
        let mut writer = CsvWriter::new(Vec::new());
        writer.write_records(&records).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "1,x\n2,\"y,z\"\n");
    }

    /// Приемник, который принимает заданное число записей и затем отказывает.
    struct LimitedSink {
        lines: Vec<String>,
        limit: usize,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.lines.len() >= self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.lines.push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_records_keeps_emitted_lines_on_error() {
        let records = vec![fields(&["1"]), fields(&["2"]), fields(&["3"])];
        let mut writer = CsvWriter::new(LimitedSink {
            lines: Vec::new(),
            limit: 2,
        });

        let err = writer.write_records(&records).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let sink = writer.into_inner();
        assert_eq!(sink.lines, vec!["1\n", "2\n"]);
    }
}
