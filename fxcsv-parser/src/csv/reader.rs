//! Упрощенный разбор CSV: одна строка - одна запись.
//!
//! Поддерживается только подмножество CSV:
//!
//! - разделитель полей - запятая вне кавычек;
//! - поле может быть целиком заключено в `"..."` или `'...'`, кавычки
//!   снимаются, запятые внутри не разделяют поля;
//! - внутри кавычек `\x` (обратная косая черта и любой символ) считается
//!   содержимым и не закрывает поле, обе литеры сохраняются как есть;
//! - кавычка того же вида закрывает поле, только если за ней (после
//!   пробелов) идет разделитель или конец строки и остаток строки не
//!   оставляет незакрытых кавычек; иначе она считается содержимым;
//! - пробелы между разделителем и кавычками поля отбрасываются, поля без
//!   кавычек сохраняются без изменений;
//! - удвоенные кавычки, многострочные поля и BOM не поддерживаются.
//!
//! Разбор никогда не завершается ошибкой: для любой строки возвращается
//! какой-то набор полей.

use crate::error::Result;
use crate::types::Record;
use std::io::{BufRead, BufReader, Read};
use std::mem;

/// Разделитель полей.
pub const DELIMITER: char = ',';

/// Состояние сканера.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Начало поля, пока встречались только пробелы.
    OutsideField,
    /// Внутри поля без кавычек.
    InUnquoted,
    /// Внутри поля в кавычках указанного вида.
    InQuoted(char),
    /// После обратной косой черты внутри кавычек.
    SawEscape(char),
    /// После закрывающей кавычки, до разделителя.
    AfterQuoted,
}

/// Разбивает одну строку на поля.
///
/// Пустая строка дает ноль полей. Завершающий разделитель дает пустое
/// последнее поле: `a,b,` -> `["a", "b", ""]`.
pub fn tokenize(line: &str) -> Record {
    let mut fields = Vec::new();
    if line.is_empty() {
        return fields;
    }

    let mut state = State::OutsideField;
    let mut field = String::new();
    let mut leading = String::new();

    for (i, c) in line.char_indices() {
        state = match (state, c) {
            (State::OutsideField, DELIMITER) => {
                fields.push(mem::take(&mut leading));
                State::OutsideField
            }
            (State::OutsideField, '"' | '\'') => {
                leading.clear();
                State::InQuoted(c)
            }
            (State::OutsideField, c) if c.is_whitespace() => {
                leading.push(c);
                State::OutsideField
            }
            (State::OutsideField, c) => {
                field = mem::take(&mut leading);
                field.push(c);
                State::InUnquoted
            }
            (State::InUnquoted, DELIMITER) | (State::AfterQuoted, DELIMITER) => {
                fields.push(mem::take(&mut field));
                State::OutsideField
            }
            (State::InUnquoted, c) => {
                field.push(c);
                State::InUnquoted
            }
            (State::InQuoted(quote), '\\') => {
                field.push('\\');
                State::SawEscape(quote)
            }
            (State::InQuoted(quote), c)
                if c == quote && closes_quoted(&line[i + c.len_utf8()..], quote) =>
            {
                State::AfterQuoted
            }
            (State::InQuoted(quote), c) | (State::SawEscape(quote), c) => {
                field.push(c);
                State::InQuoted(quote)
            }
            // До разделителя после закрывающей кавычки идут только пробелы.
            (State::AfterQuoted, _) => State::AfterQuoted,
        };
    }

    match state {
        State::OutsideField => fields.push(leading),
        State::InQuoted(_) | State::SawEscape(_) => {
            tracing::trace!("Незакрытая кавычка, поле взято до конца строки: {:?}", field);
            fields.push(field);
        }
        State::InUnquoted | State::AfterQuoted => fields.push(field),
    }

    fields
}

/// Остаток строки за разделителем, если `rest` начинается с пробелов и
/// разделителя; пустой остаток, если дальше только пробелы.
fn field_end(rest: &str) -> Option<&str> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(DELIMITER)
    }
}

/// Смещения сразу за неэкранированными кавычками `quote`.
fn quote_ends(s: &str, quote: char) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            ends.push(i + c.len_utf8());
        }
    }

    ends
}

/// Закрывает ли кавычка поле, если за ней следует `rest`.
///
/// Кавычка закрывает поле, когда за ней идет конец поля и в остатке
/// строки кавычки парные, либо когда дальше закрыть поле уже нечем.
/// Так `"say "hi", ok"` читается как одно поле, а `"a","b"` - как два.
fn closes_quoted(rest: &str, quote: char) -> bool {
    let tail = match field_end(rest) {
        Some(tail) => tail,
        None => return false,
    };

    let ends = quote_ends(tail, quote);
    ends.len() % 2 == 0 || !ends.iter().any(|&end| field_end(&tail[end..]).is_some())
}

/// Разбирает текст целиком, по записи на строку.
pub fn parse(content: &str) -> Vec<Record> {
    content.lines().map(tokenize).collect()
}

/// Потоковый читатель записей: читает по одной строке за раз.
pub struct CsvReader<R> {
    reader: R,
    buffer: String,
    line_number: u64,
    failed: bool,
}

impl<R: Read> CsvReader<BufReader<R>> {
    /// Создает читатель из любого источника, реализующего трейт Read.
    pub fn from_read(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Создает читатель поверх буферизованного источника.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
            failed: false,
        }
    }

    /// Номер последней прочитанной строки (с единицы).
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Читает следующую запись; `None` в конце ввода.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = self.buffer.trim_end_matches(['\r', '\n']);
        Ok(Some(tokenize(line)))
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
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
