//! Модуль обработки ошибок библиотеки.

use thiserror::Error;

/// Основной тип ошибки библиотеки.
#[derive(Debug, Error)]
pub enum Error {
    /// Ошибка ввода/вывода
    #[error("Ошибка ввода/вывода: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка разбора или записи в строгом CSV режиме
    #[error("Ошибка CSV: {0}")]
    Csv(#[from] ::csv::Error),

    /// Запрошенного поля нет в записи
    #[error("Поле {field} отсутствует в записи из {len} полей")]
    FieldOutOfRange { field: usize, len: usize },

    /// Значение поля не является конечным числом
    #[error("Некорректное число: {0:?}")]
    InvalidNumber(String),

    /// Локаль отсутствует во встроенной таблице
    #[error("Неизвестная локаль: {0}")]
    UnknownLocale(String),
}

/// Тип Result с ошибкой библиотеки.
pub type Result<T> = std::result::Result<T, Error>;
