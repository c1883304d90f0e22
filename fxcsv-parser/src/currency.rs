//! Форматирование денежных сумм по соглашениям локали.
//!
//! Повторяет поведение `localeconv`/`strfmon` для денежной категории,
//! но получает все настройки через [`CurrencyFormat`] и не трогает
//! глобальную локаль процесса.

use crate::types::{CurrencyFormat, SignPosition, SymbolPosition};

/// Форматирует сумму как денежное значение.
///
/// Число знаков после запятой берется из `int_frac_digits` или
/// `frac_digits` в зависимости от `format.international`. Код валюты
/// в международном формате всегда отделяется от значения пробелом.
///
/// Знак для позиций 3 и 4 (`BeforeValue`, `AfterValue`) ставится рядом
/// со значением, а не с символом валюты, как в `locale.currency` Python.
pub fn format_currency(amount: f64, format: &CurrencyFormat) -> String {
    let locale = &format.locale;
    let conv = if amount < 0.0 {
        &locale.negative
    } else {
        &locale.positive
    };

    let digits = if format.international {
        locale.int_frac_digits
    } else {
        locale.frac_digits
    };

    let rendered = format!("{:.*}", digits as usize, amount.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut value = if format.grouping {
        group_digits(int_part, locale.grouping, locale.thousands_sep)
    } else {
        int_part.to_string()
    };
    if let Some(frac) = frac_part {
        value.push_str(locale.decimal_point);
        value.push_str(frac);
    }

    let symbol = if !format.symbol {
        ""
    } else if format.international {
        locale.int_curr_symbol
    } else {
        locale.currency_symbol
    };

    let sign = conv.sign;
    let value = match conv.sign_posn {
        SignPosition::BeforeValue => format!("{}{}", sign, value),
        SignPosition::AfterValue => format!("{}{}", value, sign),
        _ => value,
    };

    let body = if symbol.is_empty() {
        value
    } else {
        let precedes = match format.symbol_position {
            SymbolPosition::Prefix => true,
            SymbolPosition::Suffix => false,
            SymbolPosition::Locale => conv.cs_precedes,
        };
        let separator = if format.international || conv.sep_by_space {
            " "
        } else {
            ""
        };

        if precedes {
            format!("{}{}{}", symbol, separator, value)
        } else {
            format!("{}{}{}", value, separator, symbol)
        }
    };

    match conv.sign_posn {
        SignPosition::Parentheses => format!("({})", body),
        SignPosition::BeforeAll => format!("{}{}", sign, body),
        SignPosition::AfterAll => format!("{}{}", body, sign),
        SignPosition::BeforeValue | SignPosition::AfterValue => body,
    }
}

/// Разбивает строку цифр на группы справа налево.
fn group_digits(digits: &str, size: u8, separator: &str) -> String {
    let size = size as usize;
    if size == 0 || separator.is_empty() || digits.len() <= size {
        return digits.to_string();
    }

    let head = match digits.len() % size {
        0 => size,
        n => n,
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / size * separator.len());
    grouped.push_str(&digits[..head]);

    let mut pos = head;
    while pos < digits.len() {
        grouped.push_str(separator);
        grouped.push_str(&digits[pos..pos + size]);
        pos += size;
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Locale, NARROW_NBSP};

    fn format_for(tag: &str) -> CurrencyFormat {
        CurrencyFormat::with_locale(tag.parse().unwrap())
    }

    #[test]
    fn test_default_french_format() {
        let format = CurrencyFormat::default();
        assert_eq!(format_currency(15.0, &format), "15,00");
        assert_eq!(format_currency(0.0, &format), "0,00");
        assert_eq!(format_currency(501.0, &format), "501,00");
    }

    #[test]
    fn test_french_grouping() {
        let format = CurrencyFormat::default();
        let expected = format!("1{0}234{0}567,89", NARROW_NBSP);
        assert_eq!(format_currency(1234567.891, &format), expected);
    }

    #[test]
    fn test_grouping_disabled() {
        let format = CurrencyFormat {
            grouping: false,
            ..CurrencyFormat::default()
        };
        assert_eq!(format_currency(1234567.891, &format), "1234567,89");
    }

    #[test]
    fn test_german_and_american_separators() {
        assert_eq!(format_currency(1234.5, &format_for("de_DE")), "1.234,50");
        assert_eq!(format_currency(1234.5, &format_for("en_US")), "1,234.50");
        assert_eq!(format_currency(999.999, &format_for("en_US")), "1,000.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(-12.5, &CurrencyFormat::default()), "-12,50");
        assert_eq!(format_currency(-1234.5, &format_for("en_US")), "-1,234.50");
    }

    #[test]
    fn test_international_symbol_prefix() {
        let format = CurrencyFormat {
            symbol: true,
            ..CurrencyFormat::default()
        };
        assert_eq!(format_currency(12.5, &format), "EUR 12,50");
        assert_eq!(format_currency(-12.5, &format), "-EUR 12,50");
    }

    #[test]
    fn test_symbol_suffix() {
        let format = CurrencyFormat {
            symbol: true,
            symbol_position: SymbolPosition::Suffix,
            ..CurrencyFormat::default()
        };
        assert_eq!(format_currency(12.5, &format), "12,50 EUR");
    }

    #[test]
    fn test_local_symbol_in_locale_position() {
        let french = CurrencyFormat {
            symbol: true,
            symbol_position: SymbolPosition::Locale,
            international: false,
            ..CurrencyFormat::default()
        };
        assert_eq!(format_currency(12.5, &french), "12,50 €");

        let american = CurrencyFormat {
            locale: "en_US".parse().unwrap(),
            ..french
        };
        assert_eq!(format_currency(1234.5, &american), "$1,234.50");
        assert_eq!(format_currency(-1234.5, &american), "-$1,234.50");
    }

    #[test]
    fn test_yen_has_no_fraction() {
        let format = format_for("ja_JP");
        assert_eq!(format_currency(1234.4, &format), "1,234");
        assert_eq!(format_currency(-1234.4, &format), "1,234-");

        let with_symbol = CurrencyFormat {
            symbol: true,
            symbol_position: SymbolPosition::Locale,
            international: false,
            ..format
        };
        assert_eq!(format_currency(-1234.4, &with_symbol), "￥1,234-");
        assert_eq!(format_currency(1234.4, &with_symbol), "￥1,234");
    }

    #[test]
    fn test_posix_locale() {
        let format = CurrencyFormat {
            symbol: true,
            ..CurrencyFormat::with_locale(Locale::lookup("C").copied().unwrap())
        };
        assert_eq!(format_currency(1234.5, &format), "1234.50");
        assert_eq!(format_currency(-1234.5, &format), "-1234.50");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", 3, ","), "1");
        assert_eq!(group_digits("123", 3, ","), "123");
        assert_eq!(group_digits("1234", 3, ","), "1,234");
        assert_eq!(group_digits("123456", 3, ","), "123,456");
        assert_eq!(group_digits("1234567", 3, ","), "1,234,567");
        assert_eq!(group_digits("1234567", 0, ","), "1234567");
    }
}
