//! Базовые типы данных: запись CSV, локали и настройки денежного формата.

use crate::error::Error;

/// Запись CSV: поля в порядке следования столбцов.
pub type Record = Vec<String>;

// =============================================================================
// Константы
// =============================================================================

/// Локаль по умолчанию.
pub const DEFAULT_LOCALE: &str = "fr_FR";

/// Узкий неразрывный пробел, разделитель групп разрядов во французской
/// и русской локалях glibc.
pub const NARROW_NBSP: &str = "\u{202f}";

// =============================================================================
// Денежные соглашения локали
// =============================================================================

/// Положение знака числа (аналог `p_sign_posn` / `n_sign_posn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPosition {
    /// Значение и символ в скобках.
    Parentheses,
    /// Знак перед значением и символом.
    BeforeAll,
    /// Знак после значения и символа.
    AfterAll,
    /// Знак сразу перед значением.
    BeforeValue,
    /// Знак сразу после значения.
    AfterValue,
}

/// Оформление суммы одного знака.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignStyle {
    /// Символ валюты стоит перед значением.
    pub cs_precedes: bool,
    /// Символ отделен от значения пробелом.
    pub sep_by_space: bool,
    /// Положение знака.
    pub sign_posn: SignPosition,
    /// Строка знака (`""` или `"-"`).
    pub sign: &'static str,
}

/// Денежные соглашения локали (подмножество `localeconv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Имя локали, например `fr_FR`.
    pub name: &'static str,
    /// Десятичный разделитель.
    pub decimal_point: &'static str,
    /// Разделитель групп разрядов.
    pub thousands_sep: &'static str,
    /// Размер группы разрядов, 0 - без группировки.
    pub grouping: u8,
    /// Местный символ валюты.
    pub currency_symbol: &'static str,
    /// Код валюты ISO 4217.
    pub int_curr_symbol: &'static str,
    /// Число знаков после запятой для местного формата.
    pub frac_digits: u8,
    /// Число знаков после запятой для международного формата.
    pub int_frac_digits: u8,
    /// Оформление положительных сумм.
    pub positive: SignStyle,
    /// Оформление отрицательных сумм.
    pub negative: SignStyle,
}

const fn style(
    cs_precedes: bool,
    sep_by_space: bool,
    sign_posn: SignPosition,
    sign: &'static str,
) -> SignStyle {
    SignStyle {
        cs_precedes,
        sep_by_space,
        sign_posn,
        sign,
    }
}

const EURO_SUFFIX: SignStyle = style(false, true, SignPosition::BeforeAll, "");
const EURO_SUFFIX_NEG: SignStyle = style(false, true, SignPosition::BeforeAll, "-");
const PREFIX: SignStyle = style(true, false, SignPosition::BeforeAll, "");
const PREFIX_NEG: SignStyle = style(true, false, SignPosition::BeforeAll, "-");

/// Встроенная таблица локалей (значения glibc).
pub const LOCALES: &[Locale] = &[
    Locale {
        name: "fr_FR",
        decimal_point: ",",
        thousands_sep: NARROW_NBSP,
        grouping: 3,
        currency_symbol: "€",
        int_curr_symbol: "EUR",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: EURO_SUFFIX,
        negative: EURO_SUFFIX_NEG,
    },
    Locale {
        name: "de_DE",
        decimal_point: ",",
        thousands_sep: ".",
        grouping: 3,
        currency_symbol: "€",
        int_curr_symbol: "EUR",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: EURO_SUFFIX,
        negative: EURO_SUFFIX_NEG,
    },
    Locale {
        name: "ru_RU",
        decimal_point: ",",
        thousands_sep: NARROW_NBSP,
        grouping: 3,
        currency_symbol: "₽",
        int_curr_symbol: "RUB",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: EURO_SUFFIX,
        negative: EURO_SUFFIX_NEG,
    },
    Locale {
        name: "en_US",
        decimal_point: ".",
        thousands_sep: ",",
        grouping: 3,
        currency_symbol: "$",
        int_curr_symbol: "USD",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: PREFIX,
        negative: PREFIX_NEG,
    },
    Locale {
        name: "en_GB",
        decimal_point: ".",
        thousands_sep: ",",
        grouping: 3,
        currency_symbol: "£",
        int_curr_symbol: "GBP",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: PREFIX,
        negative: PREFIX_NEG,
    },
    Locale {
        name: "ja_JP",
        decimal_point: ".",
        thousands_sep: ",",
        grouping: 3,
        currency_symbol: "￥",
        int_curr_symbol: "JPY",
        frac_digits: 0,
        int_frac_digits: 0,
        positive: PREFIX,
        negative: style(true, false, SignPosition::AfterValue, "-"),
    },
    Locale {
        name: "C",
        decimal_point: ".",
        thousands_sep: "",
        grouping: 0,
        currency_symbol: "",
        int_curr_symbol: "",
        frac_digits: 2,
        int_frac_digits: 2,
        positive: style(true, false, SignPosition::BeforeAll, ""),
        negative: style(true, false, SignPosition::BeforeAll, "-"),
    },
];

impl Locale {
    /// Ищет локаль по имени.
    ///
    /// Кодировка и модификатор отбрасываются, `-` равнозначен `_`:
    /// `fr_FR`, `fr_FR.UTF-8` и `fr-fr` дают одну и ту же локаль.
    /// `POSIX` - синоним `C`.
    pub fn lookup(tag: &str) -> Option<&'static Locale> {
        let base = tag
            .split(['.', '@'])
            .next()
            .unwrap_or("")
            .trim()
            .replace('-', "_");
        let base = if base.eq_ignore_ascii_case("POSIX") {
            "C".to_string()
        } else {
            base
        };

        LOCALES.iter().find(|l| l.name.eq_ignore_ascii_case(&base))
    }
}

impl Default for Locale {
    fn default() -> Self {
        LOCALES[0]
    }
}

impl std::str::FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::lookup(s)
            .copied()
            .ok_or_else(|| Error::UnknownLocale(s.to_string()))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// Настройки денежного формата
// =============================================================================

/// Где печатать символ валюты.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolPosition {
    /// Перед значением, независимо от локали.
    #[default]
    Prefix,
    /// После значения, независимо от локали.
    Suffix,
    /// Как принято в локали.
    Locale,
}

/// Настройки форматирования денежной суммы.
///
/// Передаются явно при каждом вызове, глобальное состояние процесса
/// не используется.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyFormat {
    /// Денежные соглашения.
    pub locale: Locale,
    /// Печатать символ валюты.
    pub symbol: bool,
    /// Положение символа валюты.
    pub symbol_position: SymbolPosition,
    /// Группировать разряды.
    pub grouping: bool,
    /// Международный формат: код ISO 4217 и `int_frac_digits`.
    pub international: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            symbol: false,
            symbol_position: SymbolPosition::Prefix,
            grouping: true,
            international: true,
        }
    }
}

impl CurrencyFormat {
    /// Создает настройки по умолчанию для указанной локали.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }
}
