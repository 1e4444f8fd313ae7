//! ISO 4217 lookup: alphabetic code → numeric code and minor-unit exponent

/// (alpha, numeric, exponent)
const CURRENCIES: &[(&str, &str, u32)] = &[
    ("AED", "784", 2),
    ("AUD", "036", 2),
    ("BHD", "048", 3),
    ("BRL", "986", 2),
    ("CAD", "124", 2),
    ("CHF", "756", 2),
    ("CLP", "152", 0),
    ("CNY", "156", 2),
    ("DKK", "208", 2),
    ("EUR", "978", 2),
    ("GBP", "826", 2),
    ("HKD", "344", 2),
    ("INR", "356", 2),
    ("ISK", "352", 0),
    ("JOD", "400", 3),
    ("JPY", "392", 0),
    ("KRW", "410", 0),
    ("KWD", "414", 3),
    ("MXN", "484", 2),
    ("NOK", "578", 2),
    ("NZD", "554", 2),
    ("OMR", "512", 3),
    ("SEK", "752", 2),
    ("SGD", "702", 2),
    ("TND", "788", 3),
    ("USD", "840", 2),
    ("VND", "704", 0),
    ("ZAR", "710", 2),
];

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, u32)> {
    CURRENCIES
        .iter()
        .find(|(alpha, _, _)| alpha.eq_ignore_ascii_case(code))
}

/// Minor-unit exponent; currencies outside the table default to 2
pub fn exponent(code: &str) -> u32 {
    lookup(code).map(|(_, _, exp)| *exp).unwrap_or(2)
}

/// ISO 4217 numeric code, if the currency is known
pub fn numeric_code(code: &str) -> Option<&'static str> {
    lookup(code).map(|(_, numeric, _)| *numeric)
}
