//! Cell parsers: one pure function per parseable datatype, evaluated in a
//! fixed priority order. The date datatypes have no parser and are never
//! inferred. A parser either yields a typed value or a
//! [`ParseFailure`]; failures only ever count as a lost vote.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::types::DataType;

/// A successfully parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

/// The cell does not fit the parser's grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a {datatype} value: {cell:?}")]
pub struct ParseFailure {
    pub datatype: DataType,
    pub cell: String,
}

impl ParseFailure {
    fn new(datatype: DataType, cell: &str) -> Self {
        Self {
            datatype,
            cell: cell.to_string(),
        }
    }
}

pub type ParseOutcome = Result<CellValue, ParseFailure>;

/// A parser tagged with the datatype it stands for.
#[derive(Clone, Copy)]
pub struct CellParser {
    pub datatype: DataType,
    parse: fn(&str) -> ParseOutcome,
}

impl CellParser {
    pub fn parse(&self, cell: &str) -> ParseOutcome {
        (self.parse)(cell)
    }
}

impl fmt::Debug for CellParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellParser")
            .field("datatype", &self.datatype)
            .finish_non_exhaustive()
    }
}

/// Every parser, highest priority first. `text` must stay last.
pub static CELL_PARSERS: [CellParser; 3] = [
    CellParser {
        datatype: DataType::NumberEu,
        parse: parse_number_eu,
    },
    CellParser {
        datatype: DataType::NumberUs,
        parse: parse_number_us,
    },
    CellParser {
        datatype: DataType::Text,
        parse: parse_text,
    },
];

static NUMBER_EU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?)(\d{1,3}(?:(?:\.\d{3})*|(?:\d{3})*))(?:,(\d+))?$")
        .expect("number+eu pattern")
});

static NUMBER_US: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?)(\d{1,3}(?:(?:,\d{3})*|(?:\d{3})*))(?:\.(\d+))?$")
        .expect("number+us pattern")
});

/// `1.234.567,89` style: `.` groups thousands, `,` starts the fraction.
pub fn parse_number_eu(s: &str) -> ParseOutcome {
    parse_grouped_number(s, &NUMBER_EU, '.', DataType::NumberEu)
}

/// `1,234,567.89` style: `,` groups thousands, `.` starts the fraction.
pub fn parse_number_us(s: &str) -> ParseOutcome {
    parse_grouped_number(s, &NUMBER_US, ',', DataType::NumberUs)
}

fn parse_grouped_number(
    s: &str,
    re: &Regex,
    grouping: char,
    datatype: DataType,
) -> ParseOutcome {
    let caps = re.captures(s).ok_or_else(|| ParseFailure::new(datatype, s))?;

    let negative = &caps[1] == "-";
    let integral: String = caps[2].chars().filter(|c| *c != grouping).collect();
    let fraction = caps.get(3).map_or("", |m| m.as_str());

    // fraction scaled by 10^-len(digits), so "05" is 0.05 and "0" is 0
    let magnitude = if fraction.is_empty() {
        integral.parse::<f64>()
    } else {
        format!("{integral}.{fraction}").parse::<f64>()
    }
    .map_err(|_| ParseFailure::new(datatype, s))?;

    Ok(CellValue::Number(if negative { -magnitude } else { magnitude }))
}

/// Always succeeds.
pub fn parse_text(s: &str) -> ParseOutcome {
    Ok(CellValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(outcome: ParseOutcome) -> f64 {
        match outcome {
            Ok(CellValue::Number(n)) => n,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn eu_numbers() {
        assert_eq!(number(parse_number_eu("1.234,5")), 1234.5);
        assert_eq!(number(parse_number_eu("10,0")), 10.0);
        assert_eq!(number(parse_number_eu("-3")), -3.0);
        assert_eq!(number(parse_number_eu("+1.000.000")), 1_000_000.0);
        assert_eq!(number(parse_number_eu("1234567")), 1_234_567.0);
        assert_eq!(number(parse_number_eu("31,5")), 31.5);
    }

    #[test]
    fn eu_rejects_us_and_malformed_input() {
        assert!(parse_number_eu("1,234.5").is_err());
        assert!(parse_number_eu("1.23").is_err());
        assert!(parse_number_eu("12.34,5").is_err());
        assert!(parse_number_eu("abc").is_err());
        assert!(parse_number_eu("").is_err());
        assert!(parse_number_eu(",5").is_err());
        assert!(parse_number_eu(" 1").is_err());
    }

    #[test]
    fn us_numbers() {
        assert_eq!(number(parse_number_us("1,234.5")), 1234.5);
        assert_eq!(number(parse_number_us("10.0")), 10.0);
        assert_eq!(number(parse_number_us("-3")), -3.0);
        assert!(parse_number_us("1.234,5").is_err());
        assert!(parse_number_us("1,23").is_err());
    }

    #[test]
    fn zero_fraction_is_well_defined() {
        assert_eq!(number(parse_number_eu("7,0")), 7.0);
        assert_eq!(number(parse_number_eu("7,000")), 7.0);
        assert_eq!(number(parse_number_us("0.0")), 0.0);
    }

    #[test]
    fn fraction_scales_by_digit_count() {
        assert!((number(parse_number_eu("0,05")) - 0.05).abs() < 1e-12);
        assert!((number(parse_number_us("2.250")) - 2.25).abs() < 1e-12);
    }

    #[test]
    fn sign_applies_to_fraction() {
        assert!((number(parse_number_eu("-3,5")) + 3.5).abs() < 1e-12);
        assert!((number(parse_number_us("-0.25")) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn pure_digits_fit_both_grammars() {
        assert_eq!(number(parse_number_eu("100")), 100.0);
        assert_eq!(number(parse_number_us("100")), 100.0);
    }

    #[test]
    fn text_is_total() {
        assert_eq!(parse_text(""), Ok(CellValue::Text(String::new())));
        assert_eq!(parse_text("Ana"), Ok(CellValue::Text("Ana".into())));
    }

    #[test]
    fn failure_names_datatype_and_cell() {
        let err = parse_number_us("x").unwrap_err();
        assert_eq!(err.datatype, DataType::NumberUs);
        assert_eq!(err.to_string(), "not a number+us value: \"x\"");
    }

    #[test]
    fn priority_order() {
        let order: Vec<DataType> = CELL_PARSERS.iter().map(|p| p.datatype).collect();
        assert_eq!(
            order,
            vec![DataType::NumberEu, DataType::NumberUs, DataType::Text]
        );
    }

    #[test]
    fn no_parser_claims_date_shapes() {
        for cell in ["2020-01-31", "31/01/2020", "01/31/2020"] {
            let accepted: Vec<DataType> = CELL_PARSERS
                .iter()
                .filter(|p| p.parse(cell).is_ok())
                .map(|p| p.datatype)
                .collect();
            assert_eq!(accepted, vec![DataType::Text], "{cell}");
        }
    }
}
