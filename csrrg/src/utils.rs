use csv_core::{ReadFieldResult, ReaderBuilder, Terminator};

/// Checks if the line consists only of whitespace.
#[inline(always)]
pub fn is_blank_line(line: &str) -> bool {
    line.bytes().all(|b| b.is_ascii_whitespace() || b == b'\x0b')
}

/// Splits a delimited line into its fields.
///
/// Quoting is disabled, so every delimiter byte ends a field. Empty fields
/// are skipped, i.e., consecutive delimiters collapse into one. A carriage
/// return is kept in its field.
pub fn split_delimited(line: &str, delimiter: u8) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .build();
    let mut bytes = line.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { .. } => bytes.is_empty() && nin == 0,
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
        };
        if !field.is_empty() {
            fields.push(String::from_utf8_lossy(&field).into_owned());
            field.clear();
        }
        if end {
            break;
        }
    }
    fields
}

/// Parses the leading integer of a token in the manner of C's `atoi`.
///
/// Leading whitespace and one sign are accepted, then as many decimal digits
/// as possible are consumed. Anything after them is ignored, and a token
/// without digits yields 0. Values out of range saturate.
pub fn parse_leading_int(token: &str) -> i64 {
    let bytes = token.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank_line() {
        assert!(is_blank_line(""));
        assert!(is_blank_line(" \t \r"));
        assert!(!is_blank_line(" 0 "));
    }

    #[test]
    fn test_split_delimited() {
        assert_eq!(
            &["0", "1", "2", "0"],
            split_delimited("0;1;2;0", b';').as_slice()
        );
    }

    #[test]
    fn test_split_delimited_collapses_empty_fields() {
        assert_eq!(
            &["3", "4", "5"],
            split_delimited(";3;;4;5;", b';').as_slice()
        );
        assert!(split_delimited("", b';').is_empty());
    }

    #[test]
    fn test_split_delimited_ignores_quotes() {
        assert_eq!(
            &["\"1", "2\""],
            split_delimited("\"1;2\"", b';').as_slice()
        );
    }

    #[test]
    fn test_split_delimited_keeps_carriage_return() {
        assert_eq!(
            &["1\r2", "3"],
            split_delimited("1\r2;3", b';').as_slice()
        );
    }

    #[test]
    fn test_split_delimited_long_field() {
        let long = "7".repeat(10000);
        let line = format!("1;{long};2");
        let fields = split_delimited(&line, b';');
        assert_eq!(3, fields.len());
        assert_eq!(long, fields[1]);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(42, parse_leading_int("42"));
        assert_eq!(-7, parse_leading_int("  -7"));
        assert_eq!(12, parse_leading_int("+12abc"));
        assert_eq!(0, parse_leading_int("abc"));
        assert_eq!(0, parse_leading_int("-"));
        assert_eq!(i64::MAX, parse_leading_int("99999999999999999999999"));
    }
}
