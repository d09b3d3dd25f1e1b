//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Utilities.
//!

use std::io::BufRead;

#[derive(Debug)]
pub enum AngleListError {
    Io(std::io::Error),
    /// Line number (1-based) and its contents.
    InvalidValue{ line: usize, text: String }
}

impl From<std::io::Error> for AngleListError {
    fn from(err: std::io::Error) -> AngleListError { AngleListError::Io(err) }
}

impl std::fmt::Display for AngleListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleListError::Io(err) => write!(f, "cannot read angle list: {}", err),
            AngleListError::InvalidValue{ line, text } => write!(f, "invalid angle in line {}: \"{}\"", line, text)
        }
    }
}

impl std::error::Error for AngleListError {}

/// Returns `count` values evenly spaced over [`start`, `stop`) (`stop` excluded).
pub fn linspace_degrees(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = if count > 0 { (stop - start) / count as f64 } else { 0.0 };
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Returns angles (degrees) read from `file_name`; see `parse_angle_list`.
pub fn load_angle_list_file(file_name: &str) -> Result<Vec<f64>, AngleListError> {
    let list_file = std::fs::OpenOptions::new().read(true).write(false).open(file_name)?;
    parse_angle_list(std::io::BufReader::new(list_file).lines())
}

/// Parses an angle list.
///
/// Each line contains one or more angles separated by whitespace. Empty lines are skipped;
/// everything after a `#` is ignored.
///
pub fn parse_angle_list<B: BufRead>(lines: std::io::Lines<B>) -> Result<Vec<f64>, AngleListError> {
    let mut angles = vec![];

    for (i, line) in lines.enumerate() {
        let line = line?;
        let contents = match line.find('#') {
            Some(pos) => &line[..pos],
            None => &line[..]
        };

        for token in contents.split_whitespace() {
            match token.parse::<f64>() {
                Ok(angle) if angle.is_finite() => angles.push(angle),
                _ => return Err(AngleListError::InvalidValue{ line: i + 1, text: token.to_string() })
            }
        }
    }

    Ok(angles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_excludes_endpoint() {
        assert_eq!(vec![0.0, 45.0, 90.0, 135.0], linspace_degrees(0.0, 180.0, 4));
        assert_eq!(vec![10.0], linspace_degrees(10.0, 20.0, 1));
        assert!(linspace_degrees(0.0, 180.0, 0).is_empty());

        let angles = linspace_degrees(0.0, 180.0, 200);
        assert_eq!(200, angles.len());
        assert!((angles[199] - 179.1).abs() < 1.0e-9);
    }

    #[test]
    fn given_valid_list_succeed() {
        let input =
r#"# projection angles
0 1.5
  2.5

# more
3  # three
-4e1"#;

        let angles = parse_angle_list(input.as_bytes().lines()).unwrap();
        assert_eq!(vec![0.0, 1.5, 2.5, 3.0, -40.0], angles);
    }

    #[test]
    fn given_empty_list_succeed() {
        assert!(parse_angle_list("".as_bytes().lines()).unwrap().is_empty());
        assert!(parse_angle_list("# nothing\n\n".as_bytes().lines()).unwrap().is_empty());
    }

    #[test]
    fn given_invalid_value_fail() {
        let input =
r#"0
1
two"#;

        match parse_angle_list(input.as_bytes().lines()) {
            Err(AngleListError::InvalidValue{ line, text }) => {
                assert_eq!(3, line);
                assert_eq!("two", text);
            },
            _ => panic!("invalid value not detected")
        }
    }

    #[test]
    fn given_non_finite_value_fail() {
        assert!(parse_angle_list("1\nNaN".as_bytes().lines()).is_err());
        assert!(parse_angle_list("inf".as_bytes().lines()).is_err());
    }

    #[test]
    fn given_nonexistent_file_fail() {
        match load_angle_list_file("/nonexistent/radontool/angles.txt") {
            Err(AngleListError::Io(_)) => (),
            _ => panic!("missing file not detected")
        }
    }
}
