use std::{
    convert::Infallible,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::LevelFilter;
use thiserror::Error;

pub type Lines = Box<dyn Iterator<Item = io::Result<String>>>;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unable to open input file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub fn lines(&self) -> Result<Lines, InputError> {
        match self {
            Self::File(path) => Ok(Box::new(read_input_lines(path)?)),
            Self::Stdin => Ok(Box::new(io::stdin().lines())),
        }
    }
}

impl Default for InputSource {
    fn default() -> Self {
        Self::File(PathBuf::from("input.txt"))
    }
}

impl FromStr for InputSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Stdin),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

pub fn read_input_lines(
    path: impl AsRef<Path>,
) -> Result<io::Lines<BufReader<File>>, InputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("opened {}", path.display());

    Ok(BufReader::new(file).lines())
}

pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("-", InputSource::Stdin)]
    #[case("input.txt", InputSource::File(PathBuf::from("input.txt")))]
    #[case("../input.txt", InputSource::File(PathBuf::from("../input.txt")))]
    fn parse_source(#[case] input: &str, #[case] expected: InputSource) {
        assert_eq!(input.parse::<InputSource>().unwrap(), expected);
    }

    #[test]
    fn default_source_is_input_txt() {
        assert_eq!(InputSource::default().to_string(), "input.txt");
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let res = read_input_lines(&path);

        match res {
            Err(InputError::Open { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            Ok(_) => panic!("expected open error"),
        }
    }

    #[test]
    fn reads_lines_without_terminators() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1abc2\r\npqr3stu8vwx\n\nlast").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        let lines = source
            .lines()
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(lines, vec!["1abc2", "pqr3stu8vwx", "", "last"]);
    }

    #[test]
    fn lines_outlive_the_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a1\nb2").unwrap();

        let lines = {
            let source = InputSource::File(file.path().to_path_buf());
            source.lines().unwrap()
        };

        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn long_lines_are_not_truncated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let long = format!("7{}3", "x".repeat(10_000));
        writeln!(file, "{long}").unwrap();

        let lines = read_input_lines(file.path())
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(lines, vec![long]);
    }
}
