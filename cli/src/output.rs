//! Output utilities for CLI tools.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};

use serde::Serialize;

/// Output format for structured results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }
}

/// Output configuration.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<String>,
}

impl Output {
    /// Creates a new output configuration. `None` writes to stdout.
    pub fn new(format: OutputFormat, file: Option<String>) -> Self {
        Self { format, file }
    }

    fn sink(&self) -> io::Result<Box<dyn Write>> {
        Ok(match &self.file {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout().lock()),
        })
    }

    /// Writes a serializable value in the configured format.
    pub fn write<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
        };

        self.sink()?.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Writes one line per item, ignoring the format.
    pub fn write_lines<I>(&self, lines: I) -> anyhow::Result<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let mut sink = self.sink()?;
        for line in lines {
            writeln!(sink, "{}", line)?;
        }
        sink.flush()?;
        Ok(())
    }
}

/// Prints verbose output if enabled.
pub fn print_verbose(enabled: bool, message: &str) {
    if enabled {
        eprintln!("[verbose] {}", message);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints warning message.
pub fn print_warning(msg: &str) {
    eprintln!("\x1b[33m⚠\x1b[0m {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        path: &'static str,
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let out = Output::new(OutputFormat::Json, Some(path.to_string_lossy().into_owned()));

        out.write(&vec![Row { id: 22, path: "s3/2" }]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["id"], 22);
        assert_eq!(value[0]["path"], "s3/2");
    }

    #[test]
    fn test_write_yaml_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yaml");
        let out = Output::new(OutputFormat::Yaml, Some(path.to_string_lossy().into_owned()));

        out.write(&Row { id: 1, path: "s1/1" }).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "id: 1\npath: s1/1\n");
    }

    #[test]
    fn test_write_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let out = Output::new(OutputFormat::default(), Some(path.to_string_lossy().into_owned()));

        out.write_lines(["s3/2", "s3/4"]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "s3/2\ns3/4\n");
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Yaml);
    }
}
