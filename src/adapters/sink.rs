use crate::core::{Milestone, MilestoneSink};
use crate::utils::error::{PrimeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// One decimal prime per line
    #[default]
    Text,
    /// `count,prime` rows with a header
    Csv,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["text", "csv", "json"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = PrimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(PrimeError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: format!("Allowed values: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

enum Encoder<W: Write> {
    Text(W),
    Csv(csv::Writer<W>),
    Json(W),
}

/// Writes milestones to any `Write` in the chosen format.
pub struct WriterSink<W: Write> {
    encoder: Encoder<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        let encoder = match format {
            OutputFormat::Text => Encoder::Text(writer),
            OutputFormat::Csv => Encoder::Csv(csv::Writer::from_writer(writer)),
            OutputFormat::Json => Encoder::Json(writer),
        };
        Self { encoder }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        match self.encoder {
            Encoder::Text(mut w) | Encoder::Json(mut w) => {
                w.flush()?;
                Ok(w)
            }
            Encoder::Csv(w) => w
                .into_inner()
                .map_err(|e| PrimeError::IoError(e.into_error())),
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl WriterSink<BufWriter<File>> {
    /// Creates (or truncates) `path`, making parent directories as needed.
    pub fn create_file<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        tracing::debug!("Writing {} milestones to {}", format, path.display());
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write> MilestoneSink for WriterSink<W> {
    fn notify(&mut self, milestone: &Milestone) -> Result<()> {
        match &mut self.encoder {
            Encoder::Text(w) => writeln!(w, "{}", milestone.prime)?,
            Encoder::Csv(w) => w.serialize(milestone)?,
            Encoder::Json(w) => {
                serde_json::to_writer(&mut *w, milestone).map_err(|e| {
                    if e.is_io() {
                        PrimeError::IoError(e.into())
                    } else {
                        PrimeError::SerializationError(e)
                    }
                })?;
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match &mut self.encoder {
            Encoder::Text(w) | Encoder::Json(w) => w.flush()?,
            Encoder::Csv(w) => w.flush()?,
        }
        Ok(())
    }
}

/// Keeps every milestone in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    milestones: Vec<Milestone>,
    finished: bool,
}

impl CollectingSink {
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn primes(&self) -> Vec<u64> {
        self.milestones.iter().map(|m| m.prime).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_milestones(self) -> Vec<Milestone> {
        self.milestones
    }
}

impl MilestoneSink for CollectingSink {
    fn notify(&mut self, milestone: &Milestone) -> Result<()> {
        self.milestones.push(*milestone);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn render(format: OutputFormat) -> String {
        let mut sink = WriterSink::new(Vec::new(), format);
        sink.notify(&Milestone { count: 4, prime: 11 }).unwrap();
        sink.notify(&Milestone { count: 8, prime: 23 }).unwrap();
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_text_format() {
        assert_eq!(render(OutputFormat::Text), "11\n23\n");
    }

    #[test]
    fn test_csv_format() {
        assert_eq!(render(OutputFormat::Csv), "count,prime\n4,11\n8,23\n");
    }

    #[test]
    fn test_json_format() {
        assert_eq!(
            render(OutputFormat::Json),
            "{\"count\":4,\"prime\":11}\n{\"count\":8,\"prime\":23}\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_write_failure_is_output_error_in_every_format() {
        for format in [OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json] {
            let mut sink = WriterSink::new(ClosedPipe, format);
            // csv buffers internally, so the failure may only surface on flush
            let err = sink
                .notify(&Milestone { count: 4, prime: 11 })
                .and_then(|_| sink.finish())
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Output, "{}", format);
            assert_eq!(err.exit_code(), 2, "{}", format);
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_create_file_makes_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/milestones.txt");

        let mut sink = WriterSink::create_file(&path, OutputFormat::Text).unwrap();
        sink.notify(&Milestone { count: 1, prime: 3 }).unwrap();
        sink.finish().unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3\n");
    }
}
