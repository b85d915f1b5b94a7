use std::{
    fs::{self, File},
    io::{self, BufWriter, Read as _, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use gridpath_engine::Grid;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default `warn` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Destination of command output: stdout or a buffered file.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path`, or to stdout when it is `None`.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Output::Stdout {
                writer: io::stdout().lock(),
            });
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let target = self.display_path();
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to finish writing {target}"))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads a grid in text format from `path`, or from stdin when `path` is `None`.
///
/// Search markings left in the file are cleared.
pub fn read_grid(path: Option<&Path>) -> anyhow::Result<Grid> {
    let (text, source) = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read grid file: {}", path.display()))?;
            (text, path.display().to_string())
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read grid from stdin")?;
            (text, "stdin".to_owned())
        }
    };
    let mut grid: Grid = text
        .parse()
        .with_context(|| format!("Failed to parse grid from {source}"))?;
    grid.clear_markings();

    if grid.start().is_none() {
        tracing::warn!(%source, "grid has no start cell");
    }
    if grid.goal().is_none() {
        tracing::warn!(%source, "grid has no goal cell");
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_json_and_read_grid_from_files() {
        let dir = std::env::temp_dir().join(format!("gridpath-util-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("value.json");
        Output::save_json(&serde_json::json!({ "steps": 3 }), Some(json_path.clone())).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written["steps"], 3);

        let grid_path = dir.join("grid.txt");
        fs::write(&grid_path, "So.\n.aG\n").unwrap();
        let grid = read_grid(Some(&grid_path)).unwrap();
        assert_eq!(grid.to_string(), "S..\n..G\n");

        assert!(read_grid(Some(&dir.join("missing.txt"))).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
