//! CSV report command
//!
//! Reads the configured input table, sorts it by one column, keeps a subset
//! of columns, writes the result and prints every record.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::command::{Command, Flow, Session};
use crate::plugin::{Export, PluginEnv};
use crate::storage::CsvConfig;

/// Columns shown in each record's summary line
const ABBREVIATION_COLUMN: &str = "State Abbreviation";
const NAME_COLUMN: &str = "State Name";

pub fn exports(env: &PluginEnv<'_>) -> Result<Vec<Export>> {
    Ok(vec![Export::new(
        "CsvCommand",
        CsvCommand::new(env.config.csv.clone()),
    )])
}

/// An in-memory table: header row plus data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", line + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    fn column(&self, name: &str) -> Result<usize> {
        match self.headers.iter().position(|h| h == name) {
            Some(index) => Ok(index),
            None => bail!("Column '{}' not found", name),
        }
    }

    /// Sorts rows ascending by `column`: numerically when every value is a
    /// number, lexically otherwise
    pub fn sort_by(&mut self, column: &str) -> Result<()> {
        let index = self.column(column)?;
        let numeric: Option<Vec<f64>> = self
            .rows
            .iter()
            .map(|row| row.get(index).and_then(|v| v.trim().parse::<f64>().ok()))
            .collect();

        match numeric {
            Some(keys) => {
                let mut keyed: Vec<(f64, Vec<String>)> =
                    keys.into_iter().zip(self.rows.drain(..)).collect();
                keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
                self.rows = keyed.into_iter().map(|(_, row)| row).collect();
            }
            None => self
                .rows
                .sort_by(|a, b| a.get(index).cmp(&b.get(index))),
        }
        Ok(())
    }

    /// Keeps only `columns`, in that order
    pub fn project(&self, columns: &[String]) -> Result<Self> {
        let indices = columns
            .iter()
            .map(|c| self.column(c))
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self {
            headers: columns.to_vec(),
            rows,
        })
    }
}

pub struct CsvCommand {
    config: CsvConfig,
}

impl CsvCommand {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn read_sort_and_reduce(&self) -> Result<Table> {
        let mut table = Table::read(&self.config.input)?;
        table.sort_by(&self.config.sort_by)?;
        table.project(&self.config.columns)
    }

    /// Creates the data directory, or confirms it is writable
    fn prepare_data_dir(&self) -> Result<()> {
        let dir = &self.config.data_dir;
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            tracing::info!("The directory '{}' is created", dir.display());
        } else if fs::metadata(dir)?.permissions().readonly() {
            bail!("The directory '{}' is not writable.", dir.display());
        }
        Ok(())
    }
}

impl Command for CsvCommand {
    fn execute(&self, session: &mut Session<'_>) -> Result<Flow> {
        if let Err(err) = self.prepare_data_dir() {
            tracing::error!("{:#}", err);
            session.say(format!("{:#}", err));
            return Ok(Flow::Continue);
        }

        let table = match self.read_sort_and_reduce() {
            Ok(table) => table,
            Err(err) => {
                tracing::error!("Error processing the file: {:#}", err);
                session.say(format!("Error processing the file: {:#}", err));
                return Ok(Flow::Continue);
            }
        };

        let output = &self.config.output;
        table.write(output)?;
        tracing::info!("Processed data saved to '{}'", output.display());
        session.say(format!("Processed data saved to '{}'", output.display()));

        session.say(format!("States from CSV, sorted by {}", self.config.sort_by));
        let abbreviation = table.column(ABBREVIATION_COLUMN).ok();
        let name = table.column(NAME_COLUMN).ok();
        for (index, row) in table.rows.iter().enumerate() {
            let field = |column: Option<usize>| {
                column
                    .and_then(|i| row.get(i))
                    .map_or("", String::as_str)
            };
            let line = format!(
                "Record {}: {}: {}",
                index,
                field(abbreviation),
                field(name)
            );
            tracing::info!("{}", line);
            session.say(line);

            for (field, value) in table.headers.iter().zip(row) {
                let field_info = format!("    {}: {}", field, value);
                tracing::info!("Index: {}, {}", index, field_info);
                session.say(field_info);
            }
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScriptedConsole;
    use crate::command::HistoryRecorder;
    use crate::testing::with_captured_logs;
    use tempfile::TempDir;

    const STATES: &str = "\
State Abbreviation,State Name,Population,Capital
CA,California,39538223,Sacramento
TX,Texas,29145505,Austin
OR,Oregon,4237256,Salem
NY,New York,20201249,Albany
";

    fn config(dir: &Path) -> CsvConfig {
        let data_dir = dir.join("data");
        CsvConfig {
            input: data_dir.join("gpt_states.csv"),
            output: data_dir.join("sorted_states.csv"),
            data_dir,
            ..CsvConfig::default()
        }
    }

    fn run(config: CsvConfig) -> (String, String) {
        let mut console = ScriptedConsole::default();
        let mut history = HistoryRecorder::in_memory(3);
        let command = CsvCommand::new(config);
        let (flow, logs) = with_captured_logs(|| {
            command
                .execute(&mut Session::new(&mut console, &mut history))
                .unwrap()
        });
        assert_eq!(flow, Flow::Continue);
        (console.transcript().to_string(), logs)
    }

    #[test]
    fn numeric_sort_and_projection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("states.csv");
        fs::write(&path, STATES).unwrap();

        let mut table = Table::read(&path).unwrap();
        table.sort_by("Population").unwrap();
        let reduced = table
            .project(&["State Name".to_string(), "Population".to_string()])
            .unwrap();

        assert_eq!(reduced.headers, vec!["State Name", "Population"]);
        let names: Vec<_> = reduced.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Oregon", "New York", "Texas", "California"]);
    }

    #[test]
    fn lexical_sort_for_text_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("states.csv");
        fs::write(&path, STATES).unwrap();

        let mut table = Table::read(&path).unwrap();
        table.sort_by("Capital").unwrap();

        let capitals: Vec<_> = table.rows.iter().map(|r| r[3].as_str()).collect();
        assert_eq!(capitals, vec!["Albany", "Austin", "Sacramento", "Salem"]);
    }

    #[test]
    fn nan_values_sort_last() {
        let mut table = Table {
            headers: vec!["Name".to_string(), "Score".to_string()],
            rows: [("b", "NaN"), ("c", "3"), ("a", "-1"), ("d", "2.5")]
                .iter()
                .map(|(n, s)| vec![n.to_string(), s.to_string()])
                .collect(),
        };

        table.sort_by("Score").unwrap();

        let names: Vec<_> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let table = Table {
            headers: vec!["a".to_string()],
            rows: vec![],
        };
        assert!(table.project(&["b".to_string()]).is_err());
    }

    #[test]
    fn command_writes_and_prints_sorted_states() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(&config.input, STATES).unwrap();

        let (transcript, logs) = run(config.clone());

        assert!(transcript.contains("Processed data saved to"));
        assert!(transcript.contains("States from CSV, sorted by Population"));
        assert!(transcript.contains("Record 0: OR: Oregon"));
        assert!(transcript.contains("CA: California"));
        assert!(transcript.contains("    Population: 39538223"));
        assert!(logs.contains("Record 0: OR: Oregon"));

        let written = fs::read_to_string(&config.output).unwrap();
        assert!(written.starts_with("State Abbreviation,State Name,Population\nOR,Oregon,4237256\n"));
        assert!(!written.contains("Capital"));
    }

    #[test]
    fn summary_uses_named_columns_in_any_order() {
        let dir = TempDir::new().unwrap();
        let config = CsvConfig {
            columns: vec![
                "Population".to_string(),
                "State Name".to_string(),
                "State Abbreviation".to_string(),
            ],
            ..config(dir.path())
        };
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(&config.input, STATES).unwrap();

        let (transcript, _) = run(config);

        assert!(transcript.contains("Record 0: OR: Oregon"));
        assert!(transcript.contains("Record 3: CA: California"));
    }

    #[test]
    fn missing_data_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let config = config(dir.path());

        let (transcript, logs) = run(config.clone());

        assert!(config.data_dir.is_dir());
        assert!(logs.contains("is created"));
        assert!(transcript.contains("Error processing the file"));
    }
}
