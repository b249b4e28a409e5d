/// Open scripts: line-based input that drives a percolation model
///
/// ```text
/// # comment
/// 1 3      open (row 1, col 3)
/// 7        open flat index 7
/// ```
use crate::error::{PercolationError, Result as ModelResult};
use crate::percolation::PercolationModel;
use anyhow::{bail, Context, Result};
use log::debug;
use std::io::BufRead;

/// A single open request, as written in the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenCommand {
    /// 1-based flat index
    Index(i64),
    /// 1-based (row, col)
    At(i64, i64),
}

/// Outcome of replaying a script against a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Replay {
    /// Commands applied
    pub steps: usize,
    /// 1-based step at which the model first percolated
    pub percolated_at_step: Option<usize>,
    /// Open sites at that step
    pub percolated_with_open_sites: Option<usize>,
}

fn parse_field(field: &str, line_no: usize) -> Result<i64> {
    field
        .parse::<i64>()
        .with_context(|| format!("line {line_no}: invalid integer '{field}'"))
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<OpenCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [idx] => Ok(Some(OpenCommand::Index(parse_field(idx, line_no)?))),
        [row, col] => Ok(Some(OpenCommand::At(
            parse_field(row, line_no)?,
            parse_field(col, line_no)?,
        ))),
        _ => bail!(
            "line {line_no}: expected 'INDEX' or 'ROW COL', got {} fields",
            fields.len()
        ),
    }
}

/// Parse a whole script
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<OpenCommand>> {
    let mut commands = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", i + 1))?;
        if let Some(command) = parse_line(&line, i + 1)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

fn to_coordinate(model: &PercolationModel, value: i64) -> ModelResult<usize> {
    usize::try_from(value).map_err(|_| {
        PercolationError::InvalidArgument(format!(
            "coordinate {value} is not between 1 and {}",
            model.size()
        ))
    })
}

/// Open one cell described by a command
pub fn open(model: &mut PercolationModel, command: OpenCommand) -> ModelResult<()> {
    match command {
        OpenCommand::Index(idx) => {
            let idx = model.grid().index_from_signed(idx)?;
            model.open(idx)
        }
        OpenCommand::At(row, col) => {
            let row = to_coordinate(model, row)?;
            let col = to_coordinate(model, col)?;
            model.open_at(row, col)
        }
    }
}

/// Apply commands in order, recording when the model first percolates
pub fn apply(model: &mut PercolationModel, commands: &[OpenCommand]) -> ModelResult<Replay> {
    let mut replay = Replay::default();
    for command in commands {
        open(model, *command)?;
        replay.steps += 1;
        if replay.percolated_at_step.is_none() && model.percolates() {
            replay.percolated_at_step = Some(replay.steps);
            replay.percolated_with_open_sites = Some(model.number_of_open_sites());
            debug!(
                "system percolates after {} steps with {} open sites ({:.4} of the grid)",
                replay.steps,
                model.number_of_open_sites(),
                model.open_fraction()
            );
        }
    }
    Ok(replay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let text = "# column\n1 2\n\n  5  \n3 2\n";
        let commands = parse_script(text.as_bytes()).unwrap();
        assert_eq!(
            commands,
            vec![
                OpenCommand::At(1, 2),
                OpenCommand::Index(5),
                OpenCommand::At(3, 2)
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("1 1\n1 x\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");

        let err = parse_script("1 2 3\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 1"), "got: {err}");
    }

    #[test]
    fn test_negative_values_parse_but_fail_to_open() {
        let commands = parse_script("-1\n".as_bytes()).unwrap();
        let mut model = PercolationModel::new(2).unwrap();
        assert!(matches!(
            apply(&mut model, &commands),
            Err(PercolationError::InvalidArgument(_))
        ));

        assert!(open(&mut model, OpenCommand::At(1, -2)).is_err());
        assert_eq!(model.number_of_open_sites(), 0);
    }

    #[test]
    fn test_apply_records_first_percolation() {
        let commands = parse_script("1 2\n2 2\n3 2\n3 3\n".as_bytes()).unwrap();
        let mut model = PercolationModel::new(3).unwrap();
        let replay = apply(&mut model, &commands).unwrap();
        assert_eq!(replay.steps, 4);
        assert_eq!(replay.percolated_at_step, Some(3));
        assert_eq!(replay.percolated_with_open_sites, Some(3));
    }

    #[test]
    fn test_apply_without_percolation() {
        let commands = parse_script("1\n4\n".as_bytes()).unwrap();
        let mut model = PercolationModel::new(3).unwrap();
        let replay = apply(&mut model, &commands).unwrap();
        assert_eq!(replay.steps, 2);
        assert_eq!(replay.percolated_at_step, None);
    }
}
