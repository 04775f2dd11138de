//! Terminal summary of a frame

use std::io::{IsTerminal, Write};

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, WriteColor};

use crate::convert::{extract_headers, extract_rows};
use crate::model::{CellValue, Column, Frame, Vector};

use super::OutputFormatter;

/// Elements listed per column in the structure summary
const SUMMARY_WIDTH: usize = 10;

/// Structure summary and row preview
pub struct TerminalOutput {
    color_choice: ColorChoice,
    head: usize,
}

impl TerminalOutput {
    pub fn new(head: usize) -> Self {
        Self {
            color_choice: ColorChoice::Auto,
            head,
        }
    }

    pub fn with_color_choice(mut self, color_choice: ColorChoice) -> Self {
        self.color_choice = color_choice;
        self
    }

    fn use_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn write_title(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        let title = format!(
            "'{}': {} obs. of {} variable{}",
            frame.attributes.class.first().map_or("list", String::as_str),
            frame.row_count(),
            frame.column_count(),
            if frame.column_count() == 1 { "" } else { "s" }
        );

        if self.use_color() {
            let mut out = Ansi::new(writer);
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(out, "{}", title)?;
            out.reset()?;
            writeln!(out)?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        Ok(())
    }

    fn write_structure(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        let names = extract_headers(frame)?;
        let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

        for (name, column) in names.iter().zip(&frame.columns) {
            writeln!(writer, " $ {:width$}: {}", name, describe_column(column), width = width)?;
        }
        Ok(())
    }

    fn write_preview(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        if self.head == 0 || frame.column_count() == 0 {
            return Ok(());
        }

        let mut builder = Builder::default();
        let mut header = vec![String::new()];
        header.extend(extract_headers(frame)?);
        builder.push_record(header);

        for (i, row) in extract_rows(frame)?.iter().take(self.head).enumerate() {
            let label = frame
                .attributes
                .row_names
                .as_ref()
                .and_then(|r| r.label(i))
                .unwrap_or_else(|| i.to_string());
            let mut record = vec![label];
            record.extend(row.iter().map(CellValue::to_string));
            builder.push_record(record);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        writeln!(writer)?;
        writeln!(writer, "{}", table)?;

        let hidden = frame.row_count().saturating_sub(self.head);
        if hidden > 0 {
            writeln!(writer, "# … with {} more row{}", hidden, if hidden == 1 { "" } else { "s" })?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(10)
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, frame: &Frame, writer: &mut dyn Write) -> Result<()> {
        self.write_title(frame, writer)?;
        self.write_structure(frame, writer)?;
        self.write_preview(frame, writer)?;
        Ok(())
    }
}

/// One-line description of a column: type tag then leading values
fn describe_column(column: &Column) -> String {
    if let (Some(levels), Vector::Integer(codes)) = (&column.levels, &column.vector) {
        let shown: Vec<String> = levels
            .iter()
            .take(SUMMARY_WIDTH)
            .map(|l| format!("{:?}", l))
            .collect();
        let more = if levels.len() > SUMMARY_WIDTH { ",.." } else { "" };
        return format!(
            "Factor w/ {} level{} {}{}: {}",
            levels.len(),
            if levels.len() == 1 { "" } else { "s" },
            shown.join(","),
            more,
            preview(codes, |c| c.to_string())
        );
    }

    match &column.vector {
        Vector::Integer(v) => format!("int  {}", preview(v, |i| i.to_string())),
        Vector::Double(v) => format!("num  {}", preview(v, |d| d.to_string())),
        Vector::Logical(v) => format!(
            "logi  {}",
            preview(v, |b| if *b { "TRUE".into() } else { "FALSE".into() })
        ),
        Vector::Character(v) => format!("chr  {}", preview(v, |s| format!("{:?}", s))),
        Vector::Raw(v) => format!("raw  {}", preview(v, |b| format!("{:02x}", b))),
        Vector::Complex(v) => format!("cplx  {}", preview(v, |c| format!("{}{:+}i", c.re, c.im))),
        Vector::List(v) => format!("List of {}", v.len()),
    }
}

fn preview<T>(values: &[Option<T>], show: impl Fn(&T) -> String) -> String {
    let mut parts: Vec<String> = values
        .iter()
        .take(SUMMARY_WIDTH)
        .map(|v| v.as_ref().map_or_else(|| "NA".to_string(), &show))
        .collect();
    if values.len() > SUMMARY_WIDTH {
        parts.push("...".to_string());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn render_plain(frame: &Frame, head: usize) -> String {
        let output = TerminalOutput::new(head).with_color_choice(ColorChoice::Never);
        let mut buffer = Vec::new();
        output.render(frame, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample() -> Frame {
        Frame::from_named(vec![
            ("id".into(), Vector::Integer(vec![Some(1), None, Some(3)]).into()),
            (
                "grade".into(),
                Column::factor(
                    vec![Some(2), Some(1), None],
                    ["high", "low"].into_iter().map(String::from).collect(),
                ),
            ),
            ("ok".into(), Vector::Logical(vec![Some(true), Some(false), None]).into()),
        ])
    }

    #[test]
    fn test_structure_summary() {
        let text = render_plain(&sample(), 0);
        assert!(text.starts_with("'data.frame': 3 obs. of 3 variables"));
        assert!(text.contains(" $ id   : int  1 NA 3"));
        assert!(text.contains(r#" $ grade: Factor w/ 2 levels "high","low": 2 1 NA"#));
        assert!(text.contains(" $ ok   : logi  TRUE FALSE NA"));
    }

    #[test]
    fn test_preview_resolves_factors_and_truncates() {
        let text = render_plain(&sample(), 2);
        assert!(text.contains("low"));
        assert!(text.contains("high"));
        assert!(text.contains("# … with 1 more row"));
    }
}
