use ansi_term::{Color, Style};

use super::{COLUMN_GAP, END_PADDING, terminal_width};

#[derive(Debug, Clone, Copy)]
pub enum SummaryCellStyle {
    Default,
    Important,
}

impl SummaryCellStyle {
    pub fn get_style(&self) -> Style {
        match self {
            SummaryCellStyle::Default => Style::new(),
            SummaryCellStyle::Important => Style::new().fg(Color::Purple),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub name: String,
    pub cell_style: SummaryCellStyle,
    pub value: Vec<String>,
}

/// Name/value listing for a single record.
#[derive(Default)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &str, cell_style: SummaryCellStyle, value: Vec<String>) -> Self {
        self.rows.push(SummaryRow {
            name: name.to_string(),
            cell_style,
            value,
        });
        self
    }

    pub fn field(self, name: &str, value: impl Into<String>) -> Self {
        self.push(name, SummaryCellStyle::Default, vec![value.into()])
    }

    pub fn important(self, name: &str, value: impl Into<String>) -> Self {
        self.push(name, SummaryCellStyle::Important, vec![value.into()])
    }

    /// Absent values show as "-".
    pub fn optional(self, name: &str, value: Option<String>) -> Self {
        self.field(name, value.unwrap_or_else(|| "-".to_string()))
    }

    pub fn list(self, name: &str, values: Vec<String>) -> Self {
        self.push(name, SummaryCellStyle::Default, values)
    }

    pub fn render(&self, available: usize) -> String {
        let names_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            + 2;
        let values_width = available.saturating_sub(names_width + COLUMN_GAP + END_PADDING);
        let mut out = String::new();

        for row in &self.rows {
            out.push_str(&" ".repeat(names_width - row.name.chars().count()));
            out.push_str(&format!("{}: ", Style::new().bold().paint(row.name.as_str())));

            let style = row.cell_style.get_style();
            for (i, value) in row.value.iter().enumerate() {
                let value = if value.chars().count() > values_width && values_width > 3 {
                    let truncated: String = value.chars().take(values_width - 3).collect();
                    format!("{}...", style.paint(truncated))
                } else {
                    style.paint(value.as_str()).to_string()
                };

                if i > 0 {
                    out.push('\n');
                    out.push_str(&" ".repeat(names_width + COLUMN_GAP));
                }
                out.push_str(&value);
            }

            out.push('\n');
        }

        out
    }

    pub fn print(&self) {
        println!("{}", self.render(terminal_width()));
    }
}
