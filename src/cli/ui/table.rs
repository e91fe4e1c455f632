use ansi_term::{Color, Style};

use super::{COLUMN_GAP, END_PADDING, terminal_width};

#[derive(Debug, Clone, Copy)]
pub enum TableCellStyle {
    Default,
    Important,
}

impl TableCellStyle {
    pub fn get_style(&self) -> Style {
        match self {
            TableCellStyle::Default => Style::new(),
            TableCellStyle::Important => Style::new().bold().fg(Color::Purple),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableHeader {
    pub text: String,
    pub cell_style: TableCellStyle,
    pub max_width: Option<usize>,
}

impl TableHeader {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cell_style: TableCellStyle::Default,
            max_width: None,
        }
    }

    pub fn important(mut self) -> Self {
        self.cell_style = TableCellStyle::Important;
        self
    }

    pub fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A value that renders as one table line.
pub trait TableRow {
    fn headers() -> Vec<TableHeader>;
    fn cells(self) -> Vec<Option<String>>;
}

pub struct Table {
    pub headers: Vec<TableHeader>,
    pub rows: Vec<Vec<Option<String>>>,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn clip(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width < 3 {
        return text.chars().take(width).collect();
    }

    let truncated: String = text.chars().take(width - 3).collect();
    format!("{truncated}...")
}

impl Table {
    pub fn new(headers: Vec<TableHeader>) -> Self {
        Self {
            headers,
            rows: vec![],
        }
    }

    pub fn from_rows<R: TableRow>(rows: impl IntoIterator<Item = R>) -> Self {
        let mut table = Self::new(R::headers());
        for row in rows {
            table.add_row(row.cells());
        }
        table
    }

    pub fn add_row(&mut self, cells: Vec<Option<String>>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self, available: usize) -> Vec<usize> {
        let mut widths = self
            .headers
            .iter()
            .map(|h| char_len(&h.text))
            .collect::<Vec<_>>();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                let cell_len = cell.as_deref().map(char_len).unwrap_or(0);
                let capped = cell_len.min(self.headers[i].max_width.unwrap_or(usize::MAX));
                widths[i] = widths[i].max(capped);
            }
        }

        let gaps = widths.len().saturating_sub(1) * COLUMN_GAP;

        // shrink the widest columns one step at a time, never below their header
        loop {
            let total = widths.iter().sum::<usize>() + gaps + END_PADDING;
            if total <= available {
                break;
            }

            let Some(widest) = widths
                .iter()
                .enumerate()
                .filter(|(i, w)| **w > char_len(&self.headers[*i].text))
                .map(|(_, w)| *w)
                .max()
            else {
                break;
            };

            for (i, width) in widths.iter_mut().enumerate() {
                if *width == widest && *width > char_len(&self.headers[i].text) {
                    *width -= 1;
                }
            }
        }

        widths
    }

    pub fn render(&self, available: usize) -> String {
        let widths = self.column_widths(available);
        let gap = " ".repeat(COLUMN_GAP);
        let mut out = String::new();

        let header_line = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(header, width)| {
                let padding = " ".repeat(width - char_len(&header.text));
                format!("{}{}", Style::new().bold().paint(header.text.as_str()), padding)
            })
            .collect::<Vec<_>>()
            .join(&gap);
        out.push_str(&header_line);
        out.push_str(&" ".repeat(END_PADDING));
        out.push('\n');

        for row in &self.rows {
            let line = self
                .headers
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (header, width))| {
                    let cell = row.get(i).cloned().flatten().unwrap_or_default();
                    let cell = clip(&cell, *width);
                    let padding = " ".repeat(width - char_len(&cell));
                    format!("{}{}", header.cell_style.get_style().paint(cell), padding)
                })
                .collect::<Vec<_>>()
                .join(&gap);
            out.push_str(&line);
            out.push_str(&" ".repeat(END_PADDING));
            out.push('\n');
        }

        out
    }

    pub fn print(&self) {
        print!("{}", self.render(terminal_width()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, Option<&'static str>);

    impl TableRow for Row {
        fn headers() -> Vec<TableHeader> {
            vec![TableHeader::new("id"), TableHeader::new("name")]
        }

        fn cells(self) -> Vec<Option<String>> {
            vec![Some(self.0.to_string()), self.1.map(String::from)]
        }
    }

    fn plain_lines(table: &Table, width: usize) -> Vec<String> {
        // headers are bold; strip the escape sequences for comparison
        let bold = Style::new().bold();
        table
            .render(width)
            .lines()
            .map(|line| {
                line.replace(&bold.prefix().to_string(), "")
                    .replace(&bold.suffix().to_string(), "")
            })
            .collect()
    }

    #[test]
    fn test_render_pads_columns() {
        let table = Table::from_rows(vec![Row("1", Some("Admin")), Row("12", None)]);
        let lines = plain_lines(&table, 80);

        assert_eq!(lines[0], "id  name  ");
        assert_eq!(lines[1], "1   Admin ");
        assert_eq!(lines[2], "12        ");
    }

    #[test]
    fn test_render_shrinks_to_width() {
        let table = Table::from_rows(vec![Row("1", Some("a very long role description"))]);
        let lines = plain_lines(&table, 16);

        assert_eq!(lines[1], "1   a very l... ");
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
    }

    #[test]
    fn test_max_width() {
        let mut table = Table::new(vec![TableHeader::new("mail").max_width(6)]);
        table.add_row(vec![Some("someone@example.com".to_string())]);

        let lines = plain_lines(&table, 80);
        assert_eq!(lines[1], "som... ");
    }
}
