use std::{cmp::max, fmt::Alignment, io::Write};

use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row)
    }
}

#[derive(Debug)]
pub enum Row {
    Row { cells: Vec<Cell> },
    Separator,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self::Row { cells }
    }
}

#[derive(Debug)]
pub enum Cell {
    Empty,
    Decimal {
        value: Decimal,
    },
    Text {
        text: String,
        align: Alignment,
        indent: usize,
    },
}

impl Cell {
    pub fn left(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            align: Alignment::Left,
            indent: 0,
        }
    }

    pub fn right(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            align: Alignment::Right,
            indent: 0,
        }
    }

    pub fn center(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            align: Alignment::Center,
            indent: 0,
        }
    }

    pub fn indented(text: impl Into<String>, indent: usize) -> Self {
        Cell::Text {
            text: text.into(),
            align: Alignment::Left,
            indent,
        }
    }
}

/// Renders a table with box-drawing ASCII. Every column is as wide as its
/// widest cell; decimals are printed with `round` places.
pub struct TextRenderer {
    pub table: Table,
    pub round: usize,
}

impl TextRenderer {
    pub fn render<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let column_widths = self.compute_widths();
        for row in &self.table.rows {
            match row {
                Row::Separator => self.print_separator_row(w, &column_widths)?,
                Row::Row { cells } => self.print_regular_row(w, &column_widths, cells)?,
            }
        }
        Ok(())
    }

    fn print_separator_row<W: Write>(
        &self,
        w: &mut W,
        column_widths: &[usize],
    ) -> std::io::Result<()> {
        write!(w, "+")?;
        for width in column_widths {
            write!(w, "-{}-+", "-".repeat(*width))?;
        }
        writeln!(w)
    }

    fn print_regular_row<W: Write>(
        &self,
        w: &mut W,
        column_widths: &[usize],
        cells: &[Cell],
    ) -> std::io::Result<()> {
        write!(w, "|")?;
        for (i, width) in column_widths.iter().enumerate() {
            match cells.get(i).unwrap_or(&Cell::Empty) {
                Cell::Empty => write!(w, "{}", " ".repeat(width + 2))?,
                Cell::Decimal { value } => write!(w, " {:>1$.2$} ", value, width, self.round)?,
                Cell::Text {
                    text,
                    align,
                    indent,
                } => {
                    write!(w, " {}", " ".repeat(*indent))?;
                    let width = width - indent;
                    match align {
                        Alignment::Left => write!(w, "{:<1$} ", text, width)?,
                        Alignment::Right => write!(w, "{:>1$} ", text, width)?,
                        Alignment::Center => write!(w, "{:^1$} ", text, width)?,
                    }
                }
            }
            write!(w, "|")?
        }
        writeln!(w)
    }

    fn compute_widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();
        for row in &self.table.rows {
            if let Row::Row { cells } = row {
                if cells.len() > widths.len() {
                    widths.resize(cells.len(), 0)
                }
                for (i, cell) in cells.iter().enumerate() {
                    widths[i] = max(widths[i], self.min_length(cell))
                }
            }
        }
        widths
    }

    fn min_length(&self, c: &Cell) -> usize {
        match c {
            Cell::Empty => 0,
            Cell::Decimal { value } => format!("{value:.0$}", self.round).len(),
            Cell::Text { text, indent, .. } => text.chars().count() + indent,
        }
    }
}

#[cfg(test)]
mod test_table {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render() {
        let mut table = Table::new();
        table.add_row(Row::Separator);
        table.add_row(Row::new(vec![Cell::center("Item"), Cell::right("Amount")]));
        table.add_row(Row::Separator);
        table.add_row(Row::new(vec![
            Cell::left("Consultancy"),
            Cell::Decimal {
                value: Decimal::new(600, 0),
            },
        ]));
        table.add_row(Row::new(vec![Cell::indented("Tax", 2)]));
        let mut out = Vec::new();
        TextRenderer { table, round: 2 }.render(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            [
                "+-------------+--------+",
                "|    Item     | Amount |",
                "+-------------+--------+",
                "| Consultancy | 600.00 |",
                "|   Tax       |        |",
                "",
            ]
            .join("\n")
        );
    }
}
