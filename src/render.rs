//! 端末への表示

use interlining_common::{schema, Table};
use std::io::{self, Write};

/// 一覧に出す列
const SUMMARY_COLUMNS: &[&str] = &[
    schema::INDENT_NUMBER,
    schema::STAGE,
    schema::CUSTOMER,
    schema::STYLE,
    schema::GSM,
    schema::STRUCTURE,
    schema::TYPE_OF_CONSTRUCTION,
];

/// 主要列の一覧表
pub fn write_summary<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            SUMMARY_COLUMNS
                .iter()
                .map(|name| row.get(name).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = SUMMARY_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: &[&str]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(SUMMARY_COLUMNS))?;
    writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    )?;
    for row in &cells {
        let refs: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "{}", line(&refs))?;
    }
    Ok(())
}

/// 全列をレコードごとに表示
pub fn write_records<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let label_width = schema::column_names().map(str::len).max().unwrap_or(0);
    for (i, record) in table.rows().iter().enumerate() {
        writeln!(out, "#{}", i + 1)?;
        for (spec, value) in record.fields() {
            writeln!(out, "  {:<width$} : {}", spec.name, value, width = label_width)?;
        }
    }
    Ok(())
}

/// 一覧表と全列表示を続けて出力
pub fn write_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    write_summary(out, table)?;
    writeln!(out)?;
    write_records(out, table)?;
    writeln!(out, "\n{} 件", table.len())
}

pub fn print_table(table: &Table) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use interlining_common::schema::{CUSTOMER, INDENT_NUMBER};
    use interlining_common::Record;

    fn sample() -> Table {
        let record = Record::new()
            .with(INDENT_NUMBER, 10005)
            .and_then(|r| r.with(CUSTOMER, "Acme"))
            .unwrap();
        Table::from_rows(vec![record])
    }

    #[test]
    fn test_summary_has_header_and_row() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Indent Number | Stage | Customer"));
        assert!(lines[2].starts_with("10005"));
        assert!(lines[2].contains("Acme"));
    }

    #[test]
    fn test_records_list_every_field() {
        let mut out = Vec::new();
        write_records(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 27);
        assert!(text.contains("Flap"));
    }

    #[test]
    fn test_table_has_summary_and_details() {
        let mut out = Vec::new();
        write_table(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Indent Number | Stage | Customer"));
        assert!(text.contains("#1"));
        assert!(text.trim_end().ends_with("1 件"));
    }
}
