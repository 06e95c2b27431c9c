//! Fixed-width text tables for list output.

pub trait TableRow {
    const HEADERS: &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// Render rows as an aligned table, or the empty message when there are none.
pub fn render<T: TableRow>(rows: &[T], empty_message: &str) -> String {
    if rows.is_empty() {
        return format!("{empty_message}\n");
    }

    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|header| header.len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(|header| header.to_string()).collect();
    push_line(&mut out, &widths, &headers);
    for row in &cells {
        push_line(&mut out, &widths, row);
    }
    out
}

fn push_line(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (i, (&width, cell)) in widths.iter().zip(cells).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl TableRow for Row {
        const HEADERS: &'static [&'static str] = &["ID", "NAME"];

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn renders_aligned_columns_without_trailing_spaces() {
        let out = render(&[Row("1", "Pump-01"), Row("12", "V")], "none");
        assert_eq!(out, "ID  NAME\n1   Pump-01\n12  V\n");
    }

    #[test]
    fn empty_input_renders_the_empty_message() {
        let out = render::<Row>(&[], "No devices found");
        assert_eq!(out, "No devices found\n");
    }
}
