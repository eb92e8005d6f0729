use std::fmt::{self, Display};
use std::time::{Duration, Instant};
use colored::Colorize;

/// Uniform user-facing error path
pub fn handle_error<E: Display + ?Sized>(err: &E) {
    eprintln!("{} {}", "Error!".red().bold(), err);
}

pub fn error(message: &str) {
    handle_error(message);
}

pub fn success(message: &str) {
    println!("{} {}", "Success!".green().bold(), message);
}

pub fn log(message: &str) {
    println!("{} {}", ">".cyan(), message);
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("[{millis}ms]")
    } else {
        format!("[{:.1}s]", elapsed.as_secs_f64())
    }
}

/// Elapsed time since creation, printed as `[12ms]`
pub struct Stamp(Instant);

impl Stamp {
    pub fn start() -> Self {
        Self(Instant::now())
    }
}

impl Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_elapsed(self.0.elapsed()).dimmed())
    }
}

/// Millisecond timestamp as `YYYY-MM-DD HH:MM` in UTC
pub fn format_created(millis: Option<i64>) -> String {
    millis
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Left-aligned columns sized to their widest cell, header dimmed
pub fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("  {}\n", render(header.to_vec()).dimmed());
    for row in rows {
        out.push_str(&format!("  {}\n", render(row.iter().map(String::as_str).collect())));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(42)), "[42ms]");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "[1.5s]");
    }

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(Some(1584722256178)), "2020-03-20 16:37");
        assert_eq!(format_created(None), "-");
    }

    #[test]
    fn test_table_aligns_columns() {
        colored::control::set_override(false);
        let rows = vec![
            vec!["rec_1".to_string(), "www".to_string(), "A".to_string()],
            vec!["rec_22".to_string(), "@".to_string(), "MX".to_string()],
        ];
        let out = table(&["id", "name", "type"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  id      name  type");
        assert_eq!(lines[1], "  rec_1   www   A");
        assert_eq!(lines[2], "  rec_22  @     MX");
    }
}
