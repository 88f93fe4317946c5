use core::fmt;

use crate::*;

/// Fixed-width board: every tile right-aligned to the widest tile, the blank left empty, framed by dashed rules.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blank = self.blank_tile();
        let width = digits(blank - 1);
        let rule = usize::from(self.size()) * (width + 3) + 1;

        writeln!(f, "{:-<rule$}", "")?;
        for row in self.rows() {
            for value in row {
                if value == blank {
                    write!(f, "| {:width$} ", "")?;
                } else {
                    write!(f, "| {value:>width$} ")?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{:-<rule$}", "")
    }
}

fn digits(mut value: Tile) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}
