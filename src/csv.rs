// src/csv.rs
//
// Just enough CSV for the snapshot file: comma separated, double-quote
// quoting with "" escapes, LF or CRLF line ends, no header row.

use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

/// One parsed record and the 1-based line it started on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/* ---------------- Parsing ---------------- */

/// Split `text` into records. Blank lines are skipped; an unterminated
/// quote swallows the rest of the input into its field.
pub fn parse_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut field = s!();
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut start_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == SEP && !in_quotes => fields.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                fields.push(take(&mut field));
                flush(&mut records, &mut fields, start_line);
                line += 1;
                start_line = line;
            }
            c => {
                if c == '\n' { line += 1; }
                field.push(c);
            }
        }
    }

    fields.push(field);
    flush(&mut records, &mut fields, start_line);
    records
}

fn flush(records: &mut Vec<Record>, fields: &mut Vec<String>, line: usize) {
    let blank = fields.len() == 1 && fields[0].is_empty();
    if blank {
        fields.clear();
    } else {
        records.push(Record { line, fields: take(fields) });
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one record terminated by a single `\n`.
pub fn write_record<W: Write>(mut w: W, fields: &[&str]) -> io::Result<()> {
    for (i, cell) in fields.iter().enumerate() {
        if i > 0 { write!(w, "{SEP}")?; }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}
