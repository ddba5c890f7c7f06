//! Line-oriented editing session.
//!
//! Each input line is one of:
//! - `<LABEL> <TEXT>` - commit TEXT (possibly empty) into the cell
//! - `get <LABEL>` - print the cell's display value
//! - `show` - print the whole grid
//! - `quit` / `exit` - end the session (so does end of input)
//!
//! A bad line prints `Error: ...` and the session continues.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use crate::render::render_table;
use gridcalc_core::Document;

enum Outcome {
    Print(String),
    Quit,
}

pub fn run<R: BufRead, W: Write>(doc: &mut Document, input: R, mut out: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match handle_line(doc, line) {
            Ok(Outcome::Print(text)) => writeln!(out, "{text}")?,
            Ok(Outcome::Quit) => break,
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn handle_line(doc: &mut Document, line: &str) -> Result<Outcome> {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    match head {
        "quit" | "exit" => Ok(Outcome::Quit),
        "show" => Ok(Outcome::Print(
            render_table(&doc.snapshot(), doc.dims()).trim_end().to_string(),
        )),
        "get" => {
            if rest.is_empty() {
                bail!("Usage: get <LABEL>");
            }
            let id = doc.resolve_label(rest)?;
            Ok(Outcome::Print(doc.display(&id)))
        }
        label => {
            let id = doc.resolve_label(label)?;
            let state = doc.commit_edit(id, rest)?;
            Ok(Outcome::Print(format!("{label} = {}", state.display(&id))))
        }
    }
}
