//! Interactive candidate selection.

use std::io::{BufRead, Write};

use manga_dl::{CatalogEntry, CatalogError};

const PROMPT: &str = "Please choose by typing the number: ";

/// Writes the numbered candidate list and reads one index from `input`.
///
/// The index is only parsed here; range checking is left to
/// [`manga_dl::select_entry`].
pub(crate) fn prompt_for_choice<R: BufRead, W: Write>(
    candidates: &[CatalogEntry],
    mut input: R,
    mut output: W,
) -> Result<usize, CatalogError> {
    let write_failed =
        |e: std::io::Error| CatalogError::selection_aborted(format!("cannot write prompt: {e}"));

    writeln!(output, "{} matches were found", candidates.len()).map_err(write_failed)?;
    for (index, entry) in candidates.iter().enumerate() {
        writeln!(output, "\t[{index}]\t{}", entry.title).map_err(write_failed)?;
    }
    write!(output, "{PROMPT}").map_err(write_failed)?;
    output.flush().map_err(write_failed)?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| CatalogError::selection_aborted(format!("cannot read choice: {e}")))?;
    if read == 0 {
        return Err(CatalogError::selection_aborted(
            "input closed before a choice was made",
        ));
    }

    let answer = line.trim();
    answer
        .parse::<usize>()
        .map_err(|_| CatalogError::selection_aborted(format!("'{answer}' is not a number")))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn candidates() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("ab1", "Berserk"),
            CatalogEntry::new("cd2", "Berserk of Gluttony"),
        ]
    }

    #[test]
    fn test_prompt_lists_candidates_and_reads_index() {
        let mut out = Vec::new();
        let choice = prompt_for_choice(&candidates(), Cursor::new("1\n"), &mut out).unwrap();
        assert_eq!(choice, 1);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("2 matches were found"));
        assert!(shown.contains("\t[0]\tBerserk\n"));
        assert!(shown.contains("\t[1]\tBerserk of Gluttony\n"));
        assert!(shown.ends_with(PROMPT));
    }

    #[test]
    fn test_prompt_trims_whitespace() {
        let choice = prompt_for_choice(&candidates(), Cursor::new("  0  \r\n"), Vec::new()).unwrap();
        assert_eq!(choice, 0);
    }

    #[test]
    fn test_prompt_non_numeric_aborts() {
        let err = prompt_for_choice(&candidates(), Cursor::new("first\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::SelectionAborted { .. }));
        assert!(err.to_string().contains("'first' is not a number"));
    }

    #[test]
    fn test_prompt_closed_input_aborts() {
        let err = prompt_for_choice(&candidates(), Cursor::new(""), Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::SelectionAborted { .. }));
    }

    #[test]
    fn test_prompt_out_of_range_index_passed_through() {
        // select_entry rejects it afterwards
        let choice = prompt_for_choice(&candidates(), Cursor::new("7\n"), Vec::new()).unwrap();
        assert_eq!(choice, 7);
    }
}
