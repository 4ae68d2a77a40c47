use std::{io::Read, path::Path};

use crate::autocomplete::{normalize_word, Autocomplete, Freq};

const LOG_EVERY: usize = 10_000;

/// Frequency assumed when a row has no second column.
const DEFAULT_FREQ: Freq = 1;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
}

/// Import a `term,frequency` CSV file into the index. Returns the number of rows read.
pub fn import_csv(
    file_path: &Path,
    ac: &mut Autocomplete,
    normalize: bool,
) -> Result<usize, ImportError> {
    log::info!("importing terms from {} ...", file_path.display());

    let file = std::fs::File::open(file_path)?;
    let n = import_reader(file, ac, normalize)?;

    log::info!(
        "finished. imported {} rows from {} ({} distinct terms in index)",
        n,
        file_path.display(),
        ac.len()
    );
    Ok(n)
}

/// Import `term,frequency` rows from any reader. Lines starting with `#` are skipped.
pub fn import_reader<R: Read>(
    rdr: R,
    ac: &mut Autocomplete,
    normalize: bool,
) -> Result<usize, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut n = 0;
    for result in reader.records() {
        let record = result?;
        n += 1;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(n);
        let (term, freq) = read_row(&record, line, normalize)?;
        ac.insert(&term, freq);

        if n % LOG_EVERY == 0 {
            log::info!("imported {} rows", n);
        }
    }

    Ok(n)
}

fn read_row(
    record: &csv::StringRecord,
    line: usize,
    normalize: bool,
) -> Result<(String, Freq), ImportError> {
    let raw = record.get(0).unwrap_or("");
    let term = if normalize {
        normalize_word(raw)
    } else {
        raw.to_string()
    };
    if term.is_empty() {
        return Err(ImportError::Validation(format!("line {}: empty term", line)));
    }

    let freq = match record.get(1) {
        None | Some("") => DEFAULT_FREQ,
        Some(s) => s.parse::<Freq>().map_err(|_| {
            ImportError::Validation(format!("line {}: invalid frequency '{}'", line, s))
        })?,
    };

    Ok((term, freq))
}
