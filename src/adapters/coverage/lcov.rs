use super::FileCoverage;

/// One entry per `SF:` record, with its `DA:` lines.
pub(super) fn file_entries(content: &str) -> Result<Vec<FileCoverage>, String> {
    let mut files = Vec::new();
    let mut current: Option<FileCoverage> = None;

    for raw in content.lines() {
        let line = raw.trim();
        if let Some(path) = line.strip_prefix("SF:") {
            files.extend(current.take());
            current = Some(FileCoverage { path: path.to_string(), lines: Vec::new() });
        } else if line == "end_of_record" {
            files.extend(current.take());
        } else if let Some(data) = line.strip_prefix("DA:")
            && let Some(file) = current.as_mut()
        {
            file.lines.push(parse_data_line(data)?);
        }
    }
    files.extend(current);

    Ok(files)
}

/// `DA:<line>,<hits>[,<checksum>]`
fn parse_data_line(data: &str) -> Result<(u32, u64), String> {
    let mut fields = data.split(',');
    let number = fields.next().unwrap_or_default().trim();
    let hits = fields.next().ok_or_else(|| format!("malformed DA record 'DA:{}'", data))?.trim();

    let number = number.parse::<u32>().map_err(|_| format!("invalid line number '{}'", number))?;
    // Some producers emit negative or fractional counts for unexecuted lines.
    let hits = match hits.parse::<u64>() {
        Ok(value) => value,
        Err(_) => hits.parse::<f64>().map(|value| value.max(0.0) as u64).map_err(|_| {
            format!("invalid hit count '{}'", hits)
        })?,
    };
    Ok((number, hits))
}
