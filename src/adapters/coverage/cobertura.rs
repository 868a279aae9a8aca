use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::FileCoverage;

/// One entry per `<class>`, with every `<line>` nested inside it.
pub(super) fn file_entries(content: &str) -> Result<Vec<FileCoverage>, String> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut files: Vec<FileCoverage> = Vec::new();
    let mut in_class = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(ref e) if e.name().as_ref() == b"class" => {
                let path = attribute(e, b"filename")?.unwrap_or_default();
                files.push(FileCoverage { path, lines: Vec::new() });
                in_class = true;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"class" => {
                let path = attribute(e, b"filename")?.unwrap_or_default();
                files.push(FileCoverage { path, lines: Vec::new() });
            }
            Event::End(ref e) if e.name().as_ref() == b"class" => in_class = false,
            Event::Start(ref e) | Event::Empty(ref e)
                if in_class && e.name().as_ref() == b"line" =>
            {
                let line = parse_line(e)?;
                if let Some(file) = files.last_mut() {
                    file.lines.push(line);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(files)
}

fn parse_line(element: &BytesStart<'_>) -> Result<(u32, u64), String> {
    let number = attribute(element, b"number")?.ok_or("<line> without number attribute")?;
    let hits = attribute(element, b"hits")?.ok_or("<line> without hits attribute")?;

    let number = number.parse::<u32>().map_err(|_| format!("invalid line number '{}'", number))?;
    let hits = hits.parse::<u64>().map_err(|_| format!("invalid hit count '{}'", hits))?;
    Ok((number, hits))
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
