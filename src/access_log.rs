//! Access log glue: pulls requested filenames out of log lines and tallies them

use std::io::BufRead;

use crate::{ProbingHashTable, TallyError};

/// Marker preceding the requested path
const REQUEST_START: &str = "GET ";
/// Marker following the requested path
const REQUEST_END: &str = " HTTP";

/// Extracts the requested filename from an access log line
///
/// The filename is the text between the first `GET ` and the following ` HTTP`. Returns `None`
/// when either marker is missing or nothing lies between them.
#[must_use]
pub fn parse_filename(line: &str) -> Option<&str> {
    let (_, request) = line.split_once(REQUEST_START)?;
    let (filename, _) = request.split_once(REQUEST_END)?;
    (!filename.is_empty()).then_some(filename)
}

/// Counts visits per requested filename over every line of `reader`
///
/// Lines are decoded lossily, so stray non UTF-8 bytes do not abort the tally. Lines without a
/// `GET` request are skipped.
///
/// # Errors
///
/// `TallyError::Io` if reading fails, `TallyError::Table` if the table cannot grow.
pub fn tally_visits<R: BufRead>(reader: R) -> Result<ProbingHashTable<String, u64>, TallyError> {
    let mut visits = ProbingHashTable::new();

    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        if let Some(filename) = parse_filename(&line) {
            visits.increment(filename.to_owned())?;
        }
    }

    Ok(visits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::top_k;
    use std::io::Cursor;

    /// A few lines in the Common Log Format, including some that carry no GET request
    const LOG: &str = "\
in24.inetnebr.com - - [01/Aug/1995:00:00:01 -0400] \"GET index.html HTTP/1.0\" 200 1839
uplherc.upl.com - - [01/Aug/1995:00:00:07 -0400] \"GET index.html HTTP/1.0\" 304 0
uplherc.upl.com - - [01/Aug/1995:00:00:08 -0400] \"GET a.gif HTTP/1.0\" 304 0
ix-esc-ca2-07.ix.netcom.com - - [01/Aug/1995:00:00:09 -0400] \"GET index.html HTTP/1.0\" 200 1713
uplherc.upl.com - - [01/Aug/1995:00:00:14 -0400] \"POST form.cgi HTTP/1.0\" 200 0
slppp6.intermind.net - - [01/Aug/1995:00:00:10 -0400] \"GET b.gif HTTP/1.0\" 200 1687
piweba4y.prodigy.com - - [01/Aug/1995:00:00:10 -0400] \"GET a.gif HTTP/1.0\" 200 1713
garbage line
";

    #[test]
    fn test_parse_filename() {
        assert_eq!(
            parse_filename("host - - [date] \"GET /images/NASA-logosmall.gif HTTP/1.0\" 200 786"),
            Some("/images/NASA-logosmall.gif")
        );
        assert_eq!(parse_filename("\"GET index.html HTTP/1.1\""), Some("index.html"));
    }

    #[test]
    fn test_parse_filename_rejects_incomplete_lines() {
        assert_eq!(parse_filename(""), None);
        assert_eq!(parse_filename("\"POST form.cgi HTTP/1.0\""), None);
        assert_eq!(parse_filename("\"GET index.html\" 200"), None);
        assert_eq!(parse_filename("\"GET  HTTP/1.0\""), None);
    }

    #[test]
    fn test_tally_visits() {
        let visits = tally_visits(Cursor::new(LOG)).unwrap();

        assert_eq!(visits.len(), 3);
        assert_eq!(visits.search("index.html"), Some(&3));
        assert_eq!(visits.search("a.gif"), Some(&2));
        assert_eq!(visits.search("b.gif"), Some(&1));
        assert_eq!(visits.search("form.cgi"), None);

        assert_eq!(
            top_k(visits.snapshot(), 2),
            vec![("index.html".to_string(), 3), ("a.gif".to_string(), 2)]
        );
    }

    #[test]
    fn test_tally_visits_tolerates_invalid_utf8() {
        let mut log = b"\xff\xfe \"GET x.html HTTP/1.0\"\n".to_vec();
        log.extend_from_slice(b"\"GET x.html HTTP/1.0\"");
        let visits = tally_visits(Cursor::new(log)).unwrap();
        assert_eq!(visits.search("x.html"), Some(&2));
    }

    #[test]
    fn test_tally_visits_empty_input() {
        let visits = tally_visits(Cursor::new("")).unwrap();
        assert!(visits.is_empty());
    }
}
