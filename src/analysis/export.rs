//! CSV export of derived tables. Every file starts with a header row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::types::{BiasProfile, CategoryScore, WordProfile};
use crate::error::{AnalysisError, AnalysisResult};

/// `user_<first 8 chars of user_id>_word_profile.csv`
pub fn word_profile_filename(user_id: &str) -> String {
    let short: String = user_id.chars().take(8).collect();
    format!("user_{short}_word_profile.csv")
}

/// Columns `word,relative_frequency`, one row per word in rank order.
pub fn write_word_profile<W: Write>(out: &mut W, profile: &WordProfile) -> std::io::Result<()> {
    write_row(out, ["word", "relative_frequency"])?;
    for (word, freq) in &profile.word_freq {
        write_row(out, [word.as_str(), freq.to_string().as_str()])?;
    }
    Ok(())
}

/// Header `user_id,<category>...` and a single row of means.
pub fn write_bias_profile<W: Write>(out: &mut W, profile: &BiasProfile) -> std::io::Result<()> {
    let header = std::iter::once("user_id").chain(profile.means.keys().map(String::as_str));
    write_row(out, header)?;

    let values: Vec<String> = profile.means.values().map(|v| v.to_string()).collect();
    let row = std::iter::once(profile.user_id.as_str()).chain(values.iter().map(String::as_str));
    write_row(out, row)
}

/// Columns `category,intensity,sentiment`; absent sentiment is an empty field.
pub fn write_report<W: Write>(out: &mut W, rows: &[CategoryScore]) -> std::io::Result<()> {
    write_row(out, ["category", "intensity", "sentiment"])?;
    for row in rows {
        let intensity = row.intensity.to_string();
        let sentiment = row.sentiment.map(|s| s.to_string()).unwrap_or_default();
        write_row(out, [row.category.as_str(), intensity.as_str(), sentiment.as_str()])?;
    }
    Ok(())
}

/// Create `path` and fill it with `write`.
pub fn export_to<F>(path: &Path, write: F) -> AnalysisResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let io_err = |source: std::io::Error| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write(&mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    tracing::info!(path = %path.display(), "exported csv");
    Ok(())
}

fn write_row<'a, W, I>(out: &mut W, fields: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let line: Vec<String> = fields.into_iter().map(escape).collect();
    writeln!(out, "{}", line.join(","))
}

/// Quote fields containing separators, quotes or line breaks.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn render<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn word_profile_csv() {
        let profile = WordProfile {
            user_id: "u".into(),
            total_words: 4,
            word_freq: vec![("hello".into(), 0.75), ("world".into(), 0.25)],
        };
        let csv = render(|b| write_word_profile(b, &profile));
        assert_eq!(csv, "word,relative_frequency\nhello,0.75\nworld,0.25\n");
    }

    #[test]
    fn empty_word_profile_has_header_only() {
        let csv = render(|b| write_word_profile(b, &WordProfile::empty("u")));
        assert_eq!(csv, "word,relative_frequency\n");
    }

    #[test]
    fn bias_profile_is_single_row() {
        let means: BTreeMap<String, f64> =
            [("family".to_string(), 0.1), ("work".to_string(), 0.05)].into_iter().collect();
        let profile = BiasProfile {
            user_id: "abc".into(),
            samples: 3,
            means,
        };
        let csv = render(|b| write_bias_profile(b, &profile));
        assert_eq!(csv, "user_id,family,work\nabc,0.1,0.05\n");
    }

    #[test]
    fn report_leaves_missing_sentiment_blank() {
        let rows = vec![
            CategoryScore {
                category: "work".into(),
                intensity: 0.2,
                sentiment: Some(-0.5),
            },
            CategoryScore {
                category: "food".into(),
                intensity: 0.1,
                sentiment: None,
            },
        ];
        let csv = render(|b| write_report(b, &rows));
        assert_eq!(csv, "category,intensity,sentiment\nwork,0.2,-0.5\nfood,0.1,\n");
    }

    #[test]
    fn fields_are_quoted_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn filename_uses_short_id() {
        assert_eq!(
            word_profile_filename("0123456789abcdef"),
            "user_01234567_word_profile.csv"
        );
        assert_eq!(word_profile_filename("ab"), "user_ab_word_profile.csv");
    }

    #[test]
    fn export_writes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");
        export_to(&path, |out| write_word_profile(out, &WordProfile::empty("u"))).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "word,relative_frequency\n"
        );
    }
}
