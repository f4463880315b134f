// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use arlo_musicbrainz::ArtistRecord;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn render(artists: &[ArtistRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(artists)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(artists)?),
    }
}

fn table(artists: &[ArtistRecord]) -> String {
    if artists.is_empty() {
        return "No artists found.".to_string();
    }

    let mut out = format!(
        "{:>5}  {:<32}  {:<12}  {:<7}  {}\n",
        "SCORE", "NAME", "TYPE", "COUNTRY", "ID"
    );
    for artist in artists {
        let name = match artist.disambiguation.as_deref() {
            Some(d) if !d.is_empty() => format!("{} ({})", artist.name, d),
            _ => artist.name.clone(),
        };
        out.push_str(&format!(
            "{:>5}  {:<32}  {:<12}  {:<7}  {}\n",
            artist.score.map(|s| s.to_string()).unwrap_or_default(),
            truncate(&name, 32),
            artist.artist_type.as_deref().unwrap_or("-"),
            artist.country.as_deref().unwrap_or("-"),
            artist.id
        ));
    }
    out.pop();
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('…');
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, disambiguation: Option<&str>) -> ArtistRecord {
        ArtistRecord {
            name: name.to_string(),
            id: "a74b1b7f-71a5-4011-9441-d0b5e4122711".to_string(),
            artist_type: Some("Group".to_string()),
            country: None,
            sort_name: None,
            disambiguation: disambiguation.map(str::to_string),
            score: Some(100),
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render(&[], OutputFormat::Table).unwrap(), "No artists found.");
    }

    #[test]
    fn test_table_rows() {
        let out = render(
            &[record("Radiohead", Some("")), record("Low", Some("US slowcore"))],
            OutputFormat::Table,
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("NAME"));
        assert!(lines[1].contains("Radiohead "));
        assert!(lines[2].contains("Low (US slowcore)"));
        assert!(lines[2].contains("  -  "));
    }

    #[test]
    fn test_json_keeps_wire_names() {
        let out = render(&[record("Radiohead", None)], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "Group");
        assert!(value[0].get("country").is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }
}
