use crate::hash::HashReport;
use anyhow::Result;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// `sha1sum`-style line; collisions are flagged instead of given a digest
pub fn format_text(report: &HashReport) -> String {
    match &report.digest {
        Some(digest) => format!("{digest}  {}", report.name),
        None => format!("COLLISION DETECTED  {}", report.name),
    }
}

pub fn format_json(reports: &[HashReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(collision: bool) -> HashReport {
        HashReport {
            name: "file.bin".to_string(),
            bytes: 3,
            digest: (!collision).then(|| "a9993e364706816aba3e25717850c26c9cd0d89d".to_string()),
            collision,
        }
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            format_text(&report(false)),
            "a9993e364706816aba3e25717850c26c9cd0d89d  file.bin"
        );
        assert_eq!(format_text(&report(true)), "COLLISION DETECTED  file.bin");
    }

    #[test]
    fn test_json_format() {
        let json = format_json(&[report(false), report(true)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["bytes"], 3);
        assert_eq!(value[0]["collision"], false);
        assert!(value[1]["digest"].is_null());
    }
}
