use crate::writer::WrittenOutput;
use scout_common::{truncate_chars, Record};
use std::fmt;
use std::time::Duration;

const RULE_WIDTH: usize = 60;
const SAMPLE_SIZE: usize = 3;

/// Human-readable end-of-run report.
pub struct Summary<'a> {
    pub records: &'a [Record],
    pub elapsed: Duration,
    pub output: Option<&'a WrittenOutput>,
}

impl Summary<'_> {
    pub fn with_founders(&self) -> usize {
        self.records.iter().filter(|r| r.has_founders()).count()
    }

    pub fn with_linkedin(&self) -> usize {
        self.records.iter().filter(|r| r.has_linkedin()).count()
    }

    fn share(&self, count: usize) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            count as f64 * 100.0 / self.records.len() as f64
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return writeln!(f, "No data was scraped");
        }

        let total = self.records.len();
        let founders = self.with_founders();
        let linkedin = self.with_linkedin();
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "\n{rule}")?;
        writeln!(f, "SCRAPING COMPLETE - SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total startups scraped: {total}")?;
        writeln!(
            f,
            "Startups with founder info: {founders} ({:.1}%)",
            self.share(founders)
        )?;
        writeln!(
            f,
            "Startups with LinkedIn URLs: {linkedin} ({:.1}%)",
            self.share(linkedin)
        )?;
        writeln!(f, "Time elapsed: {:.2} seconds", self.elapsed.as_secs_f64())?;

        writeln!(f, "\nSample of scraped data (first {SAMPLE_SIZE}):")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, r) in self.records.iter().take(SAMPLE_SIZE).enumerate() {
            writeln!(f, "\n{}. {} ({})", i + 1, r.name, r.batch)?;
            writeln!(f, "   Description: {}...", truncate_chars(&r.description, 100))?;
            let founders = if r.founders.is_empty() {
                "None".to_string()
            } else {
                r.founders.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
            };
            writeln!(f, "   Founders: {founders}")?;
            writeln!(f, "   LinkedIn URLs: {}", r.linkedin_urls.len())?;
        }

        if let Some(out) = self.output {
            writeln!(
                f,
                "\nComplete dataset saved to '{}' ({total} companies)",
                out.primary.display()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_run_says_so() {
        let s = Summary {
            records: &[],
            elapsed: Duration::from_secs(1),
            output: None,
        };
        assert_eq!(s.to_string().trim(), "No data was scraped");
    }

    #[test]
    fn counts_and_percentages() {
        let mut a = Record::new("Acme", "S21", "Widgets for warehouses");
        a.push_founder("Jane Doe");
        a.linkedin_urls.push("https://www.linkedin.com/in/janedoe".into());
        let mut b = Record::new("Bolt", "W22", "Faster checkouts");
        b.push_founder("John Roe");
        let records = vec![a, b, Record::new("Crate", "F24", ""), Record::new("Dune", "S23", "")];
        let out = WrittenOutput {
            primary: PathBuf::from("yc_startups.csv"),
            secondary: PathBuf::from("yc_startups_google_sheets.csv"),
            rows: 4,
        };

        let s = Summary {
            records: &records,
            elapsed: Duration::from_millis(1500),
            output: Some(&out),
        };
        let text = s.to_string();

        assert!(text.contains("Total startups scraped: 4"));
        assert!(text.contains("Startups with founder info: 2 (50.0%)"));
        assert!(text.contains("Startups with LinkedIn URLs: 1 (25.0%)"));
        assert!(text.contains("Time elapsed: 1.50 seconds"));
        assert!(text.contains("1. Acme (S21)"));
        assert!(text.contains("3. Crate (F24)"));
        assert!(!text.contains("Dune"));
        assert!(text.contains("Founders: None"));
        assert!(text.contains("saved to 'yc_startups.csv' (4 companies)"));
    }
}
