//! Structured extraction from a discovered data endpoint.
use crate::fields::{self, company_list};
use scout_common::{Record, Result, ScoutError, UNKNOWN_BATCH};
use scout_http::{HttpClient, RequestOpts};
use serde_json::{json, Value};
use std::time::Duration;

const GRAPHQL_MARKER: &str = "graphql";

const COMPANIES_QUERY: &str = r#"
query {
    companies {
        id
        name
        batch
        shortDescription
        website
    }
}
"#;

const PROGRESS_EVERY: usize = 50;

pub struct ApiExtractor<'a> {
    http: &'a HttpClient,
    timeout: Duration,
}

impl<'a> ApiExtractor<'a> {
    pub fn new(http: &'a HttpClient, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    /// Append up to `limit` records from `endpoint` to `records`.
    ///
    /// Failures are logged and end this path; records appended before the
    /// failure are kept. Returns the number of records added.
    pub async fn extract(&self, endpoint: &str, limit: usize, records: &mut Vec<Record>) -> usize {
        tracing::info!(target: "harvest.api", %endpoint, limit, "api.extract.start");
        let before = records.len();

        let outcome = if endpoint.contains(GRAPHQL_MARKER) {
            self.extract_graphql(endpoint, limit, records).await
        } else {
            self.extract_rest(endpoint, limit, records).await
        };

        let added = records.len() - before;
        match outcome {
            Ok(()) => {
                tracing::info!(target: "harvest.api", %endpoint, added, "api.extract.done");
            }
            Err(ScoutError::MalformedResponse(msg)) => {
                tracing::error!(target: "harvest.api", %endpoint, added, error = %msg, "api.extract.malformed");
            }
            Err(e) => {
                tracing::error!(target: "harvest.api", %endpoint, added, error = %e, "api.extract.failed");
            }
        }
        added
    }

    async fn extract_graphql(
        &self,
        endpoint: &str,
        limit: usize,
        records: &mut Vec<Record>,
    ) -> Result<()> {
        let body = json!({ "query": COMPANIES_QUERY });
        let data: Value = self
            .http
            .post_json(endpoint, &body, RequestOpts::timeout(self.timeout))
            .await?
            .error_for_status()?
            .json()?;

        let companies = data
            .get("data")
            .and_then(|d| d.get("companies"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ScoutError::MalformedResponse(
                    "GraphQL response doesn't contain data.companies".into(),
                )
            })?;

        records.extend(
            companies
                .iter()
                .take(limit)
                .enumerate()
                .filter(|(_, item)| item.is_object())
                .map(|(i, item)| record_from_item(i, item, false)),
        );
        Ok(())
    }

    async fn extract_rest(
        &self,
        endpoint: &str,
        limit: usize,
        records: &mut Vec<Record>,
    ) -> Result<()> {
        let data: Value = self
            .http
            .get(endpoint, RequestOpts::timeout(self.timeout))
            .await?
            .error_for_status()?
            .json()?;

        let items = company_list(&data).ok_or_else(|| {
            ScoutError::MalformedResponse("no company list in response".into())
        })?;

        for (i, item) in items.iter().take(limit).enumerate() {
            if !item.is_object() {
                tracing::debug!(target: "harvest.api", index = i, "api.item.skipped_non_object");
                continue;
            }
            records.push(record_from_item(i, item, true));
            if (i + 1) % PROGRESS_EVERY == 0 {
                tracing::info!(target: "harvest.api", processed = i + 1, "api.extract.progress");
            }
        }
        Ok(())
    }
}

/// Map one company object; `index` is its zero-based position in the list.
pub fn record_from_item(index: usize, item: &Value, with_founders: bool) -> Record {
    let name = fields::NAME.or(item, || format!("Company_{}", index + 1));
    let batch = fields::BATCH.or(item, || UNKNOWN_BATCH.to_string());
    let description = fields::DESCRIPTION.or(item, String::new);
    let mut record = Record::new(name, batch, &description)
        .with_company_url(fields::WEBSITE.or(item, String::new));

    if with_founders {
        if let Some(founders) = item.get("founders").and_then(Value::as_array) {
            for founder in founders {
                match founder {
                    Value::Object(_) => {
                        let Some(name) = fields::FOUNDER_NAME.first(founder) else {
                            continue;
                        };
                        if record.push_founder(name) {
                            if let Some(url) = fields::FOUNDER_PROFILE.first(founder) {
                                record.linkedin_urls.push(url);
                            }
                        }
                    }
                    Value::String(name) if !name.trim().is_empty() => {
                        record.push_founder(name.trim());
                    }
                    _ => {}
                }
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternate_keys_fill_fields() {
        let item = json!({
            "companyName": "Acme",
            "ycBatch": "W21",
            "pitch": "Widgets",
            "url": "https://acme.io"
        });
        let r = record_from_item(0, &item, true);
        assert_eq!(r.name, "Acme");
        assert_eq!(r.batch, "W21");
        assert_eq!(r.description, "Widgets");
        assert_eq!(r.company_url, "https://acme.io");
    }

    #[test]
    fn missing_name_gets_positional_placeholder() {
        let r = record_from_item(4, &json!({"name": ""}), true);
        assert_eq!(r.name, "Company_5");
        assert_eq!(r.batch, "Unknown");
        assert_eq!(r.description, "");
    }

    #[test]
    fn founders_from_objects_and_strings() {
        let item = json!({
            "name": "Acme",
            "founders": [
                {"name": "Jane Doe", "linkedinUrl": "https://linkedin.com/in/jane"},
                {"name": "John Roe"},
                "Ann Poe",
                {"linkedin": "https://linkedin.com/in/nobody"},
                42
            ]
        });
        let r = record_from_item(0, &item, true);
        assert_eq!(r.founders, vec!["Jane Doe", "John Roe", "Ann Poe"]);
        assert_eq!(r.linkedin_urls, vec!["https://linkedin.com/in/jane"]);
    }

    #[test]
    fn graphql_items_never_carry_founders() {
        let item = json!({"name": "Acme", "founders": ["Jane Doe"]});
        let r = record_from_item(0, &item, false);
        assert!(r.founders.is_empty());
        assert!(r.linkedin_urls.is_empty());
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let item = json!({"shortDescription": "d".repeat(500)});
        assert_eq!(record_from_item(0, &item, true).description.len(), 200);
    }
}
