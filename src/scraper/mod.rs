pub(crate) mod anchor;
pub(crate) mod franchise;
pub(crate) mod player;
pub(crate) mod roster;
pub(crate) mod standings;

use std::num::ParseIntError;
use std::str::FromStr;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::{debug, warn};

use crate::config::RowErrorPolicy;
use crate::error::{Result, XbshlError};

/// POST a form body and return the raw response markup.
pub(crate) async fn post_form(
    client: &reqwest::Client,
    url: &str,
    form: &[(&str, &str)],
) -> Result<String> {
    debug!(url, "posting form");

    let response = client
        .post(url)
        .form(form)
        .send()
        .await
        .map_err(|e| XbshlError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(XbshlError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| XbshlError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// POST a form body and parse the response as an HTML document.
pub(crate) async fn post_document(
    client: &reqwest::Client,
    url: &str,
    form: &[(&str, &str)],
) -> Result<Html> {
    let body = post_form(client, url, form).await?;
    Ok(Html::parse_document(&body))
}

/// Full text content of an element, trimmed at both ends.
pub(crate) fn inner_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Direct element children of `element` with the given tag name.
pub(crate) fn child_elements<'a>(element: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == name)
        .collect()
}

/// Rows of a table, looking through an implied or explicit `tbody`.
pub(crate) fn table_rows(table: ElementRef) -> Vec<ElementRef> {
    table
        .children()
        .filter_map(ElementRef::wrap)
        .flat_map(|child| match child.value().name() {
            "tr" => vec![child],
            "thead" | "tbody" | "tfoot" => child_elements(child, "tr"),
            _ => Vec::new(),
        })
        .collect()
}

/// Parse a whole number, ignoring surrounding whitespace and `,` thousands
/// separators.
pub(crate) fn parse_int<T>(text: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    let trimmed = text.trim();
    trimmed
        .replace(',', "")
        .parse()
        .map_err(|e: ParseIntError| XbshlError::Format {
            value: trimmed.to_owned(),
            reason: e.to_string(),
        })
}

/// Parse a rate or percentage such as `"52.3"`. Commas are not separators here.
pub(crate) fn parse_decimal(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(XbshlError::Format {
            value: trimmed.to_owned(),
            reason: "not a finite number".to_string(),
        }),
        Err(e) => Err(XbshlError::Format {
            value: trimmed.to_owned(),
            reason: e.to_string(),
        }),
    }
}

/// Collect per-row results, applying the configured row error policy.
///
/// Only row-level errors are ever skipped; anything else still aborts.
pub(crate) fn collect_rows<T, I>(rows: I, policy: RowErrorPolicy, what: &'static str) -> Result<Vec<T>>
where
    I: IntoIterator<Item = Result<Option<T>>>,
{
    let mut records = Vec::new();
    for row in rows {
        match row {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) if policy == RowErrorPolicy::Skip && e.is_row_level() => {
                warn!(error = %e, what, "skipping unparsable row");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}
