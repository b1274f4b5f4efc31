// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{GoverError, Result};
use crate::releases::model::ReleaseEntry;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.expanded > table > tbody > tr").expect("row selector"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("cell selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("link selector"));

/// Parse the downloads page into release entries, in document order.
///
/// Tolerant by design: rows that do not carry exactly six data cells, or
/// whose first cell has no download link, are skipped without error. The
/// markup itself only fails to parse when it is not valid UTF-8. No
/// deduplication, filtering, or sorting happens here.
pub fn parse_listing(html: &[u8]) -> Result<Vec<ReleaseEntry>> {
    let html = std::str::from_utf8(html).map_err(|err| GoverError::Parse(err.to_string()))?;
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    for row in document.select(&ROW_SELECTOR) {
        let cells: Vec<_> = row.select(&CELL_SELECTOR).collect();
        if cells.len() != 6 {
            continue;
        }

        let link = match cells[0].select(&LINK_SELECTOR).next() {
            Some(link) => link,
            None => continue,
        };

        let name = link.text().collect::<String>().trim().to_string();
        let url = link.value().attr("href").unwrap_or_default().to_string();
        let version = derive_version(&name);

        entries.push(ReleaseEntry {
            name,
            version,
            url,
            kind: cell_text(&cells[1]),
            os: cell_text(&cells[2]),
            arch: cell_text(&cells[3]),
            size: cell_text(&cells[4]),
            checksum: cell_text(&cells[5]),
        });
    }

    Ok(entries)
}

fn cell_text(cell: &scraper::ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Canonical dotted version from a published artifact name.
///
/// `go1.9.2.linux-amd64.tar.gz` keeps three fields ("1.9.2"); when the
/// third dotted field does not start with a digit only two are kept, with
/// any `-suffix` stripped from the second, so
/// `go1.4-bootstrap-20171003.tar.gz` becomes "1.4". The leading product
/// prefix is dropped from the first field.
fn derive_version(name: &str) -> String {
    let fields: Vec<&str> = name.split('.').collect();

    let third_numeric = fields
        .get(2)
        .is_some_and(|field| field.starts_with(|c: char| c.is_ascii_digit()));

    let version = if fields.len() >= 3 && third_numeric {
        fields[..3].join(".")
    } else {
        let mut head: Vec<String> = fields.iter().take(2).map(|s| (*s).to_string()).collect();
        if head.len() > 1
            && let Some(index) = head[1].find('-')
        {
            head[1].truncate(index);
        }
        head.join(".")
    };

    strip_name_prefix(&version)
}

fn strip_name_prefix(version: &str) -> String {
    match version.find(|c: char| c.is_ascii_digit()) {
        Some(index) => version[index..].to_string(),
        None => version.to_string(),
    }
}
